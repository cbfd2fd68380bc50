//! Failures reported by the host browser
use crate::tab_data::TabId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("failed to set icon for tab {tab_id}: {reason}")]
    Icon { tab_id: TabId, reason: String },

    #[error("no listener reachable in tab {tab_id}: {reason}")]
    Messaging { tab_id: TabId, reason: String },

    #[error("tab {0} no longer exists")]
    StaleTab(TabId),

    #[error("document unavailable: {0}")]
    Document(String),

    #[error("failed to decode host value: {0}")]
    Decode(String),
}

/// Render a thrown JS value for logs.
pub fn js_reason(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
