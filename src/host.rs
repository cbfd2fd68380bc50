//! Seams to the browser: persistent storage, tabs and the page document.
//!
//! The extension runs on a single-threaded event loop, so none of these
//! futures need to be `Send`.
#![allow(async_fn_in_trait)]

use crate::error::HostError;
use crate::icons::IconSet;
use crate::messages::ExtensionMessage;
use crate::storage::PreferenceMap;
use crate::tab_data::{TabId, TabInfo};

pub trait PreferenceStore {
    /// Current map; an absent key loads as an empty map.
    async fn load(&self) -> Result<PreferenceMap, HostError>;

    /// Replace the whole stored map.
    async fn save(&self, prefs: &PreferenceMap) -> Result<(), HostError>;
}

pub trait TabHost {
    async fn set_icon(&self, tab_id: TabId, icon: IconSet) -> Result<(), HostError>;

    /// Fire-and-forget; an error only means nobody was listening.
    async fn send_message(&self, tab_id: TabId, message: &ExtensionMessage) -> Result<(), HostError>;

    async fn query_tabs(&self) -> Result<Vec<TabInfo>, HostError>;

    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, HostError>;
}

/// Root marker written onto the page document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualMarker {
    Enabled,
    Disabled,
    /// Storage could not be read; rendered as disabled
    Error,
    /// Initialization outran the safety timer; rendered as disabled
    Timeout,
}

impl VisualMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            VisualMarker::Enabled => "enabled",
            VisualMarker::Disabled => "disabled",
            VisualMarker::Error => "error",
            VisualMarker::Timeout => "timeout",
        }
    }

    pub fn for_state(enabled: bool) -> VisualMarker {
        if enabled { VisualMarker::Enabled } else { VisualMarker::Disabled }
    }
}

/// The hosting page's document, as far as the page agent touches it.
pub trait PageSurface {
    fn style_attached(&self) -> bool;

    fn attach_style(&mut self) -> Result<(), HostError>;

    fn detach_style(&mut self) -> Result<(), HostError>;

    fn set_marker(&mut self, marker: VisualMarker) -> Result<(), HostError>;
}
