//! Tab data as delivered by the chrome.tabs API
use serde::Deserialize;

pub type TabId = i32;

/// The parts of a browser tab the coordinator cares about.
///
/// Both fields are optional on the host side: devtools windows have no id
/// and tabs without the `tabs` permission have no url.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<TabId>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabInfo {
    pub fn new(id: TabId, url: &str) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
        }
    }

    /// Id and url, when both are present and the id is usable.
    pub fn target(&self) -> Option<(TabId, &str)> {
        match (self.id, self.url.as_deref()) {
            (Some(id), Some(url)) if id > 0 && !url.is_empty() => Some((id, url)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Unloaded,
    Loading,
    Complete,
    #[serde(other)]
    Other,
}

/// Change descriptor passed to `tabs.onUpdated`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TabChange {
    #[serde(default)]
    pub status: Option<TabStatus>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabChange {
    /// Whether the change may have put a different domain in view.
    pub fn affects_domain(&self) -> bool {
        self.url.is_some()
            || matches!(self.status, Some(TabStatus::Loading | TabStatus::Complete))
    }
}
