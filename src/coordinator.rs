//! Background coordinator: owns the preference map, the toolbar icon and
//! the toggle messages sent to page agents.

use std::cell::{Cell, RefCell};

use futures::future::join_all;

use crate::domain::resolve_domain;
use crate::error::HostError;
use crate::host::{PreferenceStore, TabHost};
use crate::icons::IconSet;
use crate::messages::ExtensionMessage;
use crate::storage::PreferenceMap;
use crate::tab_data::{TabChange, TabId, TabInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Toggled { domain: String, enabled: bool },
    /// Tab has no id, no url, or a url without a site (internal pages)
    NoDomain,
    /// Another toggle was still running
    InProgress,
    /// The current map could not be read, nothing was written
    Aborted,
}

/// Held for the duration of one toggle; released on every exit path.
struct ToggleLatch<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> ToggleLatch<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(ToggleLatch { flag })
        }
    }
}

impl Drop for ToggleLatch<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct Coordinator<S, T> {
    store: S,
    tabs: T,
    cache: RefCell<Option<PreferenceMap>>,
    toggling: Cell<bool>,
}

impl<S: PreferenceStore, T: TabHost> Coordinator<S, T> {
    pub fn new(store: S, tabs: T) -> Self {
        Coordinator {
            store,
            tabs,
            cache: RefCell::new(None),
            toggling: Cell::new(false),
        }
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    fn tabs(&self) -> &T {
        &self.tabs
    }

    /// Current preference map, served from the cache once loaded.
    pub async fn read_preferences(&self) -> Result<PreferenceMap, HostError> {
        if let Some(cached) = self.cache.borrow().as_ref() {
            return Ok(cached.clone());
        }

        let loaded = self.store.load().await?;
        // A change notification may have landed while the load was in flight
        let mut cache = self.cache.borrow_mut();
        Ok(cache.get_or_insert(loaded).clone())
    }

    /// Flip dark mode for the tab's domain, then persist, update the icon
    /// and notify the page concurrently.
    pub async fn toggle(&self, tab: &TabInfo) -> ToggleOutcome {
        let Some((tab_id, url)) = tab.target() else {
            return ToggleOutcome::NoDomain;
        };
        let Some(domain) = resolve_domain(url) else {
            log::debug!("Ignoring toggle on {}: no site to key on", url);
            return ToggleOutcome::NoDomain;
        };
        let Some(_latch) = ToggleLatch::acquire(&self.toggling) else {
            log::debug!("Ignoring toggle for {}: previous toggle still running", domain);
            return ToggleOutcome::InProgress;
        };

        let current = match self.read_preferences().await {
            Ok(prefs) => prefs,
            Err(e) => {
                log::error!("Toggle for {} aborted: {}", domain, e);
                return ToggleOutcome::Aborted;
            }
        };

        let (updated, enabled) = current.toggled(&domain);
        let message = ExtensionMessage::toggle(enabled);

        // Icon syncs racing the effects below must already see the new state
        self.cache.replace(Some(updated.clone()));

        let (saved, icon, delivered) = futures::join!(
            self.store.save(&updated),
            self.tabs.set_icon(tab_id, IconSet::for_state(enabled)),
            self.tabs.send_message(tab_id, &message),
        );

        if let Err(e) = saved {
            log::error!("Failed to persist dark mode for {}: {}", domain, e);
            // Roll the cache back unless a change notification replaced it
            let mut cache = self.cache.borrow_mut();
            if cache.as_ref() == Some(&updated) {
                *cache = Some(current);
            }
        }
        if let Err(e) = icon {
            log::warn!("{}", e);
        }
        if let Err(e) = delivered {
            // The page agent reads storage on its next load
            log::debug!("{}", e);
        }

        log::info!(
            "Dark mode {} for {}",
            if enabled { "enabled" } else { "disabled" },
            domain
        );
        ToggleOutcome::Toggled { domain, enabled }
    }

    /// Set the tab's icon from the stored preference of its domain.
    ///
    /// Returns the icon applied, or `None` when the tab has no site or has
    /// gone away.
    pub async fn sync_icon_for_tab(&self, tab: &TabInfo) -> Option<IconSet> {
        let (tab_id, url) = tab.target()?;
        let domain = resolve_domain(url)?;

        let enabled = match self.read_preferences().await {
            Ok(prefs) => prefs.is_enabled(&domain),
            Err(e) => {
                log::warn!("Showing {} as disabled: {}", domain, e);
                false
            }
        };

        let icon = IconSet::for_state(enabled);
        match self.tabs.set_icon(tab_id, icon).await {
            Ok(()) => Some(icon),
            Err(e) => {
                log::debug!("Icon sync skipped: {}", e);
                None
            }
        }
    }

    /// Bring every open tab's icon in line with storage after a cold start.
    pub async fn initialize(&self) -> usize {
        let tabs = match self.tabs.query_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                log::error!("Could not enumerate tabs: {}", e);
                return 0;
            }
        };

        // Warm the cache once instead of one storage read per tab
        if let Err(e) = self.read_preferences().await {
            log::warn!("Preferences unavailable during startup: {}", e);
        }

        let synced = join_all(tabs.iter().map(|tab| self.sync_icon_for_tab(tab)))
            .await
            .into_iter()
            .flatten()
            .count();

        log::info!("Synced icons for {} of {} tabs", synced, tabs.len());
        synced
    }

    pub async fn on_action_clicked(&self, tab: &TabInfo) -> ToggleOutcome {
        self.toggle(tab).await
    }

    pub async fn on_tab_activated(&self, tab_id: TabId) -> Option<IconSet> {
        match self.tabs.get_tab(tab_id).await {
            Ok(tab) => self.sync_icon_for_tab(&tab).await,
            Err(e) => {
                log::debug!("Tab activation ignored: {}", e);
                None
            }
        }
    }

    pub async fn on_tab_updated(&self, tab_id: TabId, change: &TabChange, tab: &TabInfo) -> Option<IconSet> {
        if !change.affects_domain() {
            return None;
        }

        let current = TabInfo {
            id: Some(tab_id),
            url: change.url.clone().or_else(|| tab.url.clone()),
        };
        self.sync_icon_for_tab(&current).await
    }

    /// Replace the cache with the value storage now holds.
    pub fn on_storage_changed(&self, new_value: Option<PreferenceMap>) {
        self.cache.replace(Some(new_value.unwrap_or_default()));
    }
}
