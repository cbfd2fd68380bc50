//! JS bridge imports and the chrome-backed host implementations
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{js_reason, HostError};
use crate::host::{PreferenceStore, TabHost};
use crate::icons::IconSet;
use crate::messages::ExtensionMessage;
use crate::storage::PreferenceMap;
use crate::tab_data::{TabId, TabInfo};

#[wasm_bindgen(module = "/js/chrome_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setTabIcon(tab_id: i32, path: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendTabMessage(tab_id: i32, message: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> Result<JsValue, JsValue>;

    pub(super) fn onActionClicked(callback: &js_sys::Function);

    pub(super) fn onTabActivated(callback: &js_sys::Function);

    pub(super) fn onTabUpdated(callback: &js_sys::Function);

    pub(super) fn onLifecycle(callback: &js_sys::Function);

    pub(super) fn onStorageChanged(key: &str, callback: &js_sys::Function);

    pub(super) fn flushPendingEvents();

    pub(super) fn onRuntimeMessage(callback: &js_sys::Function);
}

/// Plain JS objects, never `Map`s, so chrome APIs accept the values.
pub(super) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, HostError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| HostError::Decode(e.to_string()))
}

pub(super) fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError::Decode(e.to_string()))
}

/// The preference map in chrome.storage.local
pub struct ChromeStore {
    key: String,
}

impl ChromeStore {
    pub fn new(key: &str) -> Self {
        ChromeStore { key: key.to_string() }
    }
}

impl PreferenceStore for ChromeStore {
    async fn load(&self) -> Result<PreferenceMap, HostError> {
        let stored = getStorage(&self.key)
            .await
            .map_err(|e| HostError::Storage(js_reason(&e)))?;

        if stored.is_null() || stored.is_undefined() {
            Ok(PreferenceMap::new())
        } else {
            from_js(stored)
        }
    }

    async fn save(&self, prefs: &PreferenceMap) -> Result<(), HostError> {
        let value = to_js(prefs)?;
        setStorage(&self.key, value)
            .await
            .map_err(|e| HostError::Storage(js_reason(&e)))
    }
}

pub struct ChromeTabs;

impl TabHost for ChromeTabs {
    async fn set_icon(&self, tab_id: TabId, icon: IconSet) -> Result<(), HostError> {
        let path = to_js(&icon.path_map())?;
        setTabIcon(tab_id, path)
            .await
            .map_err(|e| HostError::Icon {
                tab_id,
                reason: js_reason(&e),
            })
    }

    async fn send_message(&self, tab_id: TabId, message: &ExtensionMessage) -> Result<(), HostError> {
        let message = to_js(message)?;
        sendTabMessage(tab_id, message)
            .await
            .map_err(|e| HostError::Messaging {
                tab_id,
                reason: js_reason(&e),
            })
    }

    async fn query_tabs(&self) -> Result<Vec<TabInfo>, HostError> {
        let tabs = queryTabs()
            .await
            .map_err(|e| HostError::Decode(js_reason(&e)))?;
        from_js(tabs)
    }

    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, HostError> {
        let tab = getTab(tab_id)
            .await
            .map_err(|_| HostError::StaleTab(tab_id))?;
        from_js(tab)
    }
}
