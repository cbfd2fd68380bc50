//! Background service worker wiring
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::bridge::{self, from_js, ChromeStore, ChromeTabs};
use crate::config::Settings;
use crate::coordinator::Coordinator;
use crate::storage::PreferenceMap;
use crate::tab_data::{TabChange, TabId, TabInfo};

type ChromeCoordinator = Coordinator<ChromeStore, ChromeTabs>;

/// Subscribe to the events background.js captured, then sync icons for the
/// open tabs.
pub fn start(settings: Settings) {
    let coordinator = Rc::new(Coordinator::new(ChromeStore::new(&settings.storage_key), ChromeTabs));

    listen_storage_changed(coordinator.clone(), &settings.storage_key);
    listen_action_clicked(coordinator.clone());
    listen_tab_activated(coordinator.clone());
    listen_tab_updated(coordinator.clone());
    listen_lifecycle(coordinator.clone());

    // Replays whatever woke the worker before the wasm package was ready
    bridge::flushPendingEvents();

    // Workers restart without an onStartup event, so sync right away too
    spawn_local(async move {
        coordinator.initialize().await;
    });
}

fn listen_action_clicked(coordinator: Rc<ChromeCoordinator>) {
    let callback = Closure::wrap(Box::new(move |tab_js: JsValue| {
        let coordinator = coordinator.clone();
        spawn_local(async move {
            match from_js::<TabInfo>(tab_js) {
                Ok(tab) => {
                    coordinator.on_action_clicked(&tab).await;
                }
                Err(e) => log::warn!("Ignoring icon click: {}", e),
            }
        });
    }) as Box<dyn Fn(JsValue)>);

    bridge::onActionClicked(callback.as_ref().unchecked_ref());
    callback.forget();
}

fn listen_tab_activated(coordinator: Rc<ChromeCoordinator>) {
    let callback = Closure::wrap(Box::new(move |tab_id: TabId| {
        let coordinator = coordinator.clone();
        spawn_local(async move {
            coordinator.on_tab_activated(tab_id).await;
        });
    }) as Box<dyn Fn(TabId)>);

    bridge::onTabActivated(callback.as_ref().unchecked_ref());
    callback.forget();
}

fn listen_tab_updated(coordinator: Rc<ChromeCoordinator>) {
    let callback = Closure::wrap(Box::new(move |tab_id: TabId, change_js: JsValue, tab_js: JsValue| {
        let change = match from_js::<TabChange>(change_js) {
            Ok(change) => change,
            Err(e) => {
                log::warn!("Ignoring update for tab {}: {}", tab_id, e);
                return;
            }
        };
        let tab = from_js::<TabInfo>(tab_js).unwrap_or_default();

        let coordinator = coordinator.clone();
        spawn_local(async move {
            coordinator.on_tab_updated(tab_id, &change, &tab).await;
        });
    }) as Box<dyn Fn(TabId, JsValue, JsValue)>);

    bridge::onTabUpdated(callback.as_ref().unchecked_ref());
    callback.forget();
}

fn listen_storage_changed(coordinator: Rc<ChromeCoordinator>, key: &str) {
    let callback = Closure::wrap(Box::new(move |value: JsValue| {
        let new_value = if value.is_null() || value.is_undefined() {
            None
        } else {
            match from_js::<PreferenceMap>(value) {
                Ok(prefs) => Some(prefs),
                Err(e) => {
                    log::error!("Unreadable preference update: {}", e);
                    None
                }
            }
        };
        coordinator.on_storage_changed(new_value);
    }) as Box<dyn Fn(JsValue)>);

    bridge::onStorageChanged(key, callback.as_ref().unchecked_ref());
    callback.forget();
}

fn listen_lifecycle(coordinator: Rc<ChromeCoordinator>) {
    let callback = Closure::wrap(Box::new(move || {
        let coordinator = coordinator.clone();
        spawn_local(async move {
            coordinator.initialize().await;
        });
    }) as Box<dyn Fn()>);

    bridge::onLifecycle(callback.as_ref().unchecked_ref());
    callback.forget();
}
