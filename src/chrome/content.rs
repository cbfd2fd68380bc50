//! Content script wiring
use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::bridge::{self, from_js, ChromeStore};
use crate::config::Settings;
use crate::dom::DocumentSurface;
use crate::messages::ExtensionMessage;
use crate::page_agent::{run_initialization, PageAgent};

type SharedAgent = Rc<RefCell<PageAgent<DocumentSurface>>>;

pub fn start(settings: Settings) {
    let surface = match DocumentSurface::current(&settings) {
        Ok(surface) => surface,
        Err(e) => {
            log::error!("Dark mode unavailable on this page: {}", e);
            return;
        }
    };
    let agent: SharedAgent = Rc::new(RefCell::new(PageAgent::new(surface)));

    listen_messages(agent.clone());
    arm_safety_timer(agent.clone(), settings.safety_timeout_ms);

    let page_url = web_sys::window()
        .and_then(|window| window.location().href().ok())
        .unwrap_or_default();
    let store = ChromeStore::new(&settings.storage_key);

    spawn_local(async move {
        run_initialization(&*agent, &store, &page_url).await;
    });
}

fn listen_messages(agent: SharedAgent) {
    let callback = Closure::wrap(Box::new(move |message_js: JsValue| {
        let Ok(value) = from_js::<serde_json::Value>(message_js) else {
            return;
        };
        if let Some(message) = ExtensionMessage::parse(value) {
            agent.borrow_mut().on_message(&message);
        }
    }) as Box<dyn Fn(JsValue)>);

    bridge::onRuntimeMessage(callback.as_ref().unchecked_ref());
    callback.forget();
}

fn arm_safety_timer(agent: SharedAgent, timeout_ms: u32) {
    spawn_local(async move {
        TimeoutFuture::new(timeout_ms).await;
        agent.borrow_mut().on_safety_timeout();
    });
}
