//! Dark Buddy - per-site dark mode browser extension
//! Built with Rust + WASM

mod chrome;
pub mod config;
pub mod coordinator;
pub mod dom;
pub mod domain;
pub mod error;
pub mod host;
pub mod icons;
pub mod messages;
pub mod page_agent;
pub mod storage;
pub mod tab_data;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export domain resolution for JavaScript access
#[wasm_bindgen]
pub fn resolve_domain(url: &str) -> Option<String> {
    domain::resolve_domain(url)
}

// Background service worker entry point
#[wasm_bindgen]
pub fn start_coordinator() {
    chrome::background::start(config::Settings::default());
}

// Content script entry point, loaded at document_start
#[wasm_bindgen]
pub fn start_page_agent() {
    chrome::content::start(config::Settings::default());
}
