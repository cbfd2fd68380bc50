//! Browser-side glue between chrome.* and the coordinator / page agent
pub mod background;
mod bridge;
pub mod content;
