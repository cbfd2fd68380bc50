//! Messages sent from the background coordinator to page agents
use serde::{Deserialize, Serialize};

/// Discriminated by the `type` field on the wire:
/// `{ "type": "TOGGLE_DARK_MODE", "enabled": true }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtensionMessage {
    #[serde(rename = "TOGGLE_DARK_MODE")]
    ToggleDarkMode { enabled: bool },
}

impl ExtensionMessage {
    pub fn toggle(enabled: bool) -> Self {
        ExtensionMessage::ToggleDarkMode { enabled }
    }

    /// Parse an incoming runtime message; anything that is not one of ours
    /// yields `None` and is ignored by the receiver.
    pub fn parse(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle_wire_format() {
        let value = serde_json::to_value(ExtensionMessage::toggle(true)).unwrap();

        assert_eq!(value, json!({ "type": "TOGGLE_DARK_MODE", "enabled": true }));
    }

    #[test]
    fn test_parse_toggle() {
        let message = ExtensionMessage::parse(json!({ "type": "TOGGLE_DARK_MODE", "enabled": false }));

        assert_eq!(message, Some(ExtensionMessage::ToggleDarkMode { enabled: false }));
    }

    #[test]
    fn test_parse_ignores_other_discriminators() {
        assert_eq!(ExtensionMessage::parse(json!({ "type": "PING" })), None);
        assert_eq!(ExtensionMessage::parse(json!({ "type": "SET_THEME", "enabled": true })), None);
        assert_eq!(ExtensionMessage::parse(json!({ "enabled": true })), None);
        assert_eq!(ExtensionMessage::parse(json!("TOGGLE_DARK_MODE")), None);
    }

    #[test]
    fn test_parse_rejects_missing_state() {
        assert_eq!(ExtensionMessage::parse(json!({ "type": "TOGGLE_DARK_MODE" })), None);
    }
}
