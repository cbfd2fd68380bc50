//! Extension-wide settings

/// chrome.storage.local key holding the preference map
pub const STORAGE_KEY: &str = "darkModeSites";

/// Attribute on `<html>` carrying the visual marker
pub const MARKER_ATTRIBUTE: &str = "data-darkbuddy";

pub const STYLE_ELEMENT_ID: &str = "darkbuddy-inversion";

pub const SAFETY_TIMEOUT_MS: u32 = 100;

/// Colour inversion, active only while the root marker reads `enabled`.
/// Media is inverted a second time so photos and video keep their colours.
/// `{marker}` stands for the marker attribute name.
const INVERSION_CSS_TEMPLATE: &str = r#"
html[{marker}="enabled"] > body {
  filter: invert(0.9) hue-rotate(180deg);
  forced-color-adjust: none !important;
}

html[{marker}="enabled"] > body :is(
  img,
  picture,
  canvas,
  iframe,
  video,
  [aria-hidden="true"],
  [style*="background-image"]) {
  filter: invert(1) hue-rotate(180deg);
}
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub storage_key: String,
    pub marker_attribute: String,
    pub style_element_id: String,
    pub safety_timeout_ms: u32,
}

impl Settings {
    /// Inversion stylesheet keyed on this marker attribute.
    pub fn inversion_css(&self) -> String {
        INVERSION_CSS_TEMPLATE.replace("{marker}", &self.marker_attribute)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            storage_key: STORAGE_KEY.to_string(),
            marker_attribute: MARKER_ATTRIBUTE.to_string(),
            style_element_id: STYLE_ELEMENT_ID.to_string(),
            safety_timeout_ms: SAFETY_TIMEOUT_MS,
        }
    }
}
