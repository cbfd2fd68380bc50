//! Toolbar icon sets
use std::collections::BTreeMap;

/// Pixel densities shipped for each icon set.
pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSet {
    /// Shown while dark mode is off for the tab's domain
    Light,
    /// Shown while dark mode is on
    Dark,
}

impl IconSet {
    pub fn for_state(enabled: bool) -> IconSet {
        if enabled { IconSet::Dark } else { IconSet::Light }
    }

    fn prefix(self) -> &'static str {
        match self {
            IconSet::Light => "light",
            IconSet::Dark => "dark",
        }
    }

    pub fn path(self, size: u32) -> String {
        format!("icons/{}-{}.png", self.prefix(), size)
    }

    /// The `{ "16": "icons/...", ... }` object `chrome.action.setIcon` takes.
    pub fn path_map(self) -> BTreeMap<String, String> {
        ICON_SIZES
            .iter()
            .map(|size| (size.to_string(), self.path(*size)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_for_state() {
        assert_eq!(IconSet::for_state(false), IconSet::Light);
        assert_eq!(IconSet::for_state(true), IconSet::Dark);
    }

    #[test]
    fn test_path_map_has_every_density() {
        let paths = IconSet::Dark.path_map();

        assert_eq!(paths.len(), 4);
        assert_eq!(paths["16"], "icons/dark-16.png");
        assert_eq!(paths["128"], "icons/dark-128.png");
        assert_eq!(IconSet::Light.path(48), "icons/light-48.png");
    }
}
