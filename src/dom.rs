//! `PageSurface` over the live document via web-sys
use web_sys::{Document, Element};

use crate::config::Settings;
use crate::error::{js_reason, HostError};
use crate::host::{PageSurface, VisualMarker};

/// Inversion style lives in a `<style>` element on `<html>`, so it can be
/// attached at `document_start` before `<head>` exists.
pub struct DocumentSurface {
    document: Document,
    marker_attribute: String,
    style_element_id: String,
    css: String,
}

impl DocumentSurface {
    pub fn new(document: Document, settings: &Settings) -> Self {
        DocumentSurface {
            document,
            marker_attribute: settings.marker_attribute.clone(),
            style_element_id: settings.style_element_id.clone(),
            css: settings.inversion_css(),
        }
    }

    /// Surface for the window this script runs in.
    pub fn current(settings: &Settings) -> Result<Self, HostError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| HostError::Document("no document in this context".to_string()))?;
        Ok(DocumentSurface::new(document, settings))
    }

    fn root(&self) -> Result<Element, HostError> {
        self.document
            .document_element()
            .ok_or_else(|| HostError::Document("document has no root element".to_string()))
    }

    fn style_element(&self) -> Option<Element> {
        self.document.get_element_by_id(&self.style_element_id)
    }
}

impl PageSurface for DocumentSurface {
    fn style_attached(&self) -> bool {
        self.style_element().is_some()
    }

    fn attach_style(&mut self) -> Result<(), HostError> {
        if self.style_attached() {
            return Ok(());
        }

        let style = self
            .document
            .create_element("style")
            .map_err(|e| HostError::Document(js_reason(&e)))?;
        style.set_id(&self.style_element_id);
        style.set_text_content(Some(&self.css));

        self.root()?
            .append_child(&style)
            .map_err(|e| HostError::Document(js_reason(&e)))?;
        Ok(())
    }

    fn detach_style(&mut self) -> Result<(), HostError> {
        if let Some(style) = self.style_element() {
            style.remove();
        }
        Ok(())
    }

    fn set_marker(&mut self, marker: VisualMarker) -> Result<(), HostError> {
        self.root()?
            .set_attribute(&self.marker_attribute, marker.as_str())
            .map_err(|e| HostError::Document(js_reason(&e)))
    }
}
