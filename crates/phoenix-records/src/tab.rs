//! Tab state record
//!
//! Snapshot of one tab as it was saved:
//! - URL and title
//! - Navigation history (opaque)
//! - Zoom and pin state
//! - Favicon (opaque, newer formats only)

use serde::Serialize;
use url::Url;

use crate::blob::OpaqueBlob;
use crate::zoom::ZoomLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabStateRecord {
    /// Address shown in the tab, empty for a new-tab page
    url: String,
    /// Page title at save time
    title: String,
    /// Back/forward entries, owned by the history subsystem
    history: OpaqueBlob,
    zoom: ZoomLevel,
    pinned: bool,
    /// Favicon payload when the format carries one
    icon: Option<OpaqueBlob>,
    /// Set by the owning window, never by the decoder directly
    current: bool,
}

impl TabStateRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            history: OpaqueBlob::empty(),
            zoom: ZoomLevel::NEUTRAL,
            pinned: false,
            icon: None,
            current: false,
        }
    }

    pub fn with_history(mut self, history: OpaqueBlob) -> Self {
        self.history = history;
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomLevel) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_icon(mut self, icon: OpaqueBlob) -> Self {
        self.icon = Some(icon);
        self
    }

    pub(crate) fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn history(&self) -> &OpaqueBlob {
        &self.history
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn icon(&self) -> Option<&OpaqueBlob> {
        self.icon.as_ref()
    }

    /// Whether this tab was the selected tab of its window
    pub fn is_current_in_window(&self) -> bool {
        self.current
    }

    /// A tab without a URL is a new-tab page
    pub fn is_blank(&self) -> bool {
        self.url.is_empty()
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    /// The stored URL, if it is an absolute URL
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tab_defaults() {
        let tab = TabStateRecord::new("https://example.com", "Example");
        assert_eq!(tab.url(), "https://example.com");
        assert_eq!(tab.title(), "Example");
        assert!(tab.history().is_empty());
        assert!(tab.zoom().is_neutral());
        assert!(!tab.is_pinned());
        assert!(tab.icon().is_none());
        assert!(!tab.is_current_in_window());
    }

    #[test]
    fn test_builder_fields() {
        let tab = TabStateRecord::new("https://example.com", "")
            .with_history(OpaqueBlob::new(2, vec![1, 2, 3]))
            .with_zoom(ZoomLevel::from_raw(0.9))
            .with_pinned(true)
            .with_icon(OpaqueBlob::new(1, vec![0x89, b'P', b'N', b'G']));

        assert_eq!(tab.history().bytes(), &[1, 2, 3]);
        assert_eq!(tab.zoom().factor(), 0.9);
        assert!(tab.is_pinned());
        assert_eq!(tab.icon().map(OpaqueBlob::len), Some(4));
    }

    #[test]
    fn test_blank_tab() {
        let tab = TabStateRecord::new("", "");
        assert!(tab.is_blank());
        assert!(tab.parsed_url().is_none());
        assert_eq!(tab.display_title(), "");
    }

    #[test]
    fn test_display_title_falls_back_to_url() {
        let untitled = TabStateRecord::new("https://example.com/a", "");
        assert_eq!(untitled.display_title(), "https://example.com/a");

        let titled = TabStateRecord::new("https://example.com/a", "A");
        assert_eq!(titled.display_title(), "A");
    }

    #[test]
    fn test_parsed_url() {
        let tab = TabStateRecord::new("https://example.com/path?q=1", "");
        let url = tab.parsed_url().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));

        let relative = TabStateRecord::new("not a url", "");
        assert!(relative.parsed_url().is_none());
    }
}
