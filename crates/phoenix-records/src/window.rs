//! Window state record

use serde::Serialize;

use crate::blob::OpaqueBlob;
use crate::tab::TabStateRecord;

/// One saved browser window.
///
/// Always holds at least one tab, `current_tab_index()` is always a valid
/// index into `tabs()`, and exactly the tab at that index reports
/// `is_current_in_window()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStateRecord {
    current_tab_index: usize,
    /// Placement/size state, passed through unmodified
    geometry: OpaqueBlob,
    /// Tabs in display order
    tabs: Vec<TabStateRecord>,
}

impl WindowStateRecord {
    /// Build a window from decoded parts.
    ///
    /// Returns `None` when `tabs` is empty. An out-of-range
    /// `current_tab_index` is clamped into the tab list.
    pub fn new(
        current_tab_index: i64,
        geometry: OpaqueBlob,
        mut tabs: Vec<TabStateRecord>,
    ) -> Option<Self> {
        if tabs.is_empty() {
            return None;
        }

        let last = tabs.len() - 1;
        let clamped = if current_tab_index < 0 {
            0
        } else {
            usize::try_from(current_tab_index).map_or(last, |index| index.min(last))
        };

        if i64::try_from(clamped).ok() != Some(current_tab_index) {
            tracing::warn!(
                stored = current_tab_index,
                clamped,
                tab_count = tabs.len(),
                "Current tab index out of range"
            );
        }

        for (index, tab) in tabs.iter_mut().enumerate() {
            tab.set_current(index == clamped);
        }

        Some(Self {
            current_tab_index: clamped,
            geometry,
            tabs,
        })
    }

    pub fn current_tab_index(&self) -> usize {
        self.current_tab_index
    }

    pub fn current_tab(&self) -> &TabStateRecord {
        &self.tabs[self.current_tab_index]
    }

    pub fn geometry(&self) -> &OpaqueBlob {
        &self.geometry
    }

    pub fn tabs(&self) -> &[TabStateRecord] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn pinned_count(&self) -> usize {
        self.tabs.iter().filter(|tab| tab.is_pinned()).count()
    }
}
