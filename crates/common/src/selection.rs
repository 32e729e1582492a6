//! # Selection State
//!
//! One optional selected-building id with a single mutation path. The map,
//! the info panel, and the editor all read this one value; none of them keep
//! a private copy.

/// The currently selected building, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Drop the selection unless `keep` accepts the selected id. Called after
    /// collection replacement so the selection never points at a stale entity.
    pub fn prune(&mut self, keep: impl Fn(&str) -> bool) {
        if let Some(id) = &self.selected {
            if !keep(id) {
                self.selected = None;
            }
        }
    }
}
