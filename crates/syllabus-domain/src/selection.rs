//! Selection module - the focused concept across re-renders
//!
//! Invariant: the stored name is always either absent or present in the
//! curriculum it was last validated against. Anything that fails
//! validation clears the slot rather than keeping stale data.

use crate::{ClickEvent, Curriculum};

/// Outcome of applying an input to the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// Selection left as it was
    Unchanged,

    /// A concept was selected
    Selected(String),

    /// The selection was cleared
    Cleared,
}

/// Session-scoped selection slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<String>,
    last_click: Option<String>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused concept name
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Clear the selection
    pub fn clear(&mut self) -> SelectionChange {
        if self.current.take().is_some() {
            SelectionChange::Cleared
        } else {
            SelectionChange::Unchanged
        }
    }

    /// Select `name` if it resolves in `curriculum`; otherwise clear
    ///
    /// This is a direct selection, so the click memory is forgotten and the
    /// next click is honoured even if it repeats an earlier one.
    pub fn set(&mut self, name: &str, curriculum: &Curriculum) -> SelectionChange {
        self.last_click = None;
        self.resolve(name, curriculum)
    }

    fn resolve(&mut self, name: &str, curriculum: &Curriculum) -> SelectionChange {
        if !curriculum.contains(name) {
            return self.clear();
        }
        if self.current.as_deref() == Some(name) {
            return SelectionChange::Unchanged;
        }
        self.current = Some(name.to_string());
        SelectionChange::Selected(name.to_string())
    }

    /// Apply a decoded click
    ///
    /// A click identical to the previous one is ignored, so a widget that
    /// re-sends its last value on every render does not count as a new
    /// click. Clicks
    /// on domain or strand nodes leave the selection alone, as does an
    /// empty event. A concept click that does not resolve clears it, and so
    /// does an unrecognized payload.
    pub fn apply_click(&mut self, click: &ClickEvent, curriculum: &Curriculum) -> SelectionChange {
        if matches!(click, ClickEvent::Invalid) {
            return self.clear();
        }
        let id = match click.first_id() {
            Some(id) => id,
            None => return SelectionChange::Unchanged,
        };
        if self.last_click.as_deref() == Some(id) {
            return SelectionChange::Unchanged;
        }
        self.last_click = Some(id.to_string());

        match click.concept_name() {
            Some(name) => self.resolve(name, curriculum),
            None => SelectionChange::Unchanged,
        }
    }

    /// Re-validate after the active grade changed
    ///
    /// The click memory is reset too, since it refers to the old graph.
    pub fn on_grade_switch(&mut self, curriculum: &Curriculum) -> SelectionChange {
        self.last_click = None;
        match self.current.as_deref() {
            Some(name) if !curriculum.contains(name) => self.clear(),
            _ => SelectionChange::Unchanged,
        }
    }
}
