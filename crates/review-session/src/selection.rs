//! Which risk, if any, the reviewer has selected.

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Selection {
    #[default]
    Idle,
    Selected(usize),
}

impl Selection {
    pub fn index(self) -> Option<usize> {
        match self {
            Selection::Idle => None,
            Selection::Selected(index) => Some(index),
        }
    }

    pub fn is_selected(self, index: usize) -> bool {
        self == Selection::Selected(index)
    }
}

/// Outcome of a click, so callers know whether to run side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Unchanged,
    Selected(usize),
    Cleared,
}

/// Single-value selection store that any number of views can subscribe to.
///
/// Clicking a highlighted span always leaves that risk selected. Clicking a
/// risk list entry toggles it.
#[derive(Debug)]
pub struct SelectionStore {
    tx: watch::Sender<Selection>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Selection::Idle);
        Self { tx }
    }

    pub fn current(&self) -> Selection {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.tx.subscribe()
    }

    /// A highlighted span for risk `index` was clicked.
    pub fn click_highlight(&self, index: usize) -> SelectionChange {
        if self.current().is_selected(index) {
            return SelectionChange::Unchanged;
        }
        self.set(Selection::Selected(index));
        SelectionChange::Selected(index)
    }

    /// The risk list entry `index` was clicked.
    pub fn click_list(&self, index: usize) -> SelectionChange {
        if self.current().is_selected(index) {
            self.set(Selection::Idle);
            SelectionChange::Cleared
        } else {
            self.set(Selection::Selected(index));
            SelectionChange::Selected(index)
        }
    }

    pub fn reset(&self) {
        if self.current() != Selection::Idle {
            self.set(Selection::Idle);
        }
    }

    fn set(&self, selection: Selection) {
        tracing::debug!(?selection, "selection changed");
        self.tx.send_replace(selection);
    }
}
