//! Undo/redo history — a linear log of [`Change`]s.
//!
//! Two stacks: `past` holds applied changes oldest-first, `future` holds
//! undone changes with the most recently undone on top. Every change is its
//! own undo step; there is no grouping.
//!
//! The history never touches a buffer. [`History::undo`] hands back the change
//! to be reverted and the caller applies its inverse; [`History::redo`] hands
//! back the change to be replayed as-is.
//!
//! Branching is not supported — any new push after an undo discards the
//! forward history.

use tracing::debug;

use crate::change::Change;

/// Undo/redo history for one document.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Change>,
    future: Vec<Change>,
    /// Maximum depth of `past`. `None` keeps everything.
    limit: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` undo steps. The
    /// oldest change is forgotten once the limit is exceeded.
    #[must_use]
    pub const fn with_limit(limit: Option<usize>) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit,
        }
    }

    /// The configured depth limit.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a freshly applied change. Clears the redo stack.
    pub fn push(&mut self, change: Change) {
        self.future.clear();
        self.past.push(change);

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let dropped = self.past.len() - limit;
                self.past.drain(..dropped);
                debug!(dropped, limit, "history limit reached");
            }
        }
    }

    /// Move the most recent change onto the redo stack and return it. The
    /// caller applies its inverse. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Change> {
        let change = self.past.pop()?;
        self.future.push(change.clone());
        Some(change)
    }

    /// Move the most recently undone change back onto the undo stack and
    /// return it, not inverted. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Change> {
        let change = self.future.pop()?;
        self.past.push(change.clone());
        Some(change)
    }

    /// True if there are changes that can be undone.
    #[inline]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// True if there are changes that can be redone.
    #[inline]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of changes on the undo stack.
    #[inline]
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Number of changes on the redo stack.
    #[inline]
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// Applied changes, oldest first.
    #[inline]
    #[must_use]
    pub fn past(&self) -> &[Change] {
        &self.past
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
