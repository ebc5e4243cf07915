//! The edit command interpreter.
//!
//! An [`Editor`] owns one document: its [`Buffer`], its [`History`], and its
//! [`EditorOptions`]. The host feeds it one [`Intent`] at a time together with
//! the current [`SelectionState`]; the editor turns that into buffer
//! operations, records the resulting [`Change`]s, and reports back where the
//! caret belongs and which lines changed.
//!
//! # Intent handling
//!
//! - **Insert family** (`InsertChars`, `InsertNewline`, `PasteText`): a
//!   non-collapsed selection is removed first as its own change, then the
//!   text goes in at the selection start. Typing over a selection therefore
//!   leaves two history entries, and a single undo only takes back the insert.
//! - **Delete family**: a non-collapsed selection is removed whichever
//!   direction was asked for; otherwise one character (or line break) before
//!   or after the caret.
//! - **Undo / Redo**: replay the inverse (or the change itself) through the
//!   same buffer calls, without recording anything new.
//!
//! # Outcomes
//!
//! Every call ends in one of three ways:
//!
//! - `Ok(Outcome::Applied(_))`: the buffer changed.
//! - `Ok(Outcome::Rejected(_))`: nothing happened, by rule (multi-range
//!   selection, zero-length delete, empty undo/redo stack).
//! - `Err(EditError)`: the caller handed over a location that doesn't exist.
//!
//! Rejections and errors are both decided before the first mutation, so
//! either way buffer and history are exactly as they were.

use std::borrow::Cow;
use std::fmt;

use tracing::{debug, warn};

use crate::buffer::Buffer;
use crate::change::Change;
use crate::error::{EditError, Result};
use crate::history::History;
use crate::intent::Intent;
use crate::options::EditorOptions;
use crate::position::{Position, Range};
use crate::render::RenderEvent;
use crate::selection::{SelectionState, ViewSelection};
use crate::view::Resolve;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Why an intent was turned away without touching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The host reported more than one selection range.
    MultiRange,
    /// The edit would not change the buffer (e.g. backspace at the very
    /// start of the document).
    NoOpEdit,
    /// Undo with an empty undo stack.
    NothingToUndo,
    /// Redo with an empty redo stack.
    NothingToRedo,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MultiRange => "multiple selection ranges are not supported",
            Self::NoOpEdit => "edit has no effect",
            Self::NothingToUndo => "nothing to undo",
            Self::NothingToRedo => "nothing to redo",
        })
    }
}

/// What a successful intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Where the caret belongs now: end of the insert, or start of the
    /// removed range.
    pub caret: Position,
    /// Line-level diff, in order. See [`RenderEvent`].
    pub events: Vec<RenderEvent>,
    /// How many changes were recorded in history (0 for undo/redo, 2 for
    /// typing over a selection).
    pub recorded: usize,
}

/// Result of a well-formed intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Applied),
    Rejected(Rejection),
}

impl Outcome {
    #[inline]
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The new caret, if the intent was applied.
    #[must_use]
    pub const fn caret(&self) -> Option<Position> {
        match self {
            Self::Applied(applied) => Some(applied.caret),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// One document being edited.
#[derive(Debug, Clone)]
pub struct Editor {
    buffer: Buffer,
    history: History,
    options: EditorOptions,
    /// Caret reported by the last applied intent.
    caret: Position,
}

impl Editor {
    // -- Construction -------------------------------------------------------

    /// An empty document with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// An empty document with the given options.
    #[must_use]
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            buffer: Buffer::new(),
            history: History::with_limit(options.undo_levels),
            options,
            caret: Position::ZERO,
        }
    }

    /// A document holding `text`, with default options.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with(text, EditorOptions::default())
    }

    /// A document holding `text`. Line breaks in `text` follow the same
    /// normalization rule as inserted text.
    #[must_use]
    pub fn from_text_with(text: &str, options: EditorOptions) -> Self {
        let text = normalize(text, options.normalize_line_breaks);
        Self {
            buffer: Buffer::from_text(&text),
            ..Self::with_options(options)
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Caret left behind by the most recent applied intent.
    #[inline]
    #[must_use]
    pub const fn caret(&self) -> Position {
        self.caret
    }

    /// The document as a single string, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.contents()
    }

    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    #[inline]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[inline]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -- Intent dispatch ----------------------------------------------------

    /// Handle one intent against the given selection.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] if an endpoint of `selection` is not a
    /// position in the buffer. Nothing is modified in that case.
    pub fn apply(&mut self, intent: &Intent, selection: &SelectionState) -> Result<Outcome> {
        let kind = intent.kind();

        if selection.is_multi_range() {
            debug!(intent = %kind, ranges = selection.range_count, "multi-range selection rejected");
            return Ok(Outcome::Rejected(Rejection::MultiRange));
        }

        let result = match intent {
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),
            Intent::DeleteBackward => self.delete(selection, -1),
            Intent::DeleteForward => self.delete(selection, 1),
            Intent::InsertChars(_) | Intent::InsertNewline | Intent::PasteText(_) => {
                self.insert(intent.insert_text().unwrap_or_default(), selection)
            }
        };

        match &result {
            Ok(Outcome::Applied(applied)) => {
                self.caret = applied.caret;
                debug!(
                    intent = %kind,
                    caret = %applied.caret,
                    recorded = applied.recorded,
                    lines = applied.events.len(),
                    "intent applied"
                );
            }
            Ok(Outcome::Rejected(reason)) => {
                debug!(intent = %kind, %reason, "intent rejected");
            }
            Err(err) => {
                warn!(intent = %kind, error = %err, "intent failed");
            }
        }
        result
    }

    /// Handle one intent against a selection expressed in view coordinates,
    /// resolving both ends through `resolver` first.
    ///
    /// Multi-range selections and undo/redo don't look at the endpoints, so
    /// they are never resolved for those.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] if `resolver` doesn't know a location or a
    /// resolved position doesn't fit the buffer.
    pub fn apply_at<L, R>(
        &mut self,
        intent: &Intent,
        selection: &ViewSelection<L>,
        resolver: &R,
    ) -> Result<Outcome>
    where
        R: Resolve<L> + ?Sized,
    {
        let state = if selection.range_count > 1 || matches!(intent, Intent::Undo | Intent::Redo) {
            SelectionState::caret(self.caret)
        } else {
            let unresolved = |err: &EditError| {
                warn!(intent = %intent.kind(), error = %err, "view location did not resolve");
            };
            let anchor = resolver.resolve(&selection.anchor).inspect_err(unresolved)?;
            let focus = resolver.resolve(&selection.focus).inspect_err(unresolved)?;
            SelectionState::span(anchor, focus)
        };
        self.apply(intent, &state.with_range_count(selection.range_count))
    }

    // -- Insert family ------------------------------------------------------

    fn insert(&mut self, text: &str, selection: &SelectionState) -> Result<Outcome> {
        let range = self.checked_range(selection)?;
        let text = normalize(text, self.options.normalize_line_breaks);

        if range.is_empty() && text.is_empty() {
            return Ok(Outcome::Rejected(Rejection::NoOpEdit));
        }

        let mut recorded = 0;
        if !range.is_empty() {
            self.remove_recorded(range)?;
            recorded += 1;
        }

        let at = range.start;
        let caret = if text.is_empty() {
            at
        } else {
            let end = self.buffer.insert(at, &text)?;
            self.history.push(Change::insert(at, text));
            recorded += 1;
            end
        };

        Ok(self.applied(caret, recorded))
    }

    // -- Delete family ------------------------------------------------------

    /// `direction` is -1 for backward, +1 for forward.
    fn delete(&mut self, selection: &SelectionState, direction: isize) -> Result<Outcome> {
        let range = self.checked_range(selection)?;

        let target = if !range.is_empty() {
            range
        } else {
            let caret = range.start;
            let other = caret.step(&self.buffer, direction)?;
            Range::ordered(caret, other)
        };

        if target.is_empty() {
            return Ok(Outcome::Rejected(Rejection::NoOpEdit));
        }

        self.remove_recorded(target)?;
        Ok(self.applied(target.start, 1))
    }

    /// Capture, remove, and record `range`.
    fn remove_recorded(&mut self, range: Range) -> Result<()> {
        let text = self.buffer.text(range.start, range.end)?;
        self.buffer.remove(range.start, range.end)?;
        self.history.push(Change::remove(range.start, text));
        Ok(())
    }

    // -- History ------------------------------------------------------------

    fn undo(&mut self) -> Result<Outcome> {
        let Some(change) = self.history.undo() else {
            return Ok(Outcome::Rejected(Rejection::NothingToUndo));
        };

        match change.invert().apply(&mut self.buffer) {
            Ok(caret) => Ok(self.applied(caret, 0)),
            Err(err) => {
                // Put the change back where it was.
                self.history.redo();
                self.buffer.discard_events();
                Err(err)
            }
        }
    }

    fn redo(&mut self) -> Result<Outcome> {
        let Some(change) = self.history.redo() else {
            return Ok(Outcome::Rejected(Rejection::NothingToRedo));
        };

        match change.apply(&mut self.buffer) {
            Ok(caret) => Ok(self.applied(caret, 0)),
            Err(err) => {
                self.history.undo();
                self.buffer.discard_events();
                Err(err)
            }
        }
    }

    // -- Helpers ------------------------------------------------------------

    /// The selection as an ordered range, with both ends checked against the
    /// buffer.
    fn checked_range(&self, selection: &SelectionState) -> Result<Range> {
        self.buffer.check(selection.anchor)?;
        self.buffer.check(selection.focus)?;
        Ok(selection.range())
    }

    fn applied(&mut self, caret: Position, recorded: usize) -> Outcome {
        Outcome::Applied(Applied {
            caret,
            events: self.buffer.take_events(),
            recorded,
        })
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the line-break policy to incoming text.
fn normalize(text: &str, enabled: bool) -> Cow<'_, str> {
    if enabled && text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
