//! Text buffer — the ordered sequence of lines being edited.
//!
//! A `Buffer` owns a `Vec<String>` where each element is one line without its
//! line break. Lines are replaced wholesale on every edit; nothing outside this
//! module ever mutates a line in place.
//!
//! # Design choices
//!
//! - **Never empty.** An empty document is one empty line, never zero lines.
//!   Every constructor and every edit preserves this.
//!
//! - **Offsets are char offsets**, not byte offsets. Offset 3 of `"café"` is
//!   `'é'`, not a byte in the middle of its UTF-8 encoding. Byte indices are
//!   computed locally and never leak into the public API.
//!
//! - **`\n` is the only line break.** Inserted text is split on `\n`;
//!   extracted multi-line text is joined with `\n`. Callers that accept other
//!   conventions normalize before calling in (see
//!   [`EditorOptions::normalize_line_breaks`](crate::options::EditorOptions)).
//!
//! - **Every mutation journals render events.** The journal is drained by the
//!   editor after each intent with [`take_events`](Buffer::take_events).
//!
//! - **No undo/redo here.** Edit history is a separate concern that records
//!   the [`Change`](crate::change::Change)s built around these calls.

use tracing::trace;

use crate::error::{EditError, Result};
use crate::position::Position;
use crate::render::RenderEvent;

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A line-addressed text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
    journal: Vec<RenderEvent>,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create a buffer holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            journal: Vec::new(),
        }
    }

    /// Create a buffer from text, splitting on `\n`.
    ///
    /// A trailing `\n` produces a trailing empty line, exactly as inserting
    /// the same text into an empty buffer would.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(str::to_string))
    }

    /// Create a buffer from already-split lines. An empty iterator yields the
    /// single empty line.
    ///
    /// Lines must not contain `\n`.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = String>) -> Self {
        let mut lines: Vec<String> = lines.into_iter().collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        debug_assert!(lines.iter().all(|l| !l.contains('\n')));
        Self {
            lines,
            journal: Vec::new(),
        }
    }

    // -- Text access --------------------------------------------------------

    /// Number of lines. Always at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `index`, without a line break.
    #[inline]
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Length of the line at `index` in chars.
    #[inline]
    #[must_use]
    pub fn line_len(&self, index: usize) -> Option<usize> {
        self.line(index).map(|l| l.chars().count())
    }

    /// All lines, in order.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole document joined with `\n`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the document is the single empty line.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// The position just past the last character of the document.
    #[must_use]
    pub fn end(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.lines[last].chars().count())
    }

    /// Verify that `pos` addresses a slot in this buffer, returning the char
    /// length of its line.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] if the line doesn't exist or the offset is
    /// past the end of the line.
    pub fn check(&self, pos: Position) -> Result<usize> {
        match self.line_len(pos.line) {
            Some(len) if pos.offset <= len => Ok(len),
            _ => Err(EditError::OutOfBounds(pos.into())),
        }
    }

    /// Check both endpoints and their order.
    fn check_range(&self, from: Position, to: Position) -> Result<()> {
        self.check(from)?;
        self.check(to)?;
        if from > to {
            return Err(EditError::InvalidRange { from, to });
        }
        Ok(())
    }

    /// The text between `from` and `to`, with line breaks as `\n`.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] for an endpoint outside the buffer,
    /// [`EditError::InvalidRange`] if `from` comes after `to`.
    pub fn text(&self, from: Position, to: Position) -> Result<String> {
        self.check_range(from, to)?;

        let first = &self.lines[from.line];
        if from.line == to.line {
            let start = byte_index(first, from.offset);
            let end = byte_index(first, to.offset);
            return Ok(first[start..end].to_string());
        }

        let mut out = String::new();
        out.push_str(&first[byte_index(first, from.offset)..]);
        for line in &self.lines[from.line + 1..to.line] {
            out.push('\n');
            out.push_str(line);
        }
        let last = &self.lines[to.line];
        out.push('\n');
        out.push_str(&last[..byte_index(last, to.offset)]);
        Ok(out)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `pos`, returning the position just past it.
    ///
    /// `text` is split on `\n`. A single segment is spliced into the current
    /// line. Otherwise the line is split at `pos`: the first segment ends the
    /// head, interior segments become whole new lines, and the last segment is
    /// joined with the old tail to form the final line.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] if `pos` is not in the buffer.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<Position> {
        self.check(pos)?;
        trace!(%pos, len = text.len(), "buffer insert");

        let segments: Vec<&str> = text.split('\n').collect();
        let line = &mut self.lines[pos.line];
        let at = byte_index(line, pos.offset);

        if let [only] = segments.as_slice() {
            line.insert_str(at, only);
            let replaced = line.clone();
            self.journal.push(RenderEvent::LineReplaced {
                index: pos.line,
                text: replaced,
            });
            return Ok(Position::new(pos.line, pos.offset + only.chars().count()));
        }

        let tail = line.split_off(at);
        line.push_str(segments[0]);
        let head = line.clone();
        self.journal.push(RenderEvent::LineReplaced {
            index: pos.line,
            text: head,
        });

        let last = segments[segments.len() - 1];
        let mut new_lines: Vec<String> = segments[1..segments.len() - 1]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        new_lines.push(format!("{last}{tail}"));

        for (i, text) in new_lines.iter().enumerate() {
            self.journal.push(RenderEvent::LineInserted {
                index: pos.line + 1 + i,
                text: text.clone(),
            });
        }
        let inserted = new_lines.len();
        self.lines.splice(pos.line + 1..pos.line + 1, new_lines);

        Ok(Position::new(pos.line + inserted, last.chars().count()))
    }

    /// Remove the text between `from` and `to`.
    ///
    /// The prefix of `from`'s line and the suffix of `to`'s line are joined
    /// into a single line at `from.line`; every line after it up to and
    /// including the old `to.line` is dropped. With `from == to` the content
    /// is unchanged, though the line is still reported as replaced.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] for an endpoint outside the buffer,
    /// [`EditError::InvalidRange`] if `from` comes after `to`.
    pub fn remove(&mut self, from: Position, to: Position) -> Result<()> {
        self.check_range(from, to)?;
        trace!(%from, %to, "buffer remove");

        let suffix = {
            let last = &self.lines[to.line];
            last[byte_index(last, to.offset)..].to_string()
        };
        let line = &mut self.lines[from.line];
        line.truncate(byte_index(line, from.offset));
        line.push_str(&suffix);
        let joined = line.clone();

        self.lines.drain(from.line + 1..=to.line);

        self.journal.push(RenderEvent::LineReplaced {
            index: from.line,
            text: joined,
        });
        for _ in from.line..to.line {
            self.journal.push(RenderEvent::LineRemoved { index: from.line + 1 });
        }
        Ok(())
    }

    // -- Render journal -----------------------------------------------------

    /// Drain the render events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Drop any recorded render events.
    pub fn discard_events(&mut self) {
        self.journal.clear();
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Byte index of char `offset` in `line`. An offset at (or past) the end maps
/// to `line.len()`.
fn byte_index(line: &str, offset: usize) -> usize {
    line.char_indices().nth(offset).map_or(line.len(), |(i, _)| i)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buf(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines.iter().map(|l| (*l).to_string()))
    }

    fn lines_of(b: &Buffer) -> Vec<&str> {
        b.lines().iter().map(String::as_str).collect()
    }

    /// Replay the drained journal over `before` and check it matches `b`.
    fn assert_journal_reproduces(before: &[&str], b: &mut Buffer) {
        let mut view: Vec<String> = before.iter().map(|l| (*l).to_string()).collect();
        for event in b.take_events() {
            event.apply_to(&mut view);
        }
        assert_eq!(view, b.lines().to_vec());
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_is_one_empty_line() {
        let b = Buffer::new();
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), Some(""));
        assert!(b.is_empty());
    }

    #[test]
    fn from_text_splits_on_newline() {
        let b = Buffer::from_text("hello\nworld\n");
        assert_eq!(lines_of(&b), vec!["hello", "world", ""]);
        assert_eq!(b.contents(), "hello\nworld\n");
    }

    #[test]
    fn from_lines_never_empty() {
        let b = Buffer::from_lines(Vec::new());
        assert_eq!(lines_of(&b), vec![""]);
    }

    #[test]
    fn end_is_past_last_char() {
        assert_eq!(buf(&["ab", "héllo"]).end(), Position::new(1, 5));
        assert_eq!(Buffer::new().end(), Position::ZERO);
    }

    // -- check --------------------------------------------------------------

    #[test]
    fn check_accepts_end_of_line() {
        let b = buf(&["abc"]);
        assert_eq!(b.check(Position::new(0, 3)), Ok(3));
    }

    #[test]
    fn check_rejects_past_end_and_missing_line() {
        let b = buf(&["abc"]);
        assert_eq!(
            b.check(Position::new(0, 4)),
            Err(EditError::OutOfBounds(Position::new(0, 4).into()))
        );
        assert_eq!(
            b.check(Position::new(1, 0)),
            Err(EditError::OutOfBounds(Position::new(1, 0).into()))
        );
    }

    // -- text ---------------------------------------------------------------

    #[test]
    fn text_same_line() {
        let b = buf(&["hello world"]);
        assert_eq!(b.text(Position::new(0, 6), Position::new(0, 11)).unwrap(), "world");
        assert_eq!(b.text(Position::new(0, 3), Position::new(0, 3)).unwrap(), "");
    }

    #[test]
    fn text_multi_line() {
        let b = buf(&["one", "two", "three"]);
        assert_eq!(
            b.text(Position::new(0, 1), Position::new(2, 2)).unwrap(),
            "ne\ntwo\nth"
        );
        assert_eq!(b.text(Position::new(0, 3), Position::new(1, 0)).unwrap(), "\n");
    }

    #[test]
    fn text_counts_chars() {
        let b = buf(&["naïve café"]);
        assert_eq!(b.text(Position::new(0, 2), Position::new(0, 5)).unwrap(), "ïve");
    }

    #[test]
    fn text_rejects_reversed_range() {
        let b = buf(&["abc", "def"]);
        assert_eq!(
            b.text(Position::new(1, 0), Position::new(0, 2)),
            Err(EditError::InvalidRange {
                from: Position::new(1, 0),
                to: Position::new(0, 2),
            })
        );
    }

    #[test]
    fn text_rejects_out_of_bounds() {
        let b = buf(&["abc"]);
        assert_eq!(
            b.text(Position::new(0, 0), Position::new(0, 9)),
            Err(EditError::OutOfBounds(Position::new(0, 9).into()))
        );
    }

    // -- insert -------------------------------------------------------------

    #[test]
    fn insert_single_segment() {
        let mut b = buf(&["held"]);
        let end = b.insert(Position::new(0, 3), "lo wor").unwrap();
        assert_eq!(lines_of(&b), vec!["hello word"]);
        assert_eq!(end, Position::new(0, 9));
        assert_journal_reproduces(&["held"], &mut b);
    }

    #[test]
    fn insert_newline_splits_line() {
        let mut b = buf(&["helloworld"]);
        let end = b.insert(Position::new(0, 5), "\n").unwrap();
        assert_eq!(lines_of(&b), vec!["hello", "world"]);
        assert_eq!(end, Position::new(1, 0));
        assert_journal_reproduces(&["helloworld"], &mut b);
    }

    #[test]
    fn insert_multi_segment_then_remove_restores() {
        let mut b = buf(&["hello", "world"]);
        let end = b.insert(Position::new(0, 5), "\n!!").unwrap();
        assert_eq!(lines_of(&b), vec!["hello", "!!", "world"]);
        assert_eq!(end, Position::new(1, 2));

        b.remove(Position::new(0, 5), end).unwrap();
        assert_eq!(lines_of(&b), vec!["hello", "world"]);
    }

    #[test]
    fn insert_many_lines_mid_line() {
        let mut b = buf(&["aZ", "tail"]);
        let end = b.insert(Position::new(0, 1), "1\n2\n3\n4").unwrap();
        assert_eq!(lines_of(&b), vec!["a1", "2", "3", "4Z", "tail"]);
        assert_eq!(end, Position::new(3, 1));
        assert_journal_reproduces(&["aZ", "tail"], &mut b);
    }

    #[test]
    fn insert_out_of_bounds_leaves_buffer_alone() {
        let mut b = buf(&["abc"]);
        assert_eq!(
            b.insert(Position::new(0, 4), "x"),
            Err(EditError::OutOfBounds(Position::new(0, 4).into()))
        );
        assert_eq!(lines_of(&b), vec!["abc"]);
        assert!(b.take_events().is_empty());
    }

    // -- remove -------------------------------------------------------------

    #[test]
    fn remove_within_line() {
        let mut b = buf(&["abc"]);
        b.remove(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert_eq!(lines_of(&b), vec!["ac"]);
        assert_journal_reproduces(&["abc"], &mut b);
    }

    #[test]
    fn remove_joins_lines() {
        let mut b = buf(&["one", "two", "three", "four"]);
        b.remove(Position::new(0, 2), Position::new(2, 3)).unwrap();
        assert_eq!(lines_of(&b), vec!["onee", "four"]);
        assert_journal_reproduces(&["one", "two", "three", "four"], &mut b);
    }

    #[test]
    fn remove_line_break_only() {
        let mut b = buf(&["ab", "cd"]);
        b.remove(Position::new(0, 2), Position::new(1, 0)).unwrap();
        assert_eq!(lines_of(&b), vec!["abcd"]);
    }

    #[test]
    fn remove_everything_leaves_one_empty_line() {
        let mut b = buf(&["ab", "cd"]);
        let end = b.end();
        b.remove(Position::ZERO, end).unwrap();
        assert_eq!(lines_of(&b), vec![""]);
        assert!(b.is_empty());
    }

    #[test]
    fn remove_empty_range_keeps_content() {
        let mut b = buf(&["abc"]);
        b.remove(Position::new(0, 1), Position::new(0, 1)).unwrap();
        assert_eq!(lines_of(&b), vec!["abc"]);
    }

    #[test]
    fn remove_rejects_reversed_range() {
        let mut b = buf(&["abc"]);
        assert!(matches!(
            b.remove(Position::new(0, 2), Position::new(0, 1)),
            Err(EditError::InvalidRange { .. })
        ));
        assert_eq!(lines_of(&b), vec!["abc"]);
    }

    #[test]
    fn remove_multibyte() {
        let mut b = buf(&["日本語テキスト"]);
        b.remove(Position::new(0, 1), Position::new(0, 3)).unwrap();
        assert_eq!(lines_of(&b), vec!["日テキスト"]);
    }

    // -- Journal ------------------------------------------------------------

    #[test]
    fn take_events_drains() {
        let mut b = buf(&["x"]);
        b.insert(Position::ZERO, "a\nb").unwrap();
        assert_eq!(
            b.take_events(),
            vec![
                RenderEvent::LineReplaced { index: 0, text: "a".into() },
                RenderEvent::LineInserted { index: 1, text: "bx".into() },
            ]
        );
        assert!(b.take_events().is_empty());
    }

    #[test]
    fn remove_reports_replaced_then_removed() {
        let mut b = buf(&["a", "b", "c"]);
        b.remove(Position::new(0, 1), Position::new(2, 0)).unwrap();
        assert_eq!(
            b.take_events(),
            vec![
                RenderEvent::LineReplaced { index: 0, text: "ac".into() },
                RenderEvent::LineRemoved { index: 1 },
                RenderEvent::LineRemoved { index: 1 },
            ]
        );
    }
}
