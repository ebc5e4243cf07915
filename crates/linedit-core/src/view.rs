//! View-side addressing: line containers and their resolution.
//!
//! A host presentation usually knows the caret as "offset N inside *that*
//! line element", not as a line number. [`Resolve`] is the callback that turns
//! such a location into a buffer [`Position`]. The engine never stores view
//! objects; it only asks the host to resolve.
//!
//! [`LineMirror`] is a ready-made host model: it gives every line a stable
//! [`LineId`], keeps itself in sync from [`RenderEvent`]s, and resolves
//! [`ViewLocation`]s by finding the id's current index. A replaced line keeps
//! its id (the container survives, its text changes); an inserted line gets a
//! fresh one; a removed line's id is retired and fails to resolve from then
//! on.

use std::fmt;

use crate::buffer::Buffer;
use crate::error::{EditError, Result};
use crate::position::Position;
use crate::render::{RenderEvent, RenderSink};

// ---------------------------------------------------------------------------
// LineId / ViewLocation
// ---------------------------------------------------------------------------

/// Identity of one line container in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A caret location as a view reports it: a line container and a char offset
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewLocation {
    pub line: LineId,
    pub offset: usize,
}

impl ViewLocation {
    #[inline]
    #[must_use]
    pub const fn new(line: LineId, offset: usize) -> Self {
        Self { line, offset }
    }
}

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

/// Host callback mapping a view location `L` to a buffer position.
///
/// Implementations only translate; the editor checks the result against the
/// buffer afterwards.
pub trait Resolve<L> {
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`] when the location doesn't refer to a
    /// current line.
    fn resolve(&self, location: &L) -> Result<Position>;
}

/// Positions resolve to themselves. Handy when the host already speaks
/// buffer coordinates.
impl Resolve<Position> for Buffer {
    fn resolve(&self, location: &Position) -> Result<Position> {
        self.check(*location)?;
        Ok(*location)
    }
}

// ---------------------------------------------------------------------------
// LineMirror
// ---------------------------------------------------------------------------

/// A view model of the buffer: one id and one string per line.
#[derive(Debug, Clone)]
pub struct LineMirror {
    ids: Vec<LineId>,
    texts: Vec<String>,
    next_id: u64,
}

impl LineMirror {
    /// Mirror the current contents of `buf`, numbering lines from `#0`.
    #[must_use]
    pub fn new(buf: &Buffer) -> Self {
        let texts = buf.lines().to_vec();
        let ids = (0..texts.len() as u64).map(LineId).collect();
        Self {
            ids,
            next_id: texts.len() as u64,
            texts,
        }
    }

    /// Number of mirrored lines.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.ids.len()
    }

    /// Mirrored line texts.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.texts
    }

    /// The container id of the line at `index`.
    #[inline]
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<LineId> {
        self.ids.get(index).copied()
    }

    /// The current index of container `id`.
    #[must_use]
    pub fn index_of(&self, id: LineId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    /// The view location for a buffer position, if its line is mirrored.
    #[must_use]
    pub fn location(&self, pos: Position) -> Option<ViewLocation> {
        self.id_at(pos.line).map(|id| ViewLocation::new(id, pos.offset))
    }

    fn fresh_id(&mut self) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl RenderSink for LineMirror {
    fn render(&mut self, event: &RenderEvent) {
        // Texts follow the event as-is; ids are kept parallel to them.
        match event {
            RenderEvent::LineReplaced { .. } => {}
            RenderEvent::LineInserted { index, .. } => {
                if *index <= self.ids.len() {
                    let id = self.fresh_id();
                    self.ids.insert(*index, id);
                }
            }
            RenderEvent::LineRemoved { index } => {
                if *index < self.ids.len() {
                    self.ids.remove(*index);
                }
            }
        }
        event.apply_to(&mut self.texts);
    }
}

impl Resolve<ViewLocation> for LineMirror {
    fn resolve(&self, location: &ViewLocation) -> Result<Position> {
        let line = self
            .index_of(location.line)
            .ok_or_else(|| EditError::OutOfBounds(location.line.into()))?;
        Ok(Position::new(line, location.offset))
    }
}
