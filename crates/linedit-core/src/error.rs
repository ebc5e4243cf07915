//! Contract-violation errors.
//!
//! These are the *hard* failures: a caller handed the engine a location or
//! range that does not exist in the current buffer. They abort the intent and
//! propagate to the host unchanged.
//!
//! Soft conditions (multi-range selection, zero-length delete, empty undo
//! stack) are not errors. They come back from [`Editor::apply`] as
//! [`Outcome::Rejected`] so the host can tell "nothing happened" apart from
//! both success and failure.
//!
//! [`Editor::apply`]: crate::editor::Editor::apply
//! [`Outcome::Rejected`]: crate::editor::Outcome::Rejected

use std::fmt;

use thiserror::Error;

use crate::position::Position;
use crate::view::LineId;

/// What an out-of-bounds error points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// A buffer position: a missing line, or an offset past the end of its
    /// line.
    Position(Position),
    /// A view line container that is not (or is no longer) a line of the
    /// buffer.
    Line(LineId),
}

impl From<Position> for Location {
    fn from(pos: Position) -> Self {
        Self::Position(pos)
    }
}

impl From<LineId> for Location {
    fn from(id: LineId) -> Self {
        Self::Line(id)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(pos) => write!(f, "position {pos}"),
            Self::Line(id) => write!(f, "view line {id}"),
        }
    }
}

/// A failed engine call. Every variant means the caller broke a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// The location doesn't exist in the current buffer.
    #[error("{0} is outside the buffer")]
    OutOfBounds(Location),

    /// A range whose start comes after its end.
    #[error("invalid range: {from} is after {to}")]
    InvalidRange { from: Position, to: Position },
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, EditError>;
