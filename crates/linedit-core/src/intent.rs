//! Editing intents — what the host wants done.
//!
//! The host maps its raw input (keys, clipboard, menu actions) onto one of
//! these before calling [`Editor::apply`](crate::editor::Editor::apply).

use std::fmt;

/// A high-level editing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Typed characters. May contain `\n`.
    InsertChars(String),
    /// A paragraph break. Handled exactly like `InsertChars("\n")`.
    InsertNewline,
    /// Clipboard text. Handled exactly like `InsertChars`.
    PasteText(String),
    /// Backspace.
    DeleteBackward,
    /// Delete.
    DeleteForward,
    Undo,
    Redo,
}

/// The variant of an [`Intent`] without its payload, for logging and
/// dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    InsertChars,
    InsertNewline,
    PasteText,
    DeleteBackward,
    DeleteForward,
    Undo,
    Redo,
}

impl Intent {
    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Self::InsertChars(_) => IntentKind::InsertChars,
            Self::InsertNewline => IntentKind::InsertNewline,
            Self::PasteText(_) => IntentKind::PasteText,
            Self::DeleteBackward => IntentKind::DeleteBackward,
            Self::DeleteForward => IntentKind::DeleteForward,
            Self::Undo => IntentKind::Undo,
            Self::Redo => IntentKind::Redo,
        }
    }

    /// The text an insert-family intent carries. `None` for deletes and
    /// history intents.
    #[must_use]
    pub fn insert_text(&self) -> Option<&str> {
        match self {
            Self::InsertChars(text) | Self::PasteText(text) => Some(text),
            Self::InsertNewline => Some("\n"),
            _ => None,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InsertChars => "insert-chars",
            Self::InsertNewline => "insert-newline",
            Self::PasteText => "paste-text",
            Self::DeleteBackward => "delete-backward",
            Self::DeleteForward => "delete-forward",
            Self::Undo => "undo",
            Self::Redo => "redo",
        })
    }
}
