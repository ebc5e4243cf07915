//! # linedit-core: line-addressed plain-text editing
//!
//! The engine behind a single editable document. The host owns the
//! presentation and the input; this crate owns the text, the undo log, and
//! the rules that turn one into the other.
//!
//! - **[`position`]** — `Position` (line, offset) and `Range`, 0-indexed, offsets in chars
//! - **[`buffer`]** — `Buffer`, the line store with bounds-checked insert/remove
//! - **[`change`]** — `Change`, one recorded insert or removal, and its inverse
//! - **[`history`]** — `History`, the undo/redo stacks
//! - **[`selection`]** — anchor/focus selections as the host reports them
//! - **[`intent`]** — `Intent`, the editing actions a host can request
//! - **[`editor`]** — `Editor`, which interprets intents against a selection
//! - **[`render`]** — `RenderEvent` line diffs and the `RenderSink` callback
//! - **[`view`]** — `Resolve` for view locations, and the `LineMirror` view model
//! - **[`options`]** — `EditorOptions` and the `:set`-style option syntax
//! - **[`error`]** — `EditError`, the contract violations

pub mod buffer;
pub mod change;
pub mod editor;
pub mod error;
pub mod history;
pub mod intent;
pub mod options;
pub mod position;
pub mod render;
pub mod selection;
pub mod view;
