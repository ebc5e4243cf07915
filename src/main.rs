// SPDX-License-Identifier: MIT
//
// linedit: replay host for the linedit editing engine.
//
// Reads an intent script (a file argument, or stdin), feeds it to an Editor
// one command at a time, and keeps a LineMirror in sync from the render
// events the engine emits. The selection is held in view coordinates, the
// way a real presentation would hold it, and resolved through the mirror on
// every intent:
//
//   script → parse → Intent + ViewSelection → Editor::apply_at
//   RenderEvents → LineMirror → stdout
//
// Script syntax, one command per line (`#` starts a comment):
//
//   type TEXT        insert TEXT (escapes: \n \t \r \\)
//   paste TEXT       paste TEXT
//   newline          insert a line break
//   backspace        delete backward
//   delete           delete forward
//   undo | redo
//   caret L:C        collapse the selection at line L, column C (1-indexed)
//   select L:C L:C   anchor, then focus
//   ranges N         report N selection ranges from now on
//
// Usage:
//
//   linedit [SCRIPT [DOCUMENT]]
//
// Environment:
//
//   LINEDIT_OPTIONS  `:set`-style options, e.g. "ul=100 nonormalize"
//   LINEDIT_LOG      tracing filter, default "warn"

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process;

use linedit_core::editor::{Editor, Outcome};
use linedit_core::error::EditError;
use linedit_core::intent::Intent;
use linedit_core::options::{EditorOptions, OptionError};
use linedit_core::position::Position;
use linedit_core::render::{RenderEvent, RenderSink};
use linedit_core::selection::ViewSelection;
use linedit_core::view::{LineId, LineMirror, ViewLocation};

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Anything that stops a replay.
#[derive(Debug, Error)]
enum ScriptError {
    #[error("{path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("LINEDIT_OPTIONS: {0}")]
    Options(#[from] OptionError),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Edit { line: usize, source: EditError },

    #[error(transparent)]
    Output(#[from] io::Error),
}

// ─── Script commands ────────────────────────────────────────────────────────

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Intent(Intent),
    Caret(Position),
    Select(Position, Position),
    Ranges(usize),
}

/// Parse a non-empty, non-comment script line.
fn parse_command(line: &str) -> Result<Command, String> {
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let args = rest.trim();

    let cmd = match word {
        "type" => Command::Intent(Intent::InsertChars(unescape(rest)?)),
        "paste" => Command::Intent(Intent::PasteText(unescape(rest)?)),
        "newline" => Command::Intent(Intent::InsertNewline),
        "backspace" => Command::Intent(Intent::DeleteBackward),
        "delete" => Command::Intent(Intent::DeleteForward),
        "undo" => Command::Intent(Intent::Undo),
        "redo" => Command::Intent(Intent::Redo),
        "caret" => Command::Caret(parse_position(args)?),
        "select" => {
            let (a, b) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("select needs two positions, got `{args}`"))?;
            Command::Select(parse_position(a)?, parse_position(b.trim())?)
        }
        "ranges" => Command::Ranges(
            args.parse()
                .map_err(|_| format!("ranges needs a count, got `{args}`"))?,
        ),
        _ => return Err(format!("unknown command `{word}`")),
    };

    // Argument-less commands must not carry trailing junk.
    if matches!(word, "newline" | "backspace" | "delete" | "undo" | "redo") && !args.is_empty() {
        return Err(format!("`{word}` takes no arguments"));
    }
    Ok(cmd)
}

/// Parse a 1-indexed `LINE:COL` into a buffer position.
fn parse_position(s: &str) -> Result<Position, String> {
    let bad = || format!("expected LINE:COL, got `{s}`");
    let (line, col) = s.split_once(':').ok_or_else(bad)?;
    let line: usize = line.parse().map_err(|_| bad())?;
    let col: usize = col.parse().map_err(|_| bad())?;
    if line == 0 || col == 0 {
        return Err(format!("positions are 1-indexed, got `{s}`"));
    }
    Ok(Position::new(line - 1, col - 1))
}

/// Expand `\n`, `\t`, `\r`, and `\\` in script text.
fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(format!("unknown escape `\\{other}`")),
            None => return Err("trailing backslash".to_string()),
        }
    }
    Ok(out)
}

// ─── Session ────────────────────────────────────────────────────────────────

/// An editor, its view mirror, and the host-side selection.
struct Session {
    editor: Editor,
    mirror: LineMirror,
    selection: ViewSelection<ViewLocation>,
}

impl Session {
    fn new(editor: Editor) -> Self {
        let mirror = LineMirror::new(editor.buffer());
        // The buffer always has a first line, so this never falls back.
        let start = mirror
            .location(Position::ZERO)
            .unwrap_or_else(|| ViewLocation::new(LineId::from_raw(0), 0));
        Self {
            editor,
            mirror,
            selection: ViewSelection::caret(start),
        }
    }

    /// Translate a buffer position into the mirror's coordinates.
    fn locate(&self, pos: Position, line: usize) -> Result<ViewLocation, ScriptError> {
        self.mirror.location(pos).ok_or_else(|| ScriptError::Parse {
            line,
            message: format!("there is no line {}", pos.line + 1),
        })
    }

    fn execute(
        &mut self,
        cmd: &Command,
        line: usize,
        out: &mut impl Write,
    ) -> Result<(), ScriptError> {
        match cmd {
            Command::Caret(pos) => {
                let at = self.locate(*pos, line)?;
                self.selection.anchor = at;
                self.selection.focus = at;
            }
            Command::Select(anchor, focus) => {
                self.selection.anchor = self.locate(*anchor, line)?;
                self.selection.focus = self.locate(*focus, line)?;
            }
            Command::Ranges(n) => self.selection.range_count = *n,
            Command::Intent(intent) => {
                let outcome = self
                    .editor
                    .apply_at(intent, &self.selection, &self.mirror)
                    .map_err(|source| ScriptError::Edit { line, source })?;
                match outcome {
                    Outcome::Applied(applied) => {
                        self.mirror.render_all(&applied.events);
                        for event in &applied.events {
                            writeln!(out, "  {}", describe(event))?;
                        }
                        let at = self.locate(applied.caret, line)?;
                        self.selection.anchor = at;
                        self.selection.focus = at;
                    }
                    Outcome::Rejected(reason) => writeln!(out, "  ! {reason}")?,
                }
            }
        }
        Ok(())
    }

    /// Replay a whole script, echoing each command and what it changed.
    fn run(&mut self, script: &str, out: &mut impl Write) -> Result<(), ScriptError> {
        for (i, raw) in script.lines().enumerate() {
            let line = i + 1;
            let text = raw.trim_start();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let cmd = parse_command(text).map_err(|message| ScriptError::Parse { line, message })?;
            writeln!(out, "> {text}")?;
            self.execute(&cmd, line, out)?;
        }

        writeln!(out, "-- caret {}", self.editor.caret())?;
        for (n, text) in self.mirror.lines().iter().enumerate() {
            writeln!(out, "{:>4} | {text}", n + 1)?;
        }
        Ok(())
    }
}

/// One render event as a line of output, 1-indexed like the script.
fn describe(event: &RenderEvent) -> String {
    let n = event.index() + 1;
    match event {
        RenderEvent::LineReplaced { text, .. } => format!("~ {n} | {text}"),
        RenderEvent::LineInserted { text, .. } => format!("+ {n} | {text}"),
        RenderEvent::LineRemoved { .. } => format!("- {n}"),
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINEDIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .without_time()
        .with_target(false)
        .init();
}

fn read_file(path: &str) -> Result<String, ScriptError> {
    fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_string(),
        source,
    })
}

/// Build options from a `:set`-style string, echoing whatever it asks to
/// show (`ul?`, `all`, or an empty string for the changed ones).
fn load_options(raw: Option<&str>, out: &mut impl Write) -> Result<EditorOptions, ScriptError> {
    let mut options = EditorOptions::default();
    if let Some(raw) = raw {
        for line in options.set(raw)? {
            if !line.is_empty() {
                writeln!(out, ":set {line}")?;
            }
        }
    }
    Ok(options)
}

fn run() -> Result<(), ScriptError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let raw_options = env::var("LINEDIT_OPTIONS").ok();
    let options = load_options(raw_options.as_deref(), &mut out)?;

    let args: Vec<String> = env::args().collect();
    let script = match args.get(1) {
        Some(path) => read_file(path)?,
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|source| ScriptError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            s
        }
    };
    let editor = match args.get(2) {
        Some(path) => Editor::from_text_with(&read_file(path)?, options),
        None => Editor::with_options(options),
    };

    info!(options = %editor.options(), lines = editor.buffer().line_count(), "replay starting");

    Session::new(editor).run(&script, &mut out)
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("linedit: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use linedit_core::editor::Rejection;
    use pretty_assertions::assert_eq;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn replay(initial: &str, script: &str) -> Result<String, ScriptError> {
        let mut out = Vec::new();
        Session::new(Editor::from_text(initial)).run(script, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn final_lines(initial: &str, script: &str) -> Vec<String> {
        let mut session = Session::new(Editor::from_text(initial));
        session.run(script, &mut Vec::new()).unwrap();
        assert_eq!(session.mirror.lines(), session.editor.lines());
        session.editor.lines().to_vec()
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    #[test]
    fn parse_intents() {
        assert_eq!(
            parse_command("type hi there"),
            Ok(Command::Intent(Intent::InsertChars("hi there".into())))
        );
        assert_eq!(
            parse_command("paste a\\nb"),
            Ok(Command::Intent(Intent::PasteText("a\nb".into())))
        );
        assert_eq!(parse_command("undo"), Ok(Command::Intent(Intent::Undo)));
        assert_eq!(
            parse_command("backspace"),
            Ok(Command::Intent(Intent::DeleteBackward))
        );
    }

    #[test]
    fn type_keeps_inner_and_trailing_spaces() {
        assert_eq!(
            parse_command("type  a "),
            Ok(Command::Intent(Intent::InsertChars(" a ".into())))
        );
    }

    #[test]
    fn parse_positions_are_one_indexed() {
        assert_eq!(parse_command("caret 2:3"), Ok(Command::Caret(Position::new(1, 2))));
        assert_eq!(
            parse_command("select 1:1  3:4"),
            Ok(Command::Select(Position::new(0, 0), Position::new(2, 3)))
        );
        assert!(parse_command("caret 0:1").is_err());
        assert!(parse_command("caret 1").is_err());
        assert!(parse_command("select 1:1").is_err());
    }

    #[test]
    fn parse_rejects_junk() {
        assert_eq!(parse_command("frobnicate"), Err("unknown command `frobnicate`".into()));
        assert!(parse_command("undo now").is_err());
        assert!(parse_command("ranges many").is_err());
        assert!(parse_command("type a\\q").is_err());
        assert!(parse_command("type a\\").is_err());
    }

    #[test]
    fn unescape_handles_all_escapes() {
        assert_eq!(unescape(r"a\tb\r\n\\"), Ok("a\tb\r\n\\".to_string()));
    }

    // ── Options ───────────────────────────────────────────────────────────

    #[test]
    fn options_queries_are_echoed() {
        let mut out = Vec::new();
        let options = load_options(Some("ul=5 ul? nonormalize all"), &mut out).unwrap();
        assert_eq!(options.undo_levels, Some(5));
        assert!(!options.normalize_line_breaks);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ":set undolevels=5\n:set nonormalize undolevels=5\n"
        );
    }

    #[test]
    fn empty_options_show_changes_only() {
        let mut out = Vec::new();
        let options = load_options(Some(""), &mut out).unwrap();
        assert_eq!(options, EditorOptions::default());
        assert!(out.is_empty());
    }

    #[test]
    fn missing_options_use_defaults_silently() {
        let mut out = Vec::new();
        assert_eq!(load_options(None, &mut out).unwrap(), EditorOptions::default());
        assert!(out.is_empty());
    }

    #[test]
    fn bad_options_are_reported() {
        let err = load_options(Some("wrap"), &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "LINEDIT_OPTIONS: unknown option: wrap");
    }

    // ── Replay ────────────────────────────────────────────────────────────

    #[test]
    fn replay_prints_events_and_document() {
        let out = replay("", "type hello\nnewline\ntype world\n").unwrap();
        assert_eq!(
            out,
            "> type hello\n\
             \x20 ~ 1 | hello\n\
             > newline\n\
             \x20 ~ 1 | hello\n\
             \x20 + 2 | \n\
             > type world\n\
             \x20 ~ 2 | world\n\
             -- caret 2:6\n\
             \x20  1 | hello\n\
             \x20  2 | world\n"
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        assert_eq!(final_lines("", "# setup\n\n  type x\n"), vec!["x"]);
    }

    #[test]
    fn caret_follows_edits_through_the_mirror() {
        let lines = final_lines(
            "one\ntwo",
            "caret 2:4\ntype !\nbackspace\nbackspace\ntype O\n",
        );
        assert_eq!(lines, vec!["one", "twO"]);
    }

    #[test]
    fn type_over_then_undo_twice() {
        let script = "select 1:1 1:6\ntype hi\nundo\n";
        assert_eq!(final_lines("hello", script), vec![""]);
        assert_eq!(final_lines("hello", &format!("{script}undo\n")), vec!["hello"]);
    }

    #[test]
    fn rejections_are_reported_not_fatal() {
        let out = replay("abc", "backspace\nranges 2\ntype x\n").unwrap();
        assert!(out.contains(&format!("  ! {}", Rejection::NoOpEdit)));
        assert!(out.contains(&format!("  ! {}", Rejection::MultiRange)));
        assert!(out.ends_with("   1 | abc\n"));
    }

    #[test]
    fn out_of_bounds_offset_is_an_edit_error() {
        let err = replay("abc", "caret 1:9\ntype x\n").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Edit {
                line: 2,
                source: EditError::OutOfBounds(_)
            }
        ));
    }

    #[test]
    fn missing_line_is_a_script_error() {
        let err = replay("abc", "caret 5:1\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: there is no line 5");
    }

    #[test]
    fn parse_error_reports_line_number() {
        let err = replay("", "type a\nbogus\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: unknown command `bogus`");
    }

    #[test]
    fn multi_line_paste_and_join() {
        let lines = final_lines("ab", "caret 1:2\npaste 1\\n2\\n3\ncaret 2:1\nbackspace\n");
        assert_eq!(lines, vec!["a12", "3b"]);
    }
}
