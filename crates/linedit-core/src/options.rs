//! Editor options and the `:set`-style option string.
//!
//! An [`Editor`](crate::editor::Editor) is configured with [`EditorOptions`].
//! Hosts usually build them from a single string in the familiar Vim `:set`
//! syntax, e.g. from an environment variable:
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `option`         | Enable boolean / show numeric |
//! | `nooption`       | Disable boolean               |
//! | `option!`        | Toggle boolean                |
//! | `option?`        | Query current value           |
//! | `option=N`       | Assign numeric value          |
//! | *(empty)*        | Show changed options          |
//! | `all`            | Show all options              |
//!
//! # Option names
//!
//! | Full name    | Abbrev | Type    | Default | Meaning                              |
//! |--------------|--------|---------|---------|--------------------------------------|
//! | `undolevels` | `ul`   | integer | 0       | Max undo depth, 0 = unbounded        |
//! | `normalize`  | `nm`   | bool    | true    | Turn `\r\n` / `\r` into `\n` on input |

use std::fmt;

use thiserror::Error;

/// Errors from applying a `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option: {0}")]
    Unknown(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("{0} is a number option, not a switch")]
    NotBoolean(String),

    #[error("{0} is a switch, it takes no value")]
    NotNumeric(String),
}

/// A parsed `:set` directive.
///
/// Produced by [`parse_set`]; [`EditorOptions::apply`] interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `option` — enable a boolean option.
    On(String),

    /// `nooption` — disable a boolean option.
    Off(String),

    /// `option!` — toggle a boolean option.
    Toggle(String),

    /// `option?` — query the current value.
    Query(String),

    /// `option=value` — assign a value.
    Assign(String, String),

    /// Empty string — show changed options.
    ShowChanged,

    /// `all` — show all options.
    ShowAll,
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// Canonical option, resolved from a full name or abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionName {
    UndoLevels,
    Normalize,
}

impl OptionName {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "undolevels" | "ul" => Some(Self::UndoLevels),
            "normalize" | "nm" => Some(Self::Normalize),
            _ => None,
        }
    }

    const fn full(self) -> &'static str {
        match self {
            Self::UndoLevels => "undolevels",
            Self::Normalize => "normalize",
        }
    }
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    OptionName::lookup(name) == Some(OptionName::Normalize)
}

/// Returns `true` if `name` is a known numeric option (full name or abbreviation).
#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    OptionName::lookup(name) == Some(OptionName::UndoLevels)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a whole option string into directives.
///
/// Multiple space-separated arguments are supported (`ul=100 nonormalize`).
/// An empty string produces [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // Only strip "no" when the rest is a boolean option, so that a future
    // option whose name starts with "no" still parses as itself.
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }

    // Bare numeric option name = query its value (Vim behavior).
    if is_numeric_option(arg) {
        return SetDirective::Query(arg.to_string());
    }

    SetDirective::On(arg.to_string())
}

/// Format a boolean option for display: `"name"` or `"noname"`.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// EditorOptions
// ---------------------------------------------------------------------------

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Maximum undo depth. `None` keeps every change.
    pub undo_levels: Option<usize>,
    /// Convert `\r\n` and lone `\r` in inserted text to `\n`. When off, only
    /// `\n` breaks lines and `\r` is an ordinary character.
    pub normalize_line_breaks: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            undo_levels: None,
            normalize_line_breaks: true,
        }
    }
}

impl EditorOptions {
    /// Defaults with `args` applied on top.
    ///
    /// # Errors
    ///
    /// The first directive that fails to apply.
    pub fn parse(args: &str) -> Result<Self, OptionError> {
        let mut opts = Self::default();
        opts.set(args)?;
        Ok(opts)
    }

    /// Apply every directive in `args`, collecting the report lines produced
    /// by queries.
    ///
    /// # Errors
    ///
    /// The first directive that fails to apply. Earlier directives stay applied.
    pub fn set(&mut self, args: &str) -> Result<Vec<String>, OptionError> {
        let mut report = Vec::new();
        for directive in parse_set(args) {
            if let Some(line) = self.apply(&directive)? {
                report.push(line);
            }
        }
        Ok(report)
    }

    /// Apply one directive. Queries return the line to show.
    ///
    /// # Errors
    ///
    /// Unknown option names, values that don't parse, and switch/number
    /// mismatches.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>, OptionError> {
        match directive {
            SetDirective::ShowAll => Ok(Some(self.to_string())),
            SetDirective::ShowChanged => Ok(Some(self.changed())),
            SetDirective::Query(name) => Ok(Some(self.show(resolve(name)?))),
            SetDirective::On(name) => self.set_bool(name, |_| true),
            SetDirective::Off(name) => self.set_bool(name, |_| false),
            SetDirective::Toggle(name) => self.set_bool(name, |v| !v),
            SetDirective::Assign(name, value) => match resolve(name)? {
                OptionName::UndoLevels => {
                    let levels: usize = value.parse().map_err(|_| OptionError::InvalidValue {
                        name: name.clone(),
                        value: value.clone(),
                    })?;
                    self.undo_levels = (levels > 0).then_some(levels);
                    Ok(None)
                }
                OptionName::Normalize => Err(OptionError::NotNumeric(name.clone())),
            },
        }
    }

    fn set_bool(
        &mut self,
        name: &str,
        f: impl FnOnce(bool) -> bool,
    ) -> Result<Option<String>, OptionError> {
        match resolve(name)? {
            OptionName::Normalize => {
                self.normalize_line_breaks = f(self.normalize_line_breaks);
                Ok(None)
            }
            OptionName::UndoLevels => Err(OptionError::NotBoolean(name.to_string())),
        }
    }

    fn show(&self, name: OptionName) -> String {
        match name {
            OptionName::UndoLevels => {
                format!("{}={}", name.full(), self.undo_levels.unwrap_or(0))
            }
            OptionName::Normalize => format_bool(name.full(), self.normalize_line_breaks),
        }
    }

    /// Options that differ from the defaults, space separated.
    fn changed(&self) -> String {
        let defaults = Self::default();
        let mut out = Vec::new();
        if self.undo_levels != defaults.undo_levels {
            out.push(self.show(OptionName::UndoLevels));
        }
        if self.normalize_line_breaks != defaults.normalize_line_breaks {
            out.push(self.show(OptionName::Normalize));
        }
        out.join(" ")
    }
}

impl fmt::Display for EditorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.show(OptionName::Normalize),
            self.show(OptionName::UndoLevels)
        )
    }
}

fn resolve(name: &str) -> Result<OptionName, OptionError> {
    OptionName::lookup(name).ok_or_else(|| OptionError::Unknown(name.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_set_arg ─────────────────────────────────────────────────────

    #[test]
    fn parse_boolean_forms() {
        assert_eq!(parse_set_arg("normalize"), SetDirective::On("normalize".into()));
        assert_eq!(parse_set_arg("nonm"), SetDirective::Off("nm".into()));
        assert_eq!(parse_set_arg("nm!"), SetDirective::Toggle("nm".into()));
    }

    #[test]
    fn parse_numeric_forms() {
        assert_eq!(
            parse_set_arg("ul=50"),
            SetDirective::Assign("ul".into(), "50".into())
        );
        // Bare numeric option name = query, not enable.
        assert_eq!(parse_set_arg("undolevels"), SetDirective::Query("undolevels".into()));
        assert_eq!(parse_set_arg("ul?"), SetDirective::Query("ul".into()));
    }

    #[test]
    fn parse_unknown_no_prefix_stays_whole() {
        assert_eq!(parse_set_arg("nofoobar"), SetDirective::On("nofoobar".into()));
    }

    #[test]
    fn parse_empty_and_all() {
        assert_eq!(parse_set("  "), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set("all"), vec![SetDirective::ShowAll]);
    }

    // ── EditorOptions ────────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let o = EditorOptions::default();
        assert_eq!(o.undo_levels, None);
        assert!(o.normalize_line_breaks);
        assert_eq!(o.to_string(), "normalize undolevels=0");
    }

    #[test]
    fn parse_multiple() {
        let o = EditorOptions::parse("ul=100 nonormalize").unwrap();
        assert_eq!(o.undo_levels, Some(100));
        assert!(!o.normalize_line_breaks);
    }

    #[test]
    fn zero_undo_levels_is_unbounded() {
        let o = EditorOptions::parse("undolevels=0").unwrap();
        assert_eq!(o.undo_levels, None);
    }

    #[test]
    fn toggle_flips() {
        let o = EditorOptions::parse("nm!").unwrap();
        assert!(!o.normalize_line_breaks);
    }

    #[test]
    fn query_reports() {
        let mut o = EditorOptions::default();
        let report = o.set("ul=7 ul? nm? ").unwrap();
        assert_eq!(report, vec!["undolevels=7".to_string(), "normalize".to_string()]);
    }

    #[test]
    fn show_changed_lists_only_changes() {
        let mut o = EditorOptions::parse("nonormalize").unwrap();
        assert_eq!(o.set("").unwrap(), vec!["nonormalize".to_string()]);
    }

    #[test]
    fn errors() {
        assert_eq!(
            EditorOptions::parse("wrap"),
            Err(OptionError::Unknown("wrap".into()))
        );
        assert_eq!(
            EditorOptions::parse("ul=lots"),
            Err(OptionError::InvalidValue {
                name: "ul".into(),
                value: "lots".into(),
            })
        );
        assert_eq!(
            EditorOptions::parse("ul!"),
            Err(OptionError::NotBoolean("ul".into()))
        );
        assert_eq!(
            EditorOptions::parse("nm=1"),
            Err(OptionError::NotNumeric("nm".into()))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            OptionError::Unknown("wrap".into()).to_string(),
            "unknown option: wrap"
        );
    }
}
