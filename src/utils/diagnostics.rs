//! Source diagnostics
//!
//! Conversion itself is forgiving: unknown names are dropped and broken
//! markup degrades to text. This module reports what would be lost or would
//! fail, so validation callers can surface it:
//!
//! - Commands the formatter cannot render (conversion would fail)
//! - Unbalanced braces and environments
//! - Unknown commands the parser will drop, and unterminated `$` regions
//! - Command names the parser will shorten to a known prefix
//!
//! ## Example
//!
//! ```rust
//! use llmlatex::diagnostics::check_text;
//! use llmlatex::{Formatter, Parser};
//!
//! let result = check_text(r"\begin{cases} x", &Parser::new(), &Formatter::new());
//! assert!(result.has_errors());
//! ```

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::formatter::Formatter;
use crate::core::lexer::COMMAND_HEAD;
use crate::core::parser::Parser;
use crate::data::symbols::is_sizing_command;

lazy_static! {
    static ref ENVIRONMENT_DELIMITER: Regex = Regex::new(r"\\(begin|end)\s*\{([^{}]*)\}").unwrap();
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - content will be dropped or shown literally
    Warning,
    /// Error - conversion will fail or produce incorrect output
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed, in characters)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // level: message
        //   --> line:column
        //   |
        //   | source text
        //   = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check text for markup the conversion would drop, alter or fail on
pub fn check_text(input: &str, parser: &Parser, formatter: &Formatter) -> CheckResult {
    let mut result = CheckResult::new();
    let line_offsets = compute_line_offsets(input);

    check_commands(input, &line_offsets, parser, formatter, &mut result);
    check_brace_balance(input, &line_offsets, &mut result);
    check_environment_balance(input, &line_offsets, &mut result);
    check_math_delimiters(input, &line_offsets, &mut result);

    result
}

/// Compute byte offsets for each line start
fn compute_line_offsets(input: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in input.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Convert byte offset to line and column (both 1-indexed)
fn offset_to_location(input: &str, offset: usize, line_offsets: &[usize]) -> (usize, usize) {
    let line = line_offsets.partition_point(|&o| o <= offset).saturating_sub(1);
    let start = line_offsets.get(line).copied().unwrap_or(0);
    let column = input[start..offset].chars().count() + 1;
    (line + 1, column)
}

/// Resolve every command name the way the parser would and check that the
/// formatter can render the result
fn check_commands(
    input: &str,
    line_offsets: &[usize],
    parser: &Parser,
    formatter: &Formatter,
    result: &mut CheckResult,
) {
    for head in COMMAND_HEAD.find_iter(input) {
        let name = &head.as_str()[1..];
        let (line, col) = offset_to_location(input, head.start(), line_offsets);

        let resolved = match parser.known_names() {
            Some(known) if !known.contains(name) => match known.longest_known_prefix(name) {
                Some(prefix) => {
                    result.add(
                        Diagnostic::new(
                            DiagnosticLevel::Info,
                            format!("'\\{}' is read as '\\{}' followed by '{}'", name, prefix, &name[prefix.len()..]),
                        )
                        .with_location(line, col)
                        .with_source(head.as_str())
                        .with_suggestion(format!("Write '\\{}{{...}}' or add a space if that is not intended", prefix)),
                    );
                    prefix
                }
                None => {
                    result.add(
                        Diagnostic::new(
                            DiagnosticLevel::Warning,
                            format!("unknown command '\\{}' will be dropped", name),
                        )
                        .with_location(line, col)
                        .with_source(head.as_str()),
                    );
                    continue;
                }
            },
            Some(_) if is_sizing_command(name) => continue,
            _ => name,
        };

        if resolved == "begin" || resolved == "end" {
            continue;
        }

        if !formatter.can_render(resolved) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("no renderer is registered for '\\{}'", resolved),
                )
                .with_location(line, col)
                .with_source(head.as_str())
                .with_suggestion("Register a renderer for it or enable passthrough of unknown commands"),
            );
        }
    }
}

/// Check for unbalanced braces, ignoring escaped ones
fn check_brace_balance(input: &str, line_offsets: &[usize], result: &mut CheckResult) {
    let mut depth = 0i32;
    let mut last_open_line = 0;
    let mut escaped = false;

    for (offset, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => {
                if depth == 0 {
                    let (line, _) = offset_to_location(input, offset, line_offsets);
                    last_open_line = line;
                }
                depth += 1;
            }
            '}' => {
                depth -= 1;
                if depth < 0 {
                    let (line, col) = offset_to_location(input, offset, line_offsets);
                    result.add(
                        Diagnostic::new(DiagnosticLevel::Error, "unmatched closing brace '}'")
                            .with_location(line, col)
                            .with_suggestion("Check for missing opening brace"),
                    );
                    depth = 0;
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "{} unclosed brace{} (opened around line {})",
                    depth,
                    if depth == 1 { "" } else { "s" },
                    last_open_line
                ),
            )
            .with_suggestion("Check for missing closing brace '}'"),
        );
    }
}

/// Check for unbalanced environments
fn check_environment_balance(input: &str, line_offsets: &[usize], result: &mut CheckResult) {
    let mut env_stack: Vec<(String, usize)> = Vec::new();

    for caps in ENVIRONMENT_DELIMITER.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let env_name = caps[2].trim();
        let (line, col) = offset_to_location(input, whole.start(), line_offsets);

        if &caps[1] == "begin" {
            env_stack.push((env_name.to_string(), line));
            continue;
        }

        match env_stack.pop() {
            Some((open_name, open_line)) if open_name != env_name => {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Error,
                        format!(
                            "mismatched environment: opened '{}' at line {}, closed '{}' at line {}",
                            open_name, open_line, env_name, line
                        ),
                    )
                    .with_location(line, col)
                    .with_suggestion(format!("Use \\end{{{}}}", open_name)),
                );
            }
            Some(_) => {}
            None => {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Error,
                        format!("unmatched \\end{{{}}}", env_name),
                    )
                    .with_location(line, col)
                    .with_suggestion("Check for missing \\begin"),
                );
            }
        }
    }

    // Report unclosed environments
    for (env_name, line) in env_stack {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!(
                    "unclosed environment '{}' (opened at line {})",
                    env_name, line
                ),
            )
            .with_suggestion(format!("Add \\end{{{}}}", env_name)),
        );
    }
}

/// Warn about `$` or `$$` regions that never close
fn check_math_delimiters(input: &str, line_offsets: &[usize], result: &mut CheckResult) {
    let bytes = input.as_bytes();
    let mut inline_open: Option<usize> = None;
    let mut display_open: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' if bytes.get(i + 1) == Some(&b'$') && inline_open.is_none() => {
                display_open = match display_open {
                    Some(_) => None,
                    None => Some(i),
                };
                i += 2;
            }
            b'$' => {
                inline_open = match inline_open {
                    Some(_) => None,
                    None => Some(i),
                };
                i += 1;
            }
            _ => i += 1,
        }
    }

    for (open, delimiter) in [(inline_open, "$"), (display_open, "$$")] {
        if let Some(offset) = open {
            let (line, col) = offset_to_location(input, offset, line_offsets);
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("unterminated '{}' math region will be shown literally", delimiter),
                )
                .with_location(line, col)
                .with_suggestion(format!("Close it with '{}' or escape it as '\\$'", delimiter)),
            );
        }
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
