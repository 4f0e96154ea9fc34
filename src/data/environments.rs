//! Environment block styles
//!
//! Maps a `\begin{name}` block to the delimiters wrapped around its
//! linearized body and to the text that replaces its column separators.

use phf::{phf_map, phf_set};

/// How the cells of one row are joined after linearization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnJoin {
    /// Cells joined with a single space (matrices, alignments)
    Space,
    /// Value and condition joined with the word `if` (case blocks)
    Condition,
}

/// Rendering style of an environment block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentStyle {
    /// Text placed before the body
    pub open: &'static str,
    /// Text placed after the body
    pub close: &'static str,
    /// Column separator replacement
    pub columns: ColumnJoin,
}

impl EnvironmentStyle {
    const fn new(open: &'static str, close: &'static str, columns: ColumnJoin) -> Self {
        Self {
            open,
            close,
            columns,
        }
    }

    /// Style for environments with no dedicated entry
    pub const fn plain() -> Self {
        Self::new("", "", ColumnJoin::Space)
    }
}

/// Known environment styles, keyed by name without a trailing `*`
pub static ENVIRONMENT_STYLES: phf::Map<&'static str, EnvironmentStyle> = phf_map! {
    "matrix" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "smallmatrix" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "pmatrix" => EnvironmentStyle::new("(", ")", ColumnJoin::Space),
    "bmatrix" => EnvironmentStyle::new("[", "]", ColumnJoin::Space),
    "Bmatrix" => EnvironmentStyle::new("{", "}", ColumnJoin::Space),
    "vmatrix" => EnvironmentStyle::new("|", "|", ColumnJoin::Space),
    "Vmatrix" => EnvironmentStyle::new("‖", "‖", ColumnJoin::Space),
    "cases" => EnvironmentStyle::new("{ ", "", ColumnJoin::Condition),
    "dcases" => EnvironmentStyle::new("{ ", "", ColumnJoin::Condition),
    "rcases" => EnvironmentStyle::new("", " }", ColumnJoin::Condition),
    "array" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "align" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "aligned" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "alignat" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "gather" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "gathered" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "equation" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "split" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "multline" => EnvironmentStyle::new("", "", ColumnJoin::Space),
    "eqnarray" => EnvironmentStyle::new("", "", ColumnJoin::Space),
};

/// Environments whose body is math
pub static MATH_ENVIRONMENTS: phf::Set<&'static str> = phf_set! {
    "matrix", "smallmatrix", "pmatrix", "bmatrix", "Bmatrix", "vmatrix", "Vmatrix",
    "cases", "dcases", "rcases", "array",
    "align", "aligned", "alignat", "gather", "gathered",
    "equation", "split", "multline", "eqnarray", "math", "displaymath",
};

/// Strip the starred variant marker from an environment name
pub fn base_name(name: &str) -> &str {
    name.strip_suffix('*').unwrap_or(name)
}

/// Look up the style for an environment, falling back to a plain block
pub fn environment_style(name: &str) -> EnvironmentStyle {
    ENVIRONMENT_STYLES
        .get(base_name(name))
        .copied()
        .unwrap_or_else(EnvironmentStyle::plain)
}

/// Check if an environment's body should be parsed as math
pub fn is_math_environment(name: &str) -> bool {
    MATH_ENVIRONMENTS.contains(base_name(name))
}
