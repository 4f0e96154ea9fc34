//! # llmlatex
//!
//! Render the LaTeX fragments that language models sprinkle into their
//! answers as plain Unicode text.
//!
//! ## Features
//!
//! - **Forgiving Parser**: never fails on malformed markup; unknown commands,
//!   stray scripts and unterminated blocks degrade to text or are dropped
//! - **Known-Name Recovery**: `\sinx` is read as `\sin` followed by `x`
//! - **Strict Formatter**: a command with no renderer is an error, not silent loss
//! - **Pluggable Renderers**: override or extend the default table per formatter
//! - **Readable Output**: `(a + b)/c`, `√x`, matrices and case blocks on lines,
//!   optional Unicode super/subscripts
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### One-shot conversion
//!
//! ```rust
//! use llmlatex::latex_to_text;
//!
//! let text = latex_to_text(r"The area is $\pi r^2$.").unwrap();
//! assert_eq!(text, "The area is π r^{2}.");
//! ```
//!
//! ### Parser and formatter
//!
//! ```rust
//! use llmlatex::{default_known_names, FormatOptions, Formatter, Parser};
//!
//! let parser = Parser::with_known_names(default_known_names());
//! let nodes = parser.parse(r"$\alpha_i^2 \leq 1$");
//!
//! let formatter = Formatter::with_options(FormatOptions::readable());
//! assert_eq!(formatter.render(&nodes).unwrap(), "αᵢ² ≤ 1");
//! ```

use std::collections::BTreeSet;

/// Core conversion modules
pub mod core;

/// Data layer - static tables and vocabularies
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the conversion pipeline
pub use crate::core::formatter::{
    default_known_names, CustomRenderFn, FormatOptions, Formatter, FormatterBuilder, RenderFn,
    Renderer, RendererTable,
};
pub use crate::core::node::{
    sequence_to_source, CommandNode, EnvironmentNode, GroupKind, GroupNode, Node, ScriptSlot,
    TextNode,
};
pub use crate::core::parser::Parser;
pub use crate::core::utils::{needs_parentheses, ScriptStyle};

// Re-export data
pub use data::known_names::KnownNames;
pub use data::loader::load_known_names;
pub use data::symbols;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{ConversionError, ConversionResult};

/// Convert LLM output to plain text
///
/// Uses the default known-names vocabulary and the default formatter.
///
/// # Errors
/// [`ConversionError::UnknownCommand`] if a parsed command has no renderer
pub fn latex_to_text(input: &str) -> ConversionResult<String> {
    latex_to_text_with_options(input, &FormatOptions::default())
}

/// Convert LLM output to plain text with custom output options
pub fn latex_to_text_with_options(input: &str, options: &FormatOptions) -> ConversionResult<String> {
    let nodes = Parser::with_known_names(default_known_names()).parse(input);
    Formatter::with_options(*options).render(&nodes)
}

/// Collect the name of every command used in `text`
///
/// Parses without a known-names vocabulary, so every lexically matched name
/// is reported as written, including those inside arguments and scripts.
pub fn enumerate_macros(text: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for node in Parser::new().parse(text) {
        node.collect_command_names(&mut names);
    }
    names
}
