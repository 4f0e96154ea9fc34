//! Core conversion modules
//!
//! This module contains the two conversion stages and their shared pieces:
//! - `node`: the parsed tree
//! - `lexer`: earliest-match scanning of commands, scripts and math regions
//! - `parser`: text to tree
//! - `formatter`: tree to text, with the renderer table in `renderers`

pub mod formatter;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod renderers;
pub mod utils;

// Re-export main types
pub use formatter::{
    default_known_names, FormatOptions, Formatter, FormatterBuilder, RenderFn, Renderer,
    RendererTable,
};
pub use node::{CommandNode, EnvironmentNode, GroupKind, GroupNode, Node, ScriptSlot, TextNode};
pub use parser::Parser;
pub use utils::{needs_parentheses, normalize_math_spacing, ScriptStyle};
