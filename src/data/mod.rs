//! Data layer - Static tables and external vocabularies
//!
//! This module contains the data the parser and formatter consult:
//! - Symbol mappings for commands
//! - Environment delimiters and classes
//! - Unicode script tables
//! - Known command names and loaders for external lists

pub mod environments;
pub mod known_names;
pub mod loader;
pub mod scripts;
pub mod symbols;

// Re-export commonly used items
pub use environments::{environment_style, is_math_environment, ColumnJoin, EnvironmentStyle};
pub use known_names::KnownNames;
pub use loader::load_known_names;
#[cfg(feature = "data-loading")]
pub use loader::{load_symbol_overrides, parse_symbol_overrides, OverrideFormat};
pub use scripts::{to_subscript, to_superscript, SPECIAL_SUPERSCRIPTS};
pub use symbols::{ACCENT_COMMANDS, CHAR_COMMANDS, GREEK_LETTERS, MATH_SYMBOLS, NEGATIONS};
