//! WASM bindings for llmlatex
//!
//! This module provides JavaScript-accessible functions for rendering
//! LaTeX-laden text as plain Unicode text.

use wasm_bindgen::prelude::*;

use serde::{Deserialize, Serialize};

use crate::core::formatter::{default_known_names, FormatOptions, Formatter};
use crate::core::parser::Parser;
use crate::core::utils::ScriptStyle;
use crate::diagnostics::DiagnosticLevel;

/// Conversion options (exposed to WASM)
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Write scripts with Unicode super/subscript characters where possible
    #[serde(default)]
    pub unicode_scripts: bool,
    /// Space out operators in math regions
    #[serde(default = "default_true")]
    pub math_spacing: bool,
    /// Render unknown commands as their arguments instead of failing
    #[serde(default)]
    pub passthrough_unknown: bool,
    /// Resolve command names against the default vocabulary
    #[serde(default = "default_true")]
    pub known_names: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            unicode_scripts: false,
            math_spacing: true,
            passthrough_unknown: false,
            known_names: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl ConvertOptions {
    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            math_spacing: self.math_spacing,
            script_style: if self.unicode_scripts {
                ScriptStyle::Unicode
            } else {
                ScriptStyle::Braced
            },
            passthrough_unknown: self.passthrough_unknown,
        }
    }

    fn parser(&self) -> Parser {
        if self.known_names {
            Parser::with_known_names(default_known_names())
        } else {
            Parser::new()
        }
    }
}

/// Conversion result with additional metadata
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render text with the default settings
///
/// # Returns
/// `{ output, success, error }`
#[wasm_bindgen(js_name = "latexToText")]
pub fn latex_to_text_wasm(input: &str) -> JsValue {
    to_js(&convert(input, &ConvertOptions::default()))
}

/// Render text with options
#[wasm_bindgen(js_name = "latexToTextWithOptions")]
pub fn latex_to_text_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: ConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    to_js(&convert(input, &opts))
}

fn convert(input: &str, opts: &ConvertOptions) -> ConvertResult {
    let nodes = opts.parser().parse(input);
    match Formatter::with_options(opts.format_options()).render(&nodes) {
        Ok(output) => ConvertResult {
            output,
            success: true,
            error: None,
        },
        Err(e) => ConvertResult {
            output: String::new(),
            success: false,
            error: Some(e.to_string()),
        },
    }
}

/// List every command name used in the text
#[wasm_bindgen(js_name = "enumerateMacros")]
pub fn enumerate_macros_wasm(input: &str) -> Vec<String> {
    crate::enumerate_macros(input).into_iter().collect()
}

/// Check text for markup the conversion would drop or fail on
#[wasm_bindgen(js_name = "checkText")]
pub fn check_text_wasm(input: &str) -> JsValue {
    let parser = Parser::with_known_names(default_known_names());
    let result = crate::diagnostics::check_text(input, &parser, &Formatter::new());

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    to_js(&summary)
}

/// Summary of check results
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Get version information
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}
