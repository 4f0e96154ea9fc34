//! Loading name lists and symbol overrides from files
//!
//! Override tables are flat `name -> replacement` maps. The format follows
//! the file extension: `.json`, `.yaml`/`.yml` or `.toml`.

use std::path::Path;

use tracing::debug;

use super::known_names::KnownNames;
use crate::utils::error::ConversionResult;

#[cfg(feature = "data-loading")]
use crate::core::formatter::Renderer;
#[cfg(feature = "data-loading")]
use crate::utils::error::ConversionError;
#[cfg(feature = "data-loading")]
use std::collections::BTreeMap;

/// Read a known-names list from a file (see [`KnownNames::from_lines`])
pub fn load_known_names(path: impl AsRef<Path>) -> ConversionResult<KnownNames> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let known = KnownNames::from_lines(&content)?;
    debug!(path = %path.display(), count = known.len(), "loaded known command names");
    Ok(known)
}

/// Supported override file formats
#[cfg(feature = "data-loading")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideFormat {
    Json,
    Yaml,
    Toml,
}

#[cfg(feature = "data-loading")]
impl OverrideFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(OverrideFormat::Json),
            "yaml" | "yml" => Some(OverrideFormat::Yaml),
            "toml" => Some(OverrideFormat::Toml),
            _ => None,
        }
    }
}

/// Parse a symbol override table into renderers for
/// [`FormatterBuilder::overrides`](crate::core::formatter::FormatterBuilder::overrides)
#[cfg(feature = "data-loading")]
pub fn parse_symbol_overrides(content: &str, format: OverrideFormat) -> ConversionResult<Vec<(String, Renderer)>> {
    let table: BTreeMap<String, String> = match format {
        OverrideFormat::Json => serde_json::from_str(content).map_err(|e| {
            ConversionError::parse_at(e.to_string(), e.line(), e.column())
        })?,
        OverrideFormat::Yaml => serde_yaml::from_str(content).map_err(|e| match e.location() {
            Some(loc) => ConversionError::parse_at(e.to_string(), loc.line(), loc.column()),
            None => ConversionError::parse(e.to_string()),
        })?,
        OverrideFormat::Toml => toml::from_str(content).map_err(|e| ConversionError::parse(e.message()))?,
    };

    table
        .into_iter()
        .map(|(name, replacement)| {
            let name = match name.strip_prefix('\\') {
                Some(stripped) if !stripped.is_empty() => stripped.to_string(),
                _ => name,
            };
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(ConversionError::invalid(format!(
                    "override name '{}' is not a command name",
                    name
                )));
            }
            Ok((name, Renderer::symbol(replacement)))
        })
        .collect()
}

/// Read a symbol override table from a file
#[cfg(feature = "data-loading")]
pub fn load_symbol_overrides(path: impl AsRef<Path>) -> ConversionResult<Vec<(String, Renderer)>> {
    let path = path.as_ref();
    let format = OverrideFormat::from_path(path).ok_or_else(|| {
        ConversionError::invalid(format!(
            "unsupported override file '{}': expected .json, .yaml, .yml or .toml",
            path.display()
        ))
    })?;
    let content = std::fs::read_to_string(path)?;
    let overrides = parse_symbol_overrides(&content, format)?;
    debug!(path = %path.display(), count = overrides.len(), "loaded symbol overrides");
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_known_names_file() {
        let err = load_known_names("/nonexistent/llmlatex/names.txt").unwrap_err();
        assert!(err.to_string().starts_with("IO error"));
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_override_formats() {
        let json = parse_symbol_overrides(r#"{"R": "ℝ", "\\eps": "ε"}"#, OverrideFormat::Json).unwrap();
        let names: Vec<_> = json.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["R", "eps"]);

        let yaml = parse_symbol_overrides("R: ℝ\n", OverrideFormat::Yaml).unwrap();
        assert_eq!(yaml.len(), 1);

        let toml = parse_symbol_overrides("R = \"ℝ\"\n", OverrideFormat::Toml).unwrap();
        assert_eq!(toml.len(), 1);
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_override_rejects_bad_names() {
        let err = parse_symbol_overrides(r#"{"two words": "x"}"#, OverrideFormat::Json).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput { .. }));

        let err = parse_symbol_overrides("not json", OverrideFormat::Json).unwrap_err();
        assert!(matches!(err, ConversionError::ParseError { .. }));
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_format_from_path() {
        assert_eq!(OverrideFormat::from_path(Path::new("a.YML")), Some(OverrideFormat::Yaml));
        assert_eq!(OverrideFormat::from_path(Path::new("a.txt")), None);
    }
}
