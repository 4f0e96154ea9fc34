//! The vocabulary of recognized command names
//!
//! The parser uses it to split run-together names (`\sinx` is `\sin`
//! followed by `x`) and to drop commands nothing can render.

use fxhash::FxHashSet;

use crate::core::formatter::RendererTable;
use crate::utils::error::{ConversionError, ConversionResult};

/// Names consumed by the parser itself rather than rendered
const STRUCTURAL_NAMES: &[&str] = &["begin", "end"];

/// An immutable set of command names, shared read-only between parses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownNames {
    names: FxHashSet<String>,
}

impl KnownNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Every name `table` can render, plus the environment delimiters
    pub fn from_table(table: &RendererTable) -> Self {
        Self::new(table.names().chain(STRUCTURAL_NAMES.iter().copied()))
    }

    /// Parse a name list: one name per line, `#` starts a comment, blank
    /// lines are skipped. A leading escape character is optional.
    pub fn from_lines(text: &str) -> ConversionResult<Self> {
        let mut names = FxHashSet::default();
        for (index, line) in text.lines().enumerate() {
            let entry = line.split('#').next().unwrap_or_default().trim();
            if entry.is_empty() {
                continue;
            }
            let name = entry.strip_prefix('\\').filter(|n| !n.is_empty()).unwrap_or(entry);
            if let Some(column) = name.find(char::is_whitespace) {
                return Err(ConversionError::parse_at(
                    format!("command name '{}' contains whitespace", name),
                    index + 1,
                    column + 1,
                ));
            }
            names.insert(name.to_string());
        }
        Ok(Self { names })
    }

    /// A copy of this set with `names` added
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The longest prefix of `name` (including `name` itself) in the set.
    ///
    /// This is a best-effort heuristic: an unlisted but valid command is
    /// split into a shorter listed command plus literal text.
    pub fn longest_known_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        let mut ends: Vec<usize> = name.char_indices().map(|(i, _)| i).skip(1).collect();
        ends.push(name.len());
        ends.into_iter()
            .rev()
            .map(|end| &name[..end])
            .find(|prefix| self.contains(prefix))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KnownNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let known = KnownNames::new(["sin", "alpha"]);
        assert!(known.contains("sin"));
        assert!(!known.contains("sinx"));
        assert_eq!(known.len(), 2);
    }

    #[test]
    fn test_longest_known_prefix() {
        let known = KnownNames::new(["s", "sin", "sinh"]);
        assert_eq!(known.longest_known_prefix("sinhx"), Some("sinh"));
        assert_eq!(known.longest_known_prefix("sinx"), Some("sin"));
        assert_eq!(known.longest_known_prefix("sin"), Some("sin"));
        assert_eq!(known.longest_known_prefix("sx"), Some("s"));
        assert_eq!(known.longest_known_prefix("foo"), None);
        assert_eq!(known.longest_known_prefix(""), None);
    }

    #[test]
    fn test_from_lines() {
        let known = KnownNames::from_lines("# greek\nalpha\n\\beta  # trailing\n\n\\\\\n").unwrap();
        assert!(known.contains("alpha"));
        assert!(known.contains("beta"));
        assert!(known.contains("\\"));
        assert_eq!(known.len(), 3);
    }

    #[test]
    fn test_from_lines_rejects_whitespace() {
        let err = KnownNames::from_lines("alpha\nbad name\n").unwrap_err();
        assert_eq!(err, ConversionError::parse_at("command name 'bad name' contains whitespace", 2, 4));
    }

    #[test]
    fn test_with_names() {
        let known = KnownNames::default().with_names(["begin", "end"]);
        assert!(known.contains("begin"));
        assert!(!known.is_empty());
    }
}
