//! Lexical matcher for embedded markup
//!
//! Commands, scripts and math regions overlap (a command's braces may hold
//! `_{...}`, a math region may hold commands), so each kind is searched for
//! independently and the earliest-starting match is consumed first.

use lazy_static::lazy_static;
use regex::Regex;

use super::node::ScriptSlot;
use crate::data::symbols::is_sizing_command;

lazy_static! {
    /// Escape followed by a letter name or a single symbol character.
    /// Brackets and parentheses are excluded: `\[` and `\(` open math.
    pub static ref COMMAND_HEAD: Regex = Regex::new(r"\\(?:[a-zA-Z]+|[\\,;:!>{}$%&#_| ])").unwrap();

    static ref BRACED_SCRIPT: Regex = Regex::new(r"[_^]\{").unwrap();

    static ref BARE_SCRIPT: Regex = Regex::new(r"[_^](?:\{|\\[a-zA-Z]+|[^\s{}\\])").unwrap();

    static ref INLINE_MATH: Regex = Regex::new(r"\$([^$]+)\$").unwrap();

    static ref PAREN_MATH: Regex = Regex::new(r"(?s)\\\((.+?)\\\)").unwrap();

    static ref DISPLAY_MATH: Regex = Regex::new(r"(?s)\\\[(.+?)\\\]").unwrap();

    static ref DOUBLE_DOLLAR_MATH: Regex = Regex::new(r"\$\$([^$]+)\$\$").unwrap();
}

/// Match kinds, in tie-breaking priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Command,
    Subscript,
    Superscript,
    InlineMath,
    DisplayMath,
    DoubleDollarMath,
}

/// A command head plus the arguments that follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMatch<'a> {
    /// Name without the escape character
    pub name: &'a str,
    /// Byte offset just past the name
    pub name_end: usize,
    /// Bracket arguments, raw
    pub optional: Vec<&'a str>,
    /// Brace arguments, raw and unparsed
    pub required: Vec<&'a str>,
}

/// What was matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Command(CommandMatch<'a>),
    Script { slot: ScriptSlot, content: &'a str },
    Math { kind: MatchKind, body: &'a str },
}

/// One match with its byte span in the scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub token: Token<'a>,
}

impl LexMatch<'_> {
    pub fn kind(&self) -> MatchKind {
        match &self.token {
            Token::Command(_) => MatchKind::Command,
            Token::Script {
                slot: ScriptSlot::Subscript,
                ..
            } => MatchKind::Subscript,
            Token::Script {
                slot: ScriptSlot::Superscript,
                ..
            } => MatchKind::Superscript,
            Token::Math { kind, .. } => *kind,
        }
    }
}

/// Find the earliest match at or after `offset`.
///
/// Ties on the start position go to the kind that sorts first in
/// [`MatchKind`]. Inside math regions (`math == true`) single-token scripts
/// such as `x^2` are recognized as well as braced ones.
pub fn find_next(text: &str, offset: usize, math: bool) -> Option<LexMatch<'_>> {
    let candidates = [
        find_command(text, offset),
        find_script(text, offset, math),
        find_math(text, offset),
    ];

    candidates
        .into_iter()
        .flatten()
        .min_by_key(|m| (m.start, m.kind()))
}

/// Match a script suffix starting exactly at `pos`
pub fn script_at(text: &str, pos: usize, math: bool) -> Option<LexMatch<'_>> {
    let rest = text.get(pos..)?;
    let slot = match rest.chars().next()? {
        '_' => ScriptSlot::Subscript,
        '^' => ScriptSlot::Superscript,
        _ => return None,
    };
    let after = pos + 1;

    if text[after..].starts_with('{') {
        let close = matching_brace(text, after)?;
        return Some(LexMatch {
            start: pos,
            end: close + 1,
            token: Token::Script {
                slot,
                content: &text[after + 1..close],
            },
        });
    }

    if !math {
        return None;
    }

    let end = if text[after..].starts_with('\\') {
        let name_len = text[after + 1..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len() - after - 1);
        if name_len == 0 {
            return None;
        }
        after + 1 + name_len
    } else {
        let c = text[after..].chars().next()?;
        if c.is_whitespace() || c == '{' || c == '}' {
            return None;
        }
        after + c.len_utf8()
    };

    Some(LexMatch {
        start: pos,
        end,
        token: Token::Script {
            slot,
            content: &text[after..end],
        },
    })
}

fn find_command(text: &str, offset: usize) -> Option<LexMatch<'_>> {
    let head = COMMAND_HEAD.find_at(text, offset)?;
    let name = &text[head.start() + 1..head.end()];
    let mut end = head.end();
    let mut optional = Vec::new();
    let mut required = Vec::new();

    let letters = name.starts_with(|c: char| c.is_ascii_alphabetic());
    if letters && !is_sizing_command(name) {
        // A star counts only when it introduces arguments; otherwise it is text
        if text[end..].starts_with('*') && next_argument(text, end + 1).is_some() {
            end += 1;
        }
        while let Some((arg, arg_end, is_optional)) = next_argument(text, end) {
            if is_optional {
                optional.push(arg);
            } else {
                required.push(arg);
            }
            end = arg_end;
        }
    }

    Some(LexMatch {
        start: head.start(),
        end,
        token: Token::Command(CommandMatch {
            name,
            name_end: head.end(),
            optional,
            required,
        }),
    })
}

/// The next `[...]` group directly at `pos`, or `{...}` group after optional
/// whitespace.
///
/// Returns the inner text, the offset past the group and whether it was a
/// bracket group. `None` when no complete group follows.
fn next_argument(text: &str, pos: usize) -> Option<(&str, usize, bool)> {
    let rest = &text[pos..];
    let skipped = rest.len() - rest.trim_start().len();
    let open = pos + skipped;

    match text[open..].chars().next()? {
        // `\in [0, 1]` is an interval, not an option
        '[' if skipped == 0 => {
            let close = open + text[open..].find(']')?;
            Some((&text[open + 1..close], close + 1, true))
        }
        '{' => {
            let close = matching_brace(text, open)?;
            Some((&text[open + 1..close], close + 1, false))
        }
        _ => None,
    }
}

/// Offset of the `}` balancing the `{` at `open`, skipping escaped braces
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in text[open..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn find_script(text: &str, offset: usize, math: bool) -> Option<LexMatch<'_>> {
    let pattern: &Regex = if math { &BARE_SCRIPT } else { &BRACED_SCRIPT };
    let mut from = offset;
    while let Some(m) = pattern.find_at(text, from) {
        if let Some(script) = script_at(text, m.start(), math) {
            return Some(script);
        }
        // Unclosed brace: not a script, keep looking
        from = m.start() + 1;
    }
    None
}

fn find_math(text: &str, offset: usize) -> Option<LexMatch<'_>> {
    let patterns: [(&Regex, MatchKind); 4] = [
        (&INLINE_MATH, MatchKind::InlineMath),
        (&PAREN_MATH, MatchKind::InlineMath),
        (&DISPLAY_MATH, MatchKind::DisplayMath),
        (&DOUBLE_DOLLAR_MATH, MatchKind::DoubleDollarMath),
    ];

    patterns
        .into_iter()
        .filter_map(|(re, kind)| {
            let caps = re.captures_at(text, offset)?;
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            Some(LexMatch {
                start: whole.start(),
                end: whole.end(),
                token: Token::Math {
                    kind,
                    body: body.as_str(),
                },
            })
        })
        .min_by_key(|m| (m.start, m.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command<'a>(m: &'a LexMatch<'a>) -> &'a CommandMatch<'a> {
        match &m.token {
            Token::Command(c) => c,
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_next("plain text", 0, false), None);
    }

    #[test]
    fn test_command_with_arguments() {
        let m = find_next(r"see \sqrt[3]{x} now", 0, false).unwrap();
        assert_eq!(m.kind(), MatchKind::Command);
        assert_eq!(m.start, 4);
        assert_eq!(m.end, 15);
        let c = command(&m);
        assert_eq!(c.name, "sqrt");
        assert_eq!(c.optional, vec!["3"]);
        assert_eq!(c.required, vec!["x"]);
    }

    #[test]
    fn test_nested_braces_in_argument() {
        let m = find_next(r"\cmd{a{b}c}", 0, false).unwrap();
        assert_eq!(command(&m).required, vec!["a{b}c"]);
        assert_eq!(m.end, 11);
    }

    #[test]
    fn test_unbalanced_argument_stops_extraction() {
        let m = find_next(r"\frac{a}{b", 0, false).unwrap();
        let c = command(&m);
        assert_eq!(c.required, vec!["a"]);
        assert_eq!(m.end, 8);
    }

    #[test]
    fn test_symbol_command_takes_no_arguments() {
        let m = find_next(r"a\\{b}", 0, false).unwrap();
        let c = command(&m);
        assert_eq!(c.name, "\\");
        assert!(c.required.is_empty());
        assert_eq!(m.end, 3);
    }

    #[test]
    fn test_sizing_command_takes_no_arguments() {
        let m = find_next(r"\left[x\right]", 0, false).unwrap();
        let c = command(&m);
        assert_eq!(c.name, "left");
        assert!(c.optional.is_empty());
        assert_eq!(m.end, 5);
    }

    #[test]
    fn test_starred_command() {
        let m = find_next(r"\operatorname*{argmin}", 0, false).unwrap();
        let c = command(&m);
        assert_eq!(c.name, "operatorname");
        assert_eq!(c.required, vec!["argmin"]);
    }

    #[test]
    fn test_star_without_arguments_is_text() {
        let m = find_next(r"\alpha*\beta", 0, true).unwrap();
        assert_eq!(command(&m).name, "alpha");
        assert_eq!(m.end, 6);
    }

    #[test]
    fn test_spaced_bracket_is_not_an_option() {
        let m = find_next(r"\in [0, 1]", 0, true).unwrap();
        assert!(command(&m).optional.is_empty());
        assert_eq!(m.end, 3);

        let m = find_next(r"\frac {a} {b}", 0, true).unwrap();
        assert_eq!(command(&m).required, vec!["a", "b"]);
    }

    #[test]
    fn test_earliest_match_wins() {
        let m = find_next(r"x_{1} \alpha", 0, false).unwrap();
        assert_eq!(m.kind(), MatchKind::Subscript);
        assert_eq!(m.start, 1);

        let m = find_next(r"$a$ \alpha", 0, false).unwrap();
        assert_eq!(m.kind(), MatchKind::InlineMath);
    }

    #[test]
    fn test_double_dollar_beats_inline() {
        let m = find_next("$$x+1$$", 0, false).unwrap();
        assert_eq!(m.kind(), MatchKind::DoubleDollarMath);
        assert_eq!(m.token, Token::Math { kind: MatchKind::DoubleDollarMath, body: "x+1" });
    }

    #[test]
    fn test_display_math_needs_escape() {
        assert_eq!(find_next("[not math]", 0, false), None);
        let m = find_next(r"\[ x \]", 0, false).unwrap();
        assert_eq!(m.kind(), MatchKind::DisplayMath);
    }

    #[test]
    fn test_paren_math_is_inline() {
        let m = find_next(r"\(a\)", 0, false).unwrap();
        assert_eq!(m.kind(), MatchKind::InlineMath);
    }

    #[test]
    fn test_bare_scripts_only_in_math() {
        assert_eq!(find_next("x^2", 0, false), None);
        let m = find_next("x^2", 0, true).unwrap();
        assert_eq!(m.token, Token::Script { slot: ScriptSlot::Superscript, content: "2" });

        let m = find_next(r"x_\alpha", 0, true).unwrap();
        assert_eq!(m.token, Token::Script { slot: ScriptSlot::Subscript, content: r"\alpha" });
    }

    #[test]
    fn test_unclosed_script_is_skipped() {
        let m = find_next("a_{b c^{2}", 0, false).unwrap();
        assert_eq!(m.start, 6);
        assert_eq!(m.kind(), MatchKind::Superscript);
    }

    #[test]
    fn test_script_at() {
        assert!(script_at("x_{1}", 1, false).is_some());
        assert!(script_at("x_{1}", 0, false).is_none());
        assert!(script_at("x", 1, false).is_none());
    }

    #[test]
    fn test_offset_is_respected() {
        let m = find_next(r"\a \b", 2, false).unwrap();
        assert_eq!(m.start, 3);
    }
}
