//! Rendering helpers shared by the formatter and the command renderers

use crate::core::node::ScriptSlot;
use crate::data::scripts::{to_subscript, to_superscript, SPECIAL_SUPERSCRIPTS};
use crate::data::symbols::NEGATIONS;

/// How rendered scripts are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScriptStyle {
    /// `x_{1}`, `x^{2}`
    #[default]
    Braced,
    /// `x₁`, `x²` where every character has a Unicode form
    Unicode,
}

// ============================================================================
// Parenthesization
// ============================================================================

const PAREN_OPERATORS: &[char] = &['+', '-', '*', '/', '^', '=', '<', '>', '≤', '≥', '±'];

/// Check whether a rendered operand must be parenthesized when placed next
/// to `/` or a root.
///
/// True when it holds an operator, an inner space, or a `)(` / `)/`
/// adjacency, unless the whole string is one balanced parenthesized group.
pub fn needs_parentheses(formatted: &str) -> bool {
    if formatted.is_empty() {
        return false;
    }

    if is_wrapped_in_parens(formatted) {
        return false;
    }

    if formatted.contains(PAREN_OPERATORS) {
        return true;
    }

    if formatted.trim().contains(' ') {
        return true;
    }

    formatted.contains(")/") || formatted.contains(")(")
}

/// `(...)` whose opening paren closes at the very last character
fn is_wrapped_in_parens(s: &str) -> bool {
    if !s.starts_with('(') || !s.ends_with(')') {
        return false;
    }
    let mut depth = 0i32;
    let last = s.len() - 1;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i < last {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Wrap `formatted` in parentheses if [`needs_parentheses`] says so
pub fn parenthesize(formatted: &str) -> String {
    if needs_parentheses(formatted) {
        format!("({})", formatted)
    } else {
        formatted.to_string()
    }
}

// ============================================================================
// Script output
// ============================================================================

/// Append a rendered script to `out`.
///
/// Single-symbol superscripts such as `∘` and `′` have fixed replacements;
/// otherwise the script is braced, or converted to Unicode when the style
/// asks for it and every character can be converted. Empty scripts vanish.
pub fn push_script(out: &mut String, slot: ScriptSlot, rendered: &str, style: ScriptStyle) {
    if rendered.is_empty() {
        return;
    }

    if slot == ScriptSlot::Superscript {
        if let Some(special) = SPECIAL_SUPERSCRIPTS.get(rendered) {
            out.push_str(special);
            return;
        }
    }

    if style == ScriptStyle::Unicode {
        let converted = match slot {
            ScriptSlot::Subscript => to_subscript(rendered),
            ScriptSlot::Superscript => to_superscript(rendered),
        };
        if let Some(converted) = converted {
            out.push_str(&converted);
            return;
        }
    }

    out.push(slot.marker());
    out.push('{');
    out.push_str(rendered);
    out.push('}');
}

/// Negate the first symbol of rendered text: `=` -> `≠`, `∈` -> `∉`, and a
/// combining long solidus (U+0338) after anything without a precomposed form
pub fn negate(rendered: &str) -> String {
    let operand = rendered.trim_start();
    let mut chars = operand.chars();
    let Some(first) = chars.next() else {
        return rendered.to_string();
    };

    let mut out = String::with_capacity(rendered.len() + 2);
    out.push_str(&rendered[..rendered.len() - operand.len()]);
    match NEGATIONS.get(&first) {
        Some(negated) => out.push(*negated),
        None => {
            out.push(first);
            out.push('\u{0338}');
        }
    }
    out.push_str(chars.as_str());
    out
}

// ============================================================================
// Math operator spacing
// ============================================================================

const SPACED_OPERATORS: &[char] = &[
    '+', '-', '=', '<', '>', '±', '∓', '×', '÷', '·', '≤', '≥', '≠', '≈', '≡', '→', '←', '↔', '⇒',
    '⇐', '⇔', '⟹', '⟸', '⟺', '∈', '∉', '⊂', '⊆', '⊃', '⊇', '∪', '∩', '∼', '≃', '≅', '∝', '↦',
];

/// Multi-character operators, longest first
const MULTI_CHAR_OPERATORS: &[&str] = &["<=>", "<->", "<=", ">=", "!=", "==", "->", "<-", "=>", ":="];

const UNARY_OPERATORS: &[&str] = &["+", "-", "±", "∓"];

fn is_open_bracket(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_close_bracket(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Length in chars of the operator token starting at `i`
fn operator_at(chars: &[char], i: usize) -> Option<usize> {
    for op in MULTI_CHAR_OPERATORS {
        let len = op.chars().count();
        if chars.len() >= i + len && op.chars().eq(chars[i..i + len].iter().copied()) {
            return Some(len);
        }
    }
    SPACED_OPERATORS.contains(&chars[i]).then_some(1)
}

fn trim_trailing_spaces(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
}

/// Normalize spacing in rendered math.
///
/// Binary operators get one space on each side, except on a side facing
/// the inside of a bracket. Signs in prefix position stay attached to their
/// operand. Whitespace runs collapse to one space (or one newline), no
/// whitespace is kept just inside brackets, and braced scripts are copied
/// unchanged.
pub fn normalize_math_spacing(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut after_operator = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if (c == '^' || c == '_') && chars.get(i + 1) == Some(&'{') {
            let end = closing_brace(&chars, i + 1).unwrap_or(chars.len() - 1);
            out.extend(&chars[i..=end]);
            after_operator = false;
            i = end + 1;
            continue;
        }

        if c.is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if chars[start..i].contains(&'\n') {
                trim_trailing_spaces(&mut out);
                out.push('\n');
            } else if let Some(last) = out.chars().last() {
                let next_closes = chars.get(i).copied().is_some_and(is_close_bracket);
                if last != ' ' && last != '\n' && !is_open_bracket(last) && !next_closes {
                    out.push(' ');
                }
            }
            continue;
        }

        if let Some(len) = operator_at(&chars, i) {
            let op: String = chars[i..i + len].iter().collect();
            i += len;

            let prev = out.trim_end_matches(' ').chars().last();
            let prefix_position = match prev {
                None => true,
                Some(p) => after_operator || is_open_bracket(p) || matches!(p, ',' | ';' | ':' | '&' | '\n'),
            };

            if prefix_position && UNARY_OPERATORS.contains(&op.as_str()) {
                out.push_str(&op);
            } else {
                trim_trailing_spaces(&mut out);
                if out.chars().last().is_some_and(|p| p != '\n' && !is_open_bracket(p)) {
                    out.push(' ');
                }
                out.push_str(&op);
                while i < chars.len() && chars[i] == ' ' {
                    i += 1;
                }
                if chars
                    .get(i)
                    .is_some_and(|&n| !is_close_bracket(n) && n != '\n')
                {
                    out.push(' ');
                }
            }
            after_operator = true;
            continue;
        }

        if is_close_bracket(c) {
            trim_trailing_spaces(&mut out);
        }
        out.push(c);
        after_operator = false;
        i += 1;
    }

    out.trim().to_string()
}

fn closing_brace(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &c) in chars[open..].iter().enumerate() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_negate() {
        assert_eq!(negate("=b"), "≠b");
        assert_eq!(negate(" ∈"), " ∉");
        assert_eq!(negate("P"), "P\u{0338}");
        assert_eq!(negate(""), "");
    }

    #[test]
    fn test_needs_parentheses_simple_operands() {
        assert!(!needs_parentheses("a"));
        assert!(!needs_parentheses("42"));
        assert!(!needs_parentheses("α"));
        assert!(!needs_parentheses(""));
    }

    #[test]
    fn test_needs_parentheses_operators_and_spaces() {
        assert!(needs_parentheses("a+b"));
        assert!(needs_parentheses("x^2"));
        assert!(needs_parentheses("a ≤ b"));
        assert!(needs_parentheses("sin x"));
        assert!(needs_parentheses("(a)(b)"));
        assert!(needs_parentheses("f(x)/2"));
    }

    #[test]
    fn test_needs_parentheses_wrapped_group() {
        assert!(!needs_parentheses("(a+b)"));
        assert!(!needs_parentheses("((a)(b))"));
        assert!(needs_parentheses("(a)+(b)"));
    }

    #[test]
    fn test_push_script_styles() {
        let mut out = String::from("x");
        push_script(&mut out, ScriptSlot::Superscript, "2", ScriptStyle::Braced);
        assert_eq!(out, "x^{2}");

        let mut out = String::from("x");
        push_script(&mut out, ScriptSlot::Superscript, "2", ScriptStyle::Unicode);
        assert_eq!(out, "x²");

        let mut out = String::from("x");
        push_script(&mut out, ScriptSlot::Subscript, "ij", ScriptStyle::Unicode);
        assert_eq!(out, "xᵢⱼ");
    }

    #[test]
    fn test_push_script_unicode_fallback() {
        let mut out = String::from("x");
        push_script(&mut out, ScriptSlot::Subscript, "q", ScriptStyle::Unicode);
        assert_eq!(out, "x_{q}");
    }

    #[test]
    fn test_push_script_special_superscripts() {
        let mut out = String::from("90");
        push_script(&mut out, ScriptSlot::Superscript, "∘", ScriptStyle::Braced);
        assert_eq!(out, "90°");

        let mut out = String::from("f");
        push_script(&mut out, ScriptSlot::Superscript, "′", ScriptStyle::Braced);
        assert_eq!(out, "f′");

        let mut out = String::from("x");
        push_script(&mut out, ScriptSlot::Subscript, "", ScriptStyle::Braced);
        assert_eq!(out, "x");
    }

    #[test]
    fn test_spacing_binary_operators() {
        assert_eq!(normalize_math_spacing("x+y=2"), "x + y = 2");
        assert_eq!(normalize_math_spacing("a≤b"), "a ≤ b");
        assert_eq!(normalize_math_spacing("α  +   β"), "α + β");
        assert_eq!(normalize_math_spacing("a<=b"), "a <= b");
    }

    #[test]
    fn test_spacing_unary_signs() {
        assert_eq!(normalize_math_spacing("-x+1"), "-x + 1");
        assert_eq!(normalize_math_spacing("x=-1"), "x = -1");
        assert_eq!(normalize_math_spacing("f(-x)"), "f(-x)");
        assert_eq!(normalize_math_spacing("a,-b"), "a,-b");
    }

    #[test]
    fn test_spacing_brackets() {
        assert_eq!(normalize_math_spacing("f( α )"), "f(α)");
        assert_eq!(normalize_math_spacing("(a+b)/c"), "(a + b)/c");
        assert_eq!(normalize_math_spacing("f(x)=1"), "f(x) = 1");
    }

    #[test]
    fn test_spacing_keeps_braced_scripts() {
        assert_eq!(normalize_math_spacing("x^{a+b}=1"), "x^{a+b} = 1");
        assert_eq!(normalize_math_spacing("x_{i-1}"), "x_{i-1}");
    }

    #[test]
    fn test_spacing_newlines() {
        assert_eq!(normalize_math_spacing("a=1 \n b=2"), "a = 1\nb = 2");
    }
}
