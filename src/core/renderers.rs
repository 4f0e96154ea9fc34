//! Default command renderers
//!
//! Commands that need more than a symbol lookup: fractions, roots,
//! binomials, decorations and the document-level commands that show up
//! in model output (`\cite`, `\href`, `\item`, ...).

use super::formatter::Formatter;
use super::node::{CommandNode, ScriptSlot};
use super::utils::{negate, parenthesize, push_script};
use crate::data::symbols::DOUBLE_STRUCK;
use crate::utils::error::ConversionResult;

/// Format the brace argument at `index`, or `None` when it is absent
fn argument(node: &CommandNode, index: usize, formatter: &Formatter) -> ConversionResult<Option<String>> {
    node.argument(index)
        .map(|arg| formatter.format_node(arg))
        .transpose()
}

// ============================================================================
// Fractions and roots
// ============================================================================

/// `\frac{a}{b}` -> `a/b`, parenthesizing compound operands
pub fn render_frac(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    match (argument(node, 0, formatter)?, argument(node, 1, formatter)?) {
        (Some(numerator), Some(denominator)) => {
            Ok(format!("{}/{}", parenthesize(&numerator), parenthesize(&denominator)))
        }
        _ => Ok(node.name.clone()),
    }
}

/// `\sqrt{x}` -> `√x`, `\sqrt[n]{x}` -> `x^(1/n)`
pub fn render_sqrt(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let radicand = argument(node, 0, formatter)?;

    match node.optional_argument(0).filter(|index| *index != "2") {
        None => Ok(match radicand {
            Some(x) => format!("√{}", parenthesize(&x)),
            None => "√".to_string(),
        }),
        Some(index) => Ok(match radicand {
            Some(x) => format!("{}^(1/{})", parenthesize(&x), index),
            None => format!("x^(1/{})", index),
        }),
    }
}

/// `\binom{n}{k}` -> `C(n, k)`
pub fn render_binom(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    match (argument(node, 0, formatter)?, argument(node, 1, formatter)?) {
        (Some(n), Some(k)) => Ok(format!("C({}, {})", n, k)),
        _ => Ok(node.name.clone()),
    }
}

// ============================================================================
// Letter styles and decorations
// ============================================================================

/// `\mathbb{R}` -> `ℝ`; characters without a double-struck form pass through
pub fn render_mathbb(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let content = argument(node, 0, formatter)?.unwrap_or_default();
    Ok(content
        .chars()
        .map(|c| DOUBLE_STRUCK.get(&c).copied().unwrap_or(c))
        .collect())
}

/// Apply a combining mark after every non-space character of the argument
pub fn render_accent(node: &CommandNode, mark: char, formatter: &Formatter) -> ConversionResult<String> {
    let content = argument(node, 0, formatter)?.unwrap_or_default();
    let mut out = String::with_capacity(content.len() * 2);
    for c in content.chars() {
        out.push(c);
        if !c.is_whitespace() {
            out.push(mark);
        }
    }
    Ok(out)
}

/// `\overset{a}{b}` and `\stackrel{a}{b}`: `b` carrying `a` as a superscript
pub fn render_overset(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    stacked(node, ScriptSlot::Superscript, formatter)
}

/// `\underset{a}{b}`: `b` carrying `a` as a subscript
pub fn render_underset(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    stacked(node, ScriptSlot::Subscript, formatter)
}

fn stacked(node: &CommandNode, slot: ScriptSlot, formatter: &Formatter) -> ConversionResult<String> {
    let script = argument(node, 0, formatter)?.unwrap_or_default();
    let mut out = argument(node, 1, formatter)?.unwrap_or_default();
    push_script(&mut out, slot, &script, formatter.options().script_style);
    Ok(out)
}

// ============================================================================
// Modular arithmetic
// ============================================================================

/// `a \pmod{n}` -> `a (mod n)`
pub fn render_pmod(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let modulus = argument(node, 0, formatter)?.unwrap_or_default();
    Ok(format!(" (mod {})", modulus))
}

pub fn render_bmod(_node: &CommandNode, _formatter: &Formatter) -> ConversionResult<String> {
    Ok(" mod ".to_string())
}

// ============================================================================
// Document commands
// ============================================================================

/// Commands that only affect layout or cross-referencing render nothing
pub fn render_nothing(_node: &CommandNode, _formatter: &Formatter) -> ConversionResult<String> {
    Ok(String::new())
}

pub fn render_hspace(_node: &CommandNode, _formatter: &Formatter) -> ConversionResult<String> {
    Ok(" ".to_string())
}

pub fn render_vspace(_node: &CommandNode, _formatter: &Formatter) -> ConversionResult<String> {
    Ok("\n".to_string())
}

/// `\ref{x}` and `\url{x}` -> `x`
pub fn render_first_argument(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    Ok(argument(node, 0, formatter)?.unwrap_or_default())
}

/// `\cite{key}` -> `[key]`
pub fn render_cite(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let key = argument(node, 0, formatter)?.unwrap_or_default();
    Ok(format!("[{}]", key))
}

/// `\eqref{eq}` -> `(eq)`
pub fn render_eqref(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let label = argument(node, 0, formatter)?.unwrap_or_default();
    Ok(format!("({})", label))
}

/// `\tag{1}` -> `(1)`
pub fn render_tag(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let label = argument(node, 0, formatter)?.unwrap_or_default();
    Ok(format!(" ({})", label))
}

/// `\href{url}{text}` -> `text (url)`
pub fn render_href(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let url = argument(node, 0, formatter)?.unwrap_or_default();
    match argument(node, 1, formatter)? {
        Some(text) if !text.is_empty() && text != url => Ok(format!("{} ({})", text, url)),
        _ => Ok(url),
    }
}

/// `\footnote{x}` -> ` (x)`
pub fn render_footnote(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    let note = argument(node, 0, formatter)?.unwrap_or_default();
    Ok(format!(" ({})", note))
}

/// `\item` -> a bullet, or the bracket label when one is given
pub fn render_item(node: &CommandNode, _formatter: &Formatter) -> ConversionResult<String> {
    match node.optional_argument(0) {
        Some(label) => Ok(format!("{} ", label)),
        None => Ok("• ".to_string()),
    }
}

/// `\not{=}` -> `≠`; a bare `\not` is resolved against its next sibling by
/// the formatter, so one reaching here has nothing to negate
pub fn render_not(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    match argument(node, 0, formatter)? {
        Some(operand) if !operand.is_empty() => Ok(negate(&operand)),
        _ => Ok("¬".to_string()),
    }
}

/// `\textcolor{red}{x}` and `\colorbox{red}{x}` -> `x`
pub fn render_second_argument(node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
    Ok(argument(node, 1, formatter)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::Node;
    use pretty_assertions::assert_eq;

    fn cmd(name: &str, args: &[&str]) -> CommandNode {
        CommandNode::with_arguments(name, args.iter().map(|a| Node::text(*a)).collect())
    }

    #[test]
    fn test_not_with_argument() {
        let f = Formatter::default();
        assert_eq!(render_not(&cmd("not", &["="]), &f).unwrap(), "≠");
        assert_eq!(render_not(&cmd("not", &["P"]), &f).unwrap(), "P\u{0338}");
        assert_eq!(render_not(&cmd("not", &[]), &f).unwrap(), "¬");
    }

    #[test]
    fn test_frac() {
        let f = Formatter::default();
        assert_eq!(render_frac(&cmd("frac", &["a", "b"]), &f).unwrap(), "a/b");
        assert_eq!(render_frac(&cmd("frac", &["a+b", "c"]), &f).unwrap(), "(a+b)/c");
        assert_eq!(render_frac(&cmd("frac", &["1", "x y"]), &f).unwrap(), "1/(x y)");
        assert_eq!(render_frac(&cmd("frac", &["a"]), &f).unwrap(), "frac");
    }

    #[test]
    fn test_sqrt() {
        let f = Formatter::default();
        assert_eq!(render_sqrt(&cmd("sqrt", &["x"]), &f).unwrap(), "√x");
        assert_eq!(render_sqrt(&cmd("sqrt", &["x+1"]), &f).unwrap(), "√(x+1)");
        assert_eq!(render_sqrt(&cmd("sqrt", &[]), &f).unwrap(), "√");

        let cube = cmd("sqrt", &["x"]).optional(vec!["3".into()]);
        assert_eq!(render_sqrt(&cube, &f).unwrap(), "x^(1/3)");
        let square = cmd("sqrt", &["x"]).optional(vec!["2".into()]);
        assert_eq!(render_sqrt(&square, &f).unwrap(), "√x");
        let bare = cmd("sqrt", &[]).optional(vec!["n".into()]);
        assert_eq!(render_sqrt(&bare, &f).unwrap(), "x^(1/n)");
    }

    #[test]
    fn test_binom_and_mathbb() {
        let f = Formatter::default();
        assert_eq!(render_binom(&cmd("binom", &["n", "k"]), &f).unwrap(), "C(n, k)");
        assert_eq!(render_mathbb(&cmd("mathbb", &["R"]), &f).unwrap(), "ℝ");
        assert_eq!(render_mathbb(&cmd("mathbb", &["x"]), &f).unwrap(), "x");
    }

    #[test]
    fn test_accent_and_stacking() {
        let f = Formatter::default();
        assert_eq!(render_accent(&cmd("hat", &["x"]), '\u{0302}', &f).unwrap(), "x\u{0302}");
        assert_eq!(render_overset(&cmd("overset", &["def", "="]), &f).unwrap(), "=^{def}");
        assert_eq!(render_underset(&cmd("underset", &["n", "lim"]), &f).unwrap(), "lim_{n}");
    }

    #[test]
    fn test_document_commands() {
        let f = Formatter::default();
        assert_eq!(render_cite(&cmd("cite", &["knuth84"]), &f).unwrap(), "[knuth84]");
        assert_eq!(
            render_href(&cmd("href", &["https://x.org", "site"]), &f).unwrap(),
            "site (https://x.org)"
        );
        assert_eq!(render_item(&cmd("item", &[]), &f).unwrap(), "• ");
        assert_eq!(render_second_argument(&cmd("textcolor", &["red", "hot"]), &f).unwrap(), "hot");
        assert_eq!(render_pmod(&cmd("pmod", &["7"]), &f).unwrap(), " (mod 7)");
    }
}
