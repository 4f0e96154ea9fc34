//! Markup parser
//!
//! Turns text into a [`Node`] sequence in one left-to-right pass driven by
//! [`find_next`]. Parsing never fails: malformed constructs fall back to
//! literal text or are dropped.
//!
//! ## Recovery rules
//!
//! - With a [`KnownNames`] set configured, an unknown command name is cut
//!   back to its longest known prefix (`\sinx` becomes `\sin` plus `x`); a
//!   name with no known prefix, and any sizing command (`\left`, `\Big`, ...),
//!   is dropped and scanning resumes right after the name.
//! - A script with nothing before it that can carry it is dropped.
//! - An unterminated `\begin{..}` or an orphan `\end{..}` is dropped.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use super::lexer::{find_next, script_at, CommandMatch, LexMatch, Token};
use super::node::{CommandNode, EnvironmentNode, GroupKind, GroupNode, Node, ScriptSlot, TextNode};
use crate::data::environments::is_math_environment;
use crate::data::known_names::KnownNames;
use crate::data::symbols::{is_sizing_command, is_text_mode_command};

lazy_static! {
    static ref ENVIRONMENT_DELIMITER: Regex = Regex::new(r"\\(begin|end)\s*\{([^{}]*)\}").unwrap();
}

/// Markup parser, optionally backed by a known-names vocabulary
#[derive(Debug, Clone, Default)]
pub struct Parser {
    known: Option<Arc<KnownNames>>,
}

impl Parser {
    /// A parser that accepts every lexically matched command name as is
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser that resolves command names against `known`
    pub fn with_known_names(known: Arc<KnownNames>) -> Self {
        Self { known: Some(known) }
    }

    pub fn known_names(&self) -> Option<&KnownNames> {
        self.known.as_deref()
    }

    /// Parse running text
    pub fn parse(&self, text: &str) -> Vec<Node> {
        self.parse_mode(text, false)
    }

    fn parse_mode(&self, text: &str, math: bool) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let Some(m) = find_next(text, pos, math) else {
                push_node(&mut nodes, Node::text(&text[pos..]));
                break;
            };

            if m.start > pos {
                let leaf = Node::text(&text[pos..m.start]);
                let (leaf, after) = self.attach_scripts(leaf, text, m.start, math);
                push_node(&mut nodes, leaf);
                if after > m.start {
                    pos = after;
                    continue;
                }
            }

            pos = match &m.token {
                Token::Command(command) => self.parse_command(command, &m, text, math, &mut nodes),
                Token::Script { slot, content } => {
                    let script = self.parse_script(content, math);
                    attach_standalone(&mut nodes, *slot, script);
                    m.end
                }
                Token::Math { body, .. } => {
                    let body = body.trim();
                    if body.is_empty() {
                        trace!("dropping empty math region");
                        m.end
                    } else {
                        let node = self.parse_math_region(body);
                        let (node, after) = self.attach_scripts(node, text, m.end, math);
                        nodes.push(node);
                        after
                    }
                }
            };
        }

        nodes
    }

    /// Handle one command match and return the offset to resume from
    fn parse_command(
        &self,
        command: &CommandMatch<'_>,
        m: &LexMatch<'_>,
        text: &str,
        math: bool,
        nodes: &mut Vec<Node>,
    ) -> usize {
        let name = command.name;

        if let Some(known) = &self.known {
            if !known.contains(name) {
                match known.longest_known_prefix(name) {
                    Some(prefix) => {
                        trace!(name, prefix, "shortening unknown command to known prefix");
                        let node = Node::command(prefix);
                        let resume = m.start + 1 + prefix.len();
                        let (node, after) = self.attach_scripts(node, text, resume, math);
                        nodes.push(node);
                        return after;
                    }
                    None => {
                        trace!(name, "dropping unknown command");
                        return command.name_end;
                    }
                }
            }
            if is_sizing_command(name) {
                return command.name_end;
            }
        }

        match name {
            "begin" => return self.parse_environment(command, m, text, math, nodes),
            "end" => {
                trace!(environment = ?command.required.first(), "dropping unmatched end");
                return m.end;
            }
            _ => {}
        }

        let arg_math = math && !is_text_mode_command(name);
        let arguments = command
            .required
            .iter()
            .map(|arg| collapse(self.parse_mode(arg, arg_math), arg_math))
            .collect();
        let optional = command.optional.iter().map(|opt| opt.to_string()).collect();

        let node = Node::Command(CommandNode::with_arguments(name, arguments).optional(optional));
        let (node, after) = self.attach_scripts(node, text, m.end, math);
        nodes.push(node);
        after
    }

    fn parse_environment(
        &self,
        command: &CommandMatch<'_>,
        m: &LexMatch<'_>,
        text: &str,
        math: bool,
        nodes: &mut Vec<Node>,
    ) -> usize {
        let Some(name) = command.required.first().map(|n| n.trim()) else {
            return m.end;
        };

        let Some((body_end, after)) = find_environment_end(text, m.end, name) else {
            trace!(environment = name, "dropping unterminated environment");
            return m.end;
        };

        let body = &text[m.end..body_end];
        let math_body = math || is_math_environment(name);
        let mut content = self.parse_mode(body, math_body);
        if math_body {
            content = strip_math_whitespace(content);
        }

        nodes.push(Node::Environment(EnvironmentNode::new(name, content)));
        after
    }

    fn parse_math_region(&self, body: &str) -> Node {
        let mut content = strip_math_whitespace(self.parse_mode(body, true));
        if content.len() == 1 && matches!(content[0], Node::Environment(_)) {
            return content.remove(0);
        }
        Node::Group(GroupNode::math(content))
    }

    fn parse_script(&self, content: &str, math: bool) -> Node {
        collapse(self.parse_mode(content, math), math)
    }

    /// Attach every script immediately following `pos` to `node`.
    ///
    /// Returns the replacement node and the offset after the last script.
    /// A later script for an already filled slot replaces the earlier one.
    fn attach_scripts(&self, node: Node, text: &str, pos: usize, math: bool) -> (Node, usize) {
        let mut node = node;
        let mut pos = pos;

        while node.accepts_scripts() {
            let Some(script) = script_at(text, pos, math) else {
                break;
            };
            let Token::Script { slot, content } = script.token else {
                break;
            };
            node = node.with_script(slot, self.parse_script(content, math));
            pos = script.end;
        }

        (node, pos)
    }
}

/// Collapse an argument or script; math content keeps its tokens spaced apart
fn collapse(nodes: Vec<Node>, math: bool) -> Node {
    if math {
        Node::collapse_expression(nodes)
    } else {
        Node::collapse(nodes)
    }
}

/// Append a node, merging text into a preceding script-free text leaf
fn push_node(nodes: &mut Vec<Node>, node: Node) {
    match node {
        Node::Text(next) => {
            if let Some(Node::Text(prev)) = nodes.last_mut() {
                if prev.subscript.is_none() && prev.superscript.is_none() {
                    prev.content.push_str(&next.content);
                    prev.subscript = next.subscript;
                    prev.superscript = next.superscript;
                    return;
                }
            }
            nodes.push(Node::Text(next));
        }
        other => nodes.push(other),
    }
}

/// Attach a script found on its own to the node before it
fn attach_standalone(nodes: &mut Vec<Node>, slot: ScriptSlot, script: Node) {
    match nodes.pop() {
        Some(prev) if prev.accepts_scripts() => nodes.push(prev.with_script(slot, script)),
        Some(prev) => {
            trace!(?slot, "dropping script after a node that cannot carry it");
            nodes.push(prev);
        }
        None => trace!(?slot, "dropping script with nothing before it"),
    }
}

/// Find the `\end{name}` closing an environment whose body starts at `from`.
///
/// Returns the body end offset and the offset after the `\end{..}`.
fn find_environment_end(text: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    for caps in ENVIRONMENT_DELIMITER.captures_iter(&text[from..]) {
        if caps[2].trim() != name {
            continue;
        }
        let whole = caps.get(0)?;
        if &caps[1] == "begin" {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some((from + whole.start(), from + whole.end()));
            }
        }
    }
    None
}

/// Remove source whitespace from math content, keeping the arguments of
/// text-mode commands intact, and drop leaves left empty.
fn strip_math_whitespace(nodes: Vec<Node>) -> Vec<Node> {
    nodes
        .into_iter()
        .map(strip_node)
        .filter(|node| !node.is_empty())
        .collect()
}

fn strip_node(node: Node) -> Node {
    match node {
        Node::Text(text) => Node::Text(TextNode {
            content: text.content.chars().filter(|c| !c.is_whitespace()).collect(),
            subscript: text.subscript.map(|s| Box::new(strip_node(*s))),
            superscript: text.superscript.map(|s| Box::new(strip_node(*s))),
        }),
        Node::Command(cmd) => {
            let (arguments, optional_arguments) = if is_text_mode_command(&cmd.name) {
                (cmd.arguments, cmd.optional_arguments)
            } else {
                (
                    cmd.arguments.into_iter().map(strip_node).collect(),
                    cmd.optional_arguments
                        .into_iter()
                        .map(|opt| opt.chars().filter(|c| !c.is_whitespace()).collect())
                        .collect(),
                )
            };
            Node::Command(CommandNode {
                arguments,
                optional_arguments,
                subscript: cmd.subscript.map(|s| Box::new(strip_node(*s))),
                superscript: cmd.superscript.map(|s| Box::new(strip_node(*s))),
                ..cmd
            })
        }
        Node::Group(group) if group.kind == GroupKind::Expression => {
            Node::collapse_expression(strip_math_whitespace(group.content))
        }
        Node::Group(group) => Node::Group(GroupNode {
            content: strip_math_whitespace(group.content),
            kind: group.kind,
        }),
        Node::Environment(env) => Node::Environment(EnvironmentNode {
            content: strip_math_whitespace(env.content),
            name: env.name,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn known(names: &[&str]) -> Parser {
        Parser::with_known_names(Arc::new(KnownNames::new(names.iter().copied())))
    }

    #[test]
    fn test_plain_text_is_one_leaf() {
        let parser = Parser::new();
        assert_eq!(parser.parse("just words, no markup."), vec![Node::text("just words, no markup.")]);
        assert!(parser.parse("").is_empty());
    }

    #[test]
    fn test_command_with_nested_braces() {
        let nodes = Parser::new().parse(r"\cmd{a{b}c}");
        assert_eq!(nodes.len(), 1);
        let Node::Command(cmd) = &nodes[0] else {
            panic!("expected command");
        };
        assert_eq!(cmd.name, "cmd");
        assert_eq!(cmd.arguments, vec![Node::text("a{b}c")]);
    }

    #[test]
    fn test_scripts_attach_in_either_order() {
        let parser = Parser::new();
        let a = parser.parse("x_{1}^{2}");
        let b = parser.parse("x^{2}_{1}");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].subscript(), Some(&Node::text("1")));
        assert_eq!(a[0].superscript(), Some(&Node::text("2")));
    }

    #[test]
    fn test_scripts_attach_to_commands() {
        let nodes = Parser::new().parse(r"\alpha_{i}");
        assert_eq!(nodes, vec![Node::command("alpha").with_script(ScriptSlot::Subscript, Node::text("i"))]);
    }

    #[test]
    fn test_prefix_recovery() {
        let nodes = known(&["sin"]).parse(r"\sinx");
        assert_eq!(nodes, vec![Node::command("sin"), Node::text("x")]);
    }

    #[test]
    fn test_unknown_command_dropped() {
        let nodes = known(&["alpha"]).parse(r"a \zzz b");
        assert_eq!(nodes, vec![Node::text("a  b")]);
    }

    #[test]
    fn test_sizing_command_skipped() {
        let nodes = known(&["left", "right"]).parse(r"$\left(x\right)$");
        assert_eq!(nodes, vec![Node::Group(GroupNode::math(vec![Node::text("(x)")]))]);
    }

    #[test]
    fn test_without_known_names_every_name_is_kept() {
        let nodes = Parser::new().parse(r"\zzz");
        assert_eq!(nodes, vec![Node::command("zzz")]);
    }

    #[test]
    fn test_empty_argument_placeholder() {
        let nodes = Parser::new().parse(r"\frac{}{b}");
        let Node::Command(cmd) = &nodes[0] else {
            panic!("expected command");
        };
        assert_eq!(cmd.arguments, vec![Node::Text(TextNode::empty()), Node::text("b")]);
    }

    #[test]
    fn test_math_region_strips_spaces() {
        let nodes = Parser::new().parse("$ x + y $");
        assert_eq!(nodes, vec![Node::Group(GroupNode::math(vec![Node::text("x+y")]))]);
    }

    #[test]
    fn test_text_command_keeps_spaces_in_math() {
        let nodes = Parser::new().parse(r"$\text{if } x$");
        let Node::Group(group) = &nodes[0] else {
            panic!("expected group");
        };
        assert_eq!(
            group.content,
            vec![Node::Command(CommandNode::with_arguments("text", vec![Node::text("if ")])), Node::text("x")]
        );
    }

    #[test]
    fn test_math_argument_is_an_expression() {
        let nodes = Parser::new().parse(r"$\frac{\sin x}{x}$");
        let Node::Group(group) = &nodes[0] else {
            panic!("expected group");
        };
        let Node::Command(frac) = &group.content[0] else {
            panic!("expected command");
        };
        assert_eq!(
            frac.arguments[0],
            Node::Group(GroupNode::expression(vec![Node::command("sin"), Node::text("x")]))
        );

        // outside math a multi-node argument stays a plain group
        let nodes = Parser::new().parse(r"\textbf{\alpha x}");
        let Node::Command(bold) = &nodes[0] else {
            panic!("expected command");
        };
        assert_eq!(bold.arguments[0], Node::Group(GroupNode::new(vec![Node::command("alpha"), Node::text(" x")])));
    }

    #[test]
    fn test_star_without_arguments_stays_text() {
        let nodes = Parser::new().parse(r"$\alpha*\beta$");
        assert_eq!(
            nodes,
            vec![Node::Group(GroupNode::math(vec![Node::command("alpha"), Node::text("*"), Node::command("beta")]))]
        );
    }

    #[test]
    fn test_bare_scripts_in_math() {
        let nodes = Parser::new().parse("$x^2$");
        let Node::Group(group) = &nodes[0] else {
            panic!("expected group");
        };
        assert_eq!(group.content, vec![Node::text("x").with_script(ScriptSlot::Superscript, Node::text("2"))]);
    }

    #[test]
    fn test_standalone_script_dropped_after_group() {
        let nodes = Parser::new().parse("$x$^{2}");
        assert_eq!(nodes, vec![Node::Group(GroupNode::math(vec![Node::text("x")]))]);
    }

    #[test]
    fn test_leading_script_dropped() {
        assert_eq!(Parser::new().parse("^{2} x"), vec![Node::text(" x")]);
    }

    #[test]
    fn test_environment() {
        let nodes = Parser::new().parse(r"\begin{pmatrix} a & b \end{pmatrix}");
        assert_eq!(
            nodes,
            vec![Node::Environment(EnvironmentNode::new("pmatrix", vec![Node::text("a&b")]))]
        );
    }

    #[test]
    fn test_nested_environment_of_same_name() {
        let nodes = Parser::new().parse(r"\begin{matrix}\begin{matrix}a\end{matrix}\end{matrix}!");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1], Node::text("!"));
        let Node::Environment(outer) = &nodes[0] else {
            panic!("expected environment");
        };
        assert!(matches!(outer.content[0], Node::Environment(_)));
    }

    #[test]
    fn test_unterminated_environment_dropped() {
        let nodes = Parser::new().parse(r"\begin{cases} x");
        assert_eq!(nodes, vec![Node::text(" x")]);
        let nodes = Parser::new().parse(r"a\end{cases}");
        assert_eq!(nodes, vec![Node::text("a")]);
    }

    #[test]
    fn test_math_region_holding_only_an_environment() {
        let nodes = Parser::new().parse(r"$$\begin{bmatrix}1\end{bmatrix}$$");
        assert_eq!(
            nodes,
            vec![Node::Environment(EnvironmentNode::new("bmatrix", vec![Node::text("1")]))]
        );
    }

    #[test]
    fn test_unbalanced_argument_keeps_partial() {
        let nodes = Parser::new().parse(r"\frac{a}{b");
        let Node::Command(cmd) = &nodes[0] else {
            panic!("expected command");
        };
        assert_eq!(cmd.arguments, vec![Node::text("a")]);
        assert_eq!(nodes[1], Node::text("{b"));
    }
}
