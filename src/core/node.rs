//! Parsed document tree
//!
//! Nodes are immutable once built. Attaching a script consumes a node and
//! returns its replacement, so parents only ever hold finished children.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Which script slot a suffix fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptSlot {
    /// `_{...}`
    Subscript,
    /// `^{...}`
    Superscript,
}

impl ScriptSlot {
    /// The source marker character for this slot
    pub fn marker(self) -> char {
        match self {
            ScriptSlot::Subscript => '_',
            ScriptSlot::Superscript => '^',
        }
    }
}

/// Literal text between markup constructs
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TextNode {
    pub content: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub subscript: Option<Box<Node>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub superscript: Option<Box<Node>>,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            subscript: None,
            superscript: None,
        }
    }

    /// The empty placeholder used for arguments and scripts that parse to nothing
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One command invocation with its arguments already parsed
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CommandNode {
    /// Command name without the escape character
    pub name: String,
    /// Brace arguments, in source order
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub arguments: Vec<Node>,
    /// Bracket arguments as raw strings, in source order
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub optional_arguments: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub subscript: Option<Box<Node>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub superscript: Option<Box<Node>>,
}

impl CommandNode {
    /// A command with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_arguments(name: impl Into<String>, arguments: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            arguments,
            ..Self::default()
        }
    }

    /// Builder-style setter for bracket arguments
    pub fn optional(mut self, optional_arguments: Vec<String>) -> Self {
        self.optional_arguments = optional_arguments;
        self
    }

    /// The brace argument at `index`, if present
    pub fn argument(&self, index: usize) -> Option<&Node> {
        self.arguments.get(index)
    }

    /// The bracket argument at `index`, if present
    pub fn optional_argument(&self, index: usize) -> Option<&str> {
        self.optional_arguments.get(index).map(String::as_str)
    }
}

/// Where a group's children came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GroupKind {
    /// Free-form sibling sequence (e.g. a multi-node argument)
    #[default]
    Any,
    /// Contents of a `$...$`, `$$...$$`, `\[...\]` or `\(...\)` region
    Math,
    /// Multi-node argument or script parsed in math mode
    Expression,
}

impl GroupKind {
    /// Children are math tokens and get spaced apart when rendered
    pub fn is_math(self) -> bool {
        matches!(self, GroupKind::Math | GroupKind::Expression)
    }
}

/// A sequence of sibling nodes
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GroupNode {
    pub content: Vec<Node>,
    pub kind: GroupKind,
}

impl GroupNode {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            content,
            kind: GroupKind::Any,
        }
    }

    pub fn math(content: Vec<Node>) -> Self {
        Self {
            content,
            kind: GroupKind::Math,
        }
    }

    pub fn expression(content: Vec<Node>) -> Self {
        Self {
            content,
            kind: GroupKind::Expression,
        }
    }
}

/// A named `\begin{..}...\end{..}` block
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EnvironmentNode {
    pub name: String,
    pub content: Vec<Node>,
}

impl EnvironmentNode {
    pub fn new(name: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// A node of the parsed tree
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Node {
    Text(TextNode),
    Command(CommandNode),
    Group(GroupNode),
    Environment(EnvironmentNode),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(TextNode::new(content))
    }

    pub fn command(name: impl Into<String>) -> Self {
        Node::Command(CommandNode::new(name))
    }

    /// Collapse a parsed sequence into one node: a single node stays as is,
    /// several are wrapped in a free-form group, nothing becomes the empty
    /// placeholder.
    pub fn collapse(mut nodes: Vec<Node>) -> Self {
        match nodes.len() {
            0 => Node::Text(TextNode::empty()),
            1 => nodes.remove(0),
            _ => Node::Group(GroupNode::new(nodes)),
        }
    }

    /// Like [`Node::collapse`], but several nodes form an expression group
    pub fn collapse_expression(mut nodes: Vec<Node>) -> Self {
        match nodes.len() {
            0 => Node::Text(TextNode::empty()),
            1 => nodes.remove(0),
            _ => Node::Group(GroupNode::expression(nodes)),
        }
    }

    /// Only text leaves and commands own script slots
    pub fn accepts_scripts(&self) -> bool {
        matches!(self, Node::Text(_) | Node::Command(_))
    }

    /// Return a replacement node with `script` placed in `slot`.
    ///
    /// Nodes that cannot carry scripts are returned unchanged and the script
    /// is discarded.
    pub fn with_script(self, slot: ScriptSlot, script: Node) -> Node {
        let script = Some(Box::new(script));
        match (self, slot) {
            (Node::Text(text), ScriptSlot::Subscript) => Node::Text(TextNode {
                subscript: script,
                ..text
            }),
            (Node::Text(text), ScriptSlot::Superscript) => Node::Text(TextNode {
                superscript: script,
                ..text
            }),
            (Node::Command(cmd), ScriptSlot::Subscript) => Node::Command(CommandNode {
                subscript: script,
                ..cmd
            }),
            (Node::Command(cmd), ScriptSlot::Superscript) => Node::Command(CommandNode {
                superscript: script,
                ..cmd
            }),
            (other, _) => other,
        }
    }

    pub fn subscript(&self) -> Option<&Node> {
        match self {
            Node::Text(t) => t.subscript.as_deref(),
            Node::Command(c) => c.subscript.as_deref(),
            _ => None,
        }
    }

    pub fn superscript(&self) -> Option<&Node> {
        match self {
            Node::Text(t) => t.superscript.as_deref(),
            Node::Command(c) => c.superscript.as_deref(),
            _ => None,
        }
    }

    /// True for the empty text placeholder without scripts
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Text(t) => t.content.is_empty() && t.subscript.is_none() && t.superscript.is_none(),
            Node::Group(g) => g.content.iter().all(Node::is_empty),
            _ => false,
        }
    }

    /// Rebuild markup source for this node.
    ///
    /// Bracket arguments are emitted before brace arguments, so interleaved
    /// source order is not preserved, but re-parsing the result yields an
    /// equivalent tree.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&t.content),
            Node::Command(c) => {
                out.push('\\');
                out.push_str(&c.name);
                for opt in &c.optional_arguments {
                    out.push('[');
                    out.push_str(opt);
                    out.push(']');
                }
                for arg in &c.arguments {
                    out.push('{');
                    arg.write_source(out);
                    out.push('}');
                }
            }
            Node::Group(g) => {
                let math = g.kind == GroupKind::Math;
                if math {
                    out.push('$');
                }
                write_children(&g.content, out);
                if math {
                    out.push('$');
                }
            }
            Node::Environment(e) => {
                out.push_str("\\begin{");
                out.push_str(&e.name);
                out.push('}');
                write_children(&e.content, out);
                out.push_str("\\end{");
                out.push_str(&e.name);
                out.push('}');
            }
        }

        for (slot, script) in [
            (ScriptSlot::Subscript, self.subscript()),
            (ScriptSlot::Superscript, self.superscript()),
        ] {
            if let Some(script) = script {
                out.push(slot.marker());
                out.push('{');
                script.write_source(out);
                out.push('}');
            }
        }
    }

    /// Add the name of every command in this subtree, including those in
    /// arguments and scripts, to `names`.
    pub fn collect_command_names(&self, names: &mut BTreeSet<String>) {
        match self {
            Node::Text(_) => {}
            Node::Command(c) => {
                names.insert(c.name.clone());
                for arg in &c.arguments {
                    arg.collect_command_names(names);
                }
            }
            Node::Group(g) => {
                for child in &g.content {
                    child.collect_command_names(names);
                }
            }
            Node::Environment(e) => {
                for child in &e.content {
                    child.collect_command_names(names);
                }
            }
        }
        if let Some(sub) = self.subscript() {
            sub.collect_command_names(names);
        }
        if let Some(sup) = self.superscript() {
            sup.collect_command_names(names);
        }
    }
}

/// Rebuild markup source for a parsed sequence
pub fn sequence_to_source(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_children(nodes, &mut out);
    out
}

/// Write sibling nodes back to back. A bare letter command is separated
/// from a following letter so the name does not absorb it; math content
/// has no source spaces left to do that.
fn write_children(children: &[Node], out: &mut String) {
    let mut after_letter_command = false;
    for child in children {
        let source = child.to_source();
        if after_letter_command && source.starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.push(' ');
        }
        out.push_str(&source);
        after_letter_command = is_bare_letter_command(child);
    }
}

fn is_bare_letter_command(node: &Node) -> bool {
    match node {
        Node::Command(c) => {
            c.arguments.is_empty()
                && c.optional_arguments.is_empty()
                && c.subscript.is_none()
                && c.superscript.is_none()
                && c.name.ends_with(|ch: char| ch.is_ascii_alphabetic())
        }
        _ => false,
    }
}

impl From<TextNode> for Node {
    fn from(node: TextNode) -> Self {
        Node::Text(node)
    }
}

impl From<CommandNode> for Node {
    fn from(node: CommandNode) -> Self {
        Node::Command(node)
    }
}

impl From<GroupNode> for Node {
    fn from(node: GroupNode) -> Self {
        Node::Group(node)
    }
}

impl From<EnvironmentNode> for Node {
    fn from(node: EnvironmentNode) -> Self {
        Node::Environment(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        assert_eq!(Node::collapse(vec![]), Node::Text(TextNode::empty()));
        assert_eq!(Node::collapse(vec![Node::text("a")]), Node::text("a"));
        let group = Node::collapse(vec![Node::text("a"), Node::command("b")]);
        assert!(matches!(group, Node::Group(ref g) if g.content.len() == 2));

        let group = Node::collapse_expression(vec![Node::command("sin"), Node::text("x")]);
        assert!(matches!(group, Node::Group(ref g) if g.kind == GroupKind::Expression));
        assert_eq!(Node::collapse_expression(vec![Node::text("a")]), Node::text("a"));
    }

    #[test]
    fn test_with_script_is_independent_per_slot() {
        let node = Node::text("x")
            .with_script(ScriptSlot::Superscript, Node::text("2"))
            .with_script(ScriptSlot::Subscript, Node::text("1"));
        assert_eq!(node.subscript(), Some(&Node::text("1")));
        assert_eq!(node.superscript(), Some(&Node::text("2")));
    }

    #[test]
    fn test_group_drops_script() {
        let group = Node::Group(GroupNode::math(vec![Node::text("x")]));
        let same = group.clone().with_script(ScriptSlot::Subscript, Node::text("1"));
        assert_eq!(group, same);
        assert!(!group.accepts_scripts());
    }

    #[test]
    fn test_to_source() {
        let frac = CommandNode::with_arguments("frac", vec![Node::text("a"), Node::text("b")]);
        let node = Node::Command(frac).with_script(ScriptSlot::Superscript, Node::text("2"));
        assert_eq!(node.to_source(), r"\frac{a}{b}^{2}");

        let sqrt = CommandNode::with_arguments("sqrt", vec![Node::text("x")]).optional(vec!["3".into()]);
        assert_eq!(Node::Command(sqrt).to_source(), r"\sqrt[3]{x}");
    }

    #[test]
    fn test_to_source_separates_letter_commands() {
        let group = Node::Group(GroupNode::math(vec![Node::command("alpha"), Node::text("x")]));
        assert_eq!(group.to_source(), r"$\alpha x$");

        let group = Node::Group(GroupNode::math(vec![Node::command("alpha"), Node::text("+x")]));
        assert_eq!(group.to_source(), r"$\alpha+x$");

        let sequence = [Node::command("alpha"), Node::text("x")];
        assert_eq!(sequence_to_source(&sequence), r"\alpha x");
    }

    #[test]
    fn test_expression_argument_has_no_delimiters() {
        let numerator = Node::collapse_expression(vec![Node::command("sin"), Node::text("x")]);
        let frac = CommandNode::with_arguments("frac", vec![numerator, Node::text("x")]);
        assert_eq!(Node::Command(frac).to_source(), r"\frac{\sin x}{x}");
    }

    #[test]
    fn test_collect_command_names() {
        let inner = Node::command("alpha").with_script(ScriptSlot::Subscript, Node::command("beta"));
        let outer = Node::Command(CommandNode::with_arguments("frac", vec![inner, Node::text("2")]));
        let mut names = BTreeSet::new();
        outer.collect_command_names(&mut names);
        let names: Vec<_> = names.into_iter().collect();
        assert_eq!(names, vec!["alpha", "beta", "frac"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Node::Text(TextNode::empty()).is_empty());
        assert!(!Node::text("a").is_empty());
        assert!(!Node::command("alpha").is_empty());
    }
}
