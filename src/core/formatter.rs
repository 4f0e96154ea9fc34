//! Tree-to-text formatter
//!
//! Walks a parsed [`Node`] tree and renders it to plain text. Every command
//! is resolved through a [`RendererTable`]; a command with no entry is a hard
//! [`ConversionError::UnknownCommand`] unless
//! [`FormatOptions::passthrough_unknown`] is set. Unlisted one-argument
//! `\text..`/`\math..` commands render as their argument.
//!
//! ## Customizing
//!
//! ```rust
//! use llmlatex::{Formatter, Parser, Renderer};
//!
//! let formatter = Formatter::builder()
//!     .renderer("R", Renderer::symbol("ℝ"))
//!     .build();
//! let nodes = Parser::new().parse(r"\R");
//! assert_eq!(formatter.render(&nodes).unwrap(), "ℝ");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use tracing::debug;

use super::node::{CommandNode, EnvironmentNode, GroupKind, Node, ScriptSlot, TextNode};
use super::renderers;
use super::utils::{negate, normalize_math_spacing, push_script, ScriptStyle};
use crate::data::environments::{environment_style, is_math_environment, ColumnJoin};
use crate::data::known_names::KnownNames;
use crate::data::symbols::{
    ACCENT_COMMANDS, CHAR_COMMANDS, GREEK_LETTERS, MATH_SYMBOLS, NAMED_FUNCTIONS, SIZING_COMMANDS,
    SPACING_COMMANDS, TEXT_SYMBOLS, TEXT_WRAPPERS,
};
use crate::utils::error::{ConversionError, ConversionResult};

/// Signature of a built-in command renderer
pub type RenderFn = fn(&CommandNode, &Formatter) -> ConversionResult<String>;

/// Signature of a caller-supplied command renderer
pub type CustomRenderFn = dyn Fn(&CommandNode, &Formatter) -> ConversionResult<String> + Send + Sync;

// ============================================================================
// Renderers
// ============================================================================

/// How one command is turned into text
#[derive(Clone)]
pub enum Renderer {
    /// Fixed replacement, followed by any bracket arguments as written and
    /// the formatted brace arguments
    Symbol(Cow<'static, str>),
    /// Any bracket arguments as written, then the formatted arguments
    Wrapper,
    /// The first argument with a combining mark after each character
    Accent(char),
    /// A built-in function
    Function(RenderFn),
    /// A caller-supplied closure
    Custom(Arc<CustomRenderFn>),
}

impl Renderer {
    pub fn symbol(text: impl Into<Cow<'static, str>>) -> Self {
        Renderer::Symbol(text.into())
    }

    pub fn custom<F>(render: F) -> Self
    where
        F: Fn(&CommandNode, &Formatter) -> ConversionResult<String> + Send + Sync + 'static,
    {
        Renderer::Custom(Arc::new(render))
    }

    pub fn render(&self, node: &CommandNode, formatter: &Formatter) -> ConversionResult<String> {
        match self {
            Renderer::Symbol(text) => {
                let mut out = text.to_string();
                push_optional_arguments(&mut out, node);
                out.push_str(&formatter.format_arguments(node)?);
                Ok(out)
            }
            Renderer::Wrapper => {
                let mut out = String::new();
                push_optional_arguments(&mut out, node);
                out.push_str(&formatter.format_arguments(node)?);
                Ok(out)
            }
            Renderer::Accent(mark) => renderers::render_accent(node, *mark, formatter),
            Renderer::Function(render) => render(node, formatter),
            Renderer::Custom(render) => render(node, formatter),
        }
    }
}

/// Write bracket arguments back as literal `[...]`
fn push_optional_arguments(out: &mut String, node: &CommandNode) {
    for opt in &node.optional_arguments {
        out.push('[');
        out.push_str(opt);
        out.push(']');
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renderer::Symbol(text) => f.debug_tuple("Symbol").field(text).finish(),
            Renderer::Wrapper => write!(f, "Wrapper"),
            Renderer::Accent(mark) => f.debug_tuple("Accent").field(mark).finish(),
            Renderer::Function(_) => write!(f, "Function(..)"),
            Renderer::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

// ============================================================================
// Renderer Table
// ============================================================================

/// Command name to renderer mapping
#[derive(Debug, Clone, Default)]
pub struct RendererTable {
    renderers: FxHashMap<String, Renderer>,
}

lazy_static! {
    static ref DEFAULT_TABLE: Arc<RendererTable> = Arc::new(RendererTable::build_defaults());
    static ref DEFAULT_KNOWN_NAMES: Arc<KnownNames> = Arc::new(DEFAULT_TABLE.known_names());
}

/// Known names matching the default renderer table
pub fn default_known_names() -> Arc<KnownNames> {
    Arc::clone(&DEFAULT_KNOWN_NAMES)
}

impl RendererTable {
    /// A table with no renderers
    pub fn empty() -> Self {
        Self::default()
    }

    /// A copy of the built-in table
    pub fn defaults() -> Self {
        (**DEFAULT_TABLE).clone()
    }

    fn build_defaults() -> Self {
        let mut table = Self::empty();

        let symbols = GREEK_LETTERS
            .entries()
            .chain(MATH_SYMBOLS.entries())
            .map(|(name, text)| (*name, *text))
            .chain(TEXT_SYMBOLS.iter().map(|(name, text)| (*name, *text)))
            .chain(CHAR_COMMANDS.iter().map(|(name, text)| (*name, *text)))
            .chain(SPACING_COMMANDS.iter().map(|(name, text)| (*name, *text)));
        for (name, text) in symbols {
            table.insert(name, Renderer::symbol(text));
        }

        for name in NAMED_FUNCTIONS.iter() {
            table.insert(*name, Renderer::symbol(*name));
        }
        for name in SIZING_COMMANDS.iter() {
            table.insert(*name, Renderer::symbol(""));
        }
        for name in TEXT_WRAPPERS.iter() {
            table.insert(*name, Renderer::Wrapper);
        }
        for (name, mark) in ACCENT_COMMANDS.entries() {
            table.insert(*name, Renderer::Accent(*mark));
        }

        let functions: &[(&str, RenderFn)] = &[
            ("frac", renderers::render_frac),
            ("dfrac", renderers::render_frac),
            ("tfrac", renderers::render_frac),
            ("cfrac", renderers::render_frac),
            ("sqrt", renderers::render_sqrt),
            ("binom", renderers::render_binom),
            ("dbinom", renderers::render_binom),
            ("tbinom", renderers::render_binom),
            ("mathbb", renderers::render_mathbb),
            ("overset", renderers::render_overset),
            ("stackrel", renderers::render_overset),
            ("underset", renderers::render_underset),
            ("pmod", renderers::render_pmod),
            ("bmod", renderers::render_bmod),
            ("hspace", renderers::render_hspace),
            ("vspace", renderers::render_vspace),
            ("label", renderers::render_nothing),
            ("color", renderers::render_nothing),
            ("nonumber", renderers::render_nothing),
            ("notag", renderers::render_nothing),
            ("ref", renderers::render_first_argument),
            ("eqref", renderers::render_eqref),
            ("cite", renderers::render_cite),
            ("url", renderers::render_first_argument),
            ("href", renderers::render_href),
            ("footnote", renderers::render_footnote),
            ("item", renderers::render_item),
            ("textcolor", renderers::render_second_argument),
            ("colorbox", renderers::render_second_argument),
            ("tag", renderers::render_tag),
            ("not", renderers::render_not),
        ];
        for (name, render) in functions {
            table.insert(*name, Renderer::Function(*render));
        }

        table
    }

    /// Register a renderer, returning the one it replaces
    pub fn insert(&mut self, name: impl Into<String>, renderer: Renderer) -> Option<Renderer> {
        self.renderers.insert(name.into(), renderer)
    }

    pub fn get(&self, name: &str) -> Option<&Renderer> {
        self.renderers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// The parse-time vocabulary this table can render
    pub fn known_names(&self) -> KnownNames {
        KnownNames::from_table(self)
    }
}

impl Extend<(String, Renderer)> for RendererTable {
    fn extend<I: IntoIterator<Item = (String, Renderer)>>(&mut self, iter: I) {
        self.renderers.extend(iter);
    }
}

// ============================================================================
// Options
// ============================================================================

/// Output options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Join math children with spaces and normalize operator spacing
    pub math_spacing: bool,
    /// How scripts are written
    pub script_style: ScriptStyle,
    /// Render unknown commands as their arguments (or bare name) instead of failing
    pub passthrough_unknown: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            math_spacing: true,
            script_style: ScriptStyle::Braced,
            passthrough_unknown: false,
        }
    }
}

impl FormatOptions {
    /// Unicode scripts where possible, for display to people
    pub fn readable() -> Self {
        Self {
            script_style: ScriptStyle::Unicode,
            ..Self::default()
        }
    }

    /// Children concatenated as is, braced scripts
    pub fn literal() -> Self {
        Self {
            math_spacing: false,
            script_style: ScriptStyle::Braced,
            passthrough_unknown: false,
        }
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// Renders node trees with a frozen renderer table
#[derive(Debug, Clone)]
pub struct Formatter {
    table: Arc<RendererTable>,
    options: FormatOptions,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            table: Arc::clone(&DEFAULT_TABLE),
            options: FormatOptions::default(),
        }
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::default()
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn table(&self) -> &RendererTable {
        &self.table
    }

    /// Whether rendering a command with this name can succeed
    pub fn can_render(&self, name: &str) -> bool {
        self.options.passthrough_unknown || self.table.contains(name) || is_text_style_name(name)
    }

    /// Render a top-level node sequence
    pub fn render(&self, nodes: &[Node]) -> ConversionResult<String> {
        self.format_sequence(nodes, GroupKind::Any)
    }

    pub fn format_node(&self, node: &Node) -> ConversionResult<String> {
        match node {
            Node::Text(text) => {
                let mut out = text.content.clone();
                self.push_scripts(&mut out, node)?;
                Ok(out)
            }
            Node::Command(cmd) => {
                let mut out = self.format_command(cmd)?;
                self.push_scripts(&mut out, node)?;
                Ok(out)
            }
            Node::Group(group) => self.format_sequence(&group.content, group.kind),
            Node::Environment(env) => self.format_environment(env),
        }
    }

    /// Concatenate the formatted brace arguments of a command
    pub fn format_arguments(&self, node: &CommandNode) -> ConversionResult<String> {
        let mut out = String::new();
        for arg in &node.arguments {
            out.push_str(&self.format_node(arg)?);
        }
        Ok(out)
    }

    fn format_command(&self, cmd: &CommandNode) -> ConversionResult<String> {
        if let Some(renderer) = self.table.get(&cmd.name) {
            return renderer.render(cmd, self);
        }

        if cmd.arguments.len() == 1 && is_text_style_name(&cmd.name) {
            debug!(name = %cmd.name, "rendering unlisted text command as its argument");
            return self.format_arguments(cmd);
        }

        if self.options.passthrough_unknown {
            let mut out = if cmd.arguments.is_empty() && cmd.optional_arguments.is_empty() {
                cmd.name.clone()
            } else {
                String::new()
            };
            push_optional_arguments(&mut out, cmd);
            out.push_str(&self.format_arguments(cmd)?);
            return Ok(out);
        }

        debug!(name = %cmd.name, "no renderer registered for command");
        Err(ConversionError::unknown_command(&cmd.name))
    }

    fn push_scripts(&self, out: &mut String, node: &Node) -> ConversionResult<()> {
        let style = self.options.script_style;
        if let Some(sub) = node.subscript() {
            push_script(out, ScriptSlot::Subscript, &self.format_node(sub)?, style);
        }
        if let Some(sup) = node.superscript() {
            push_script(out, ScriptSlot::Superscript, &self.format_node(sup)?, style);
        }
        Ok(())
    }

    fn format_sequence(&self, nodes: &[Node], kind: GroupKind) -> ConversionResult<String> {
        let mut parts = Vec::with_capacity(nodes.len());
        let mut siblings = nodes.iter().peekable();
        while let Some(node) = siblings.next() {
            let part = match siblings.peek() {
                // `\not=` negates the sibling that follows it
                Some(next) if self.negates_next(node) => {
                    let negated = negate(&self.format_node(next)?);
                    siblings.next();
                    negated
                }
                _ => self.format_node(node)?,
            };
            if !part.is_empty() {
                parts.push(part);
            }
        }

        if kind.is_math() && self.options.math_spacing {
            Ok(normalize_math_spacing(&parts.join(" ")))
        } else {
            Ok(parts.concat())
        }
    }

    /// A bare `\not` with a renderer registered
    fn negates_next(&self, node: &Node) -> bool {
        match node {
            Node::Command(cmd) => {
                cmd.name == "not"
                    && cmd.arguments.is_empty()
                    && cmd.subscript.is_none()
                    && cmd.superscript.is_none()
                    && self.table.contains("not")
            }
            _ => false,
        }
    }

    /// Linearize a block: rows on separate lines, cells joined per style
    fn format_environment(&self, env: &EnvironmentNode) -> ConversionResult<String> {
        if !is_math_environment(&env.name) {
            let body = self.format_sequence(&env.content, GroupKind::Any)?;
            return Ok(body.trim().to_string());
        }

        let style = environment_style(&env.name);
        let mut rows = Vec::new();
        for row in split_rows(&env.content) {
            let mut cells = Vec::with_capacity(row.len());
            for cell in &row {
                let text = self.format_sequence(cell, GroupKind::Math)?;
                // a nested block keeps its rows on this line
                let text: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
                cells.push(text.join("; "));
            }

            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            let row = match style.columns {
                ColumnJoin::Space => cells
                    .into_iter()
                    .filter(|cell| !cell.is_empty())
                    .collect::<Vec<_>>()
                    .join(" "),
                ColumnJoin::Condition => join_condition(&cells),
            };
            if !row.is_empty() {
                rows.push(row);
            }
        }

        Ok(format!("{}{}{}", style.open, rows.join("\n"), style.close))
    }
}

/// Split block content into rows at `\\` and cells at unescaped `&`.
///
/// Only `&` in text leaves separates cells; `\&` is a command and stays put.
/// Scripts on a split leaf go with its last piece.
fn split_rows(content: &[Node]) -> Vec<Vec<Vec<Node>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = Vec::new();

    for node in content {
        match node {
            Node::Command(cmd) if cmd.name == "\\" => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            Node::Text(text) if text.content.contains('&') => {
                let mut pieces = text.content.split('&').peekable();
                while let Some(piece) = pieces.next() {
                    let last = pieces.peek().is_none();
                    let leaf = if last {
                        Node::Text(TextNode {
                            content: piece.to_string(),
                            ..text.clone()
                        })
                    } else {
                        Node::text(piece)
                    };
                    if !leaf.is_empty() {
                        cell.push(leaf);
                    }
                    if !last {
                        row.push(std::mem::take(&mut cell));
                    }
                }
            }
            other => cell.push(other.clone()),
        }
    }

    row.push(cell);
    rows.push(row);
    rows
}

/// Unlisted font and text commands (`\textfrak`, `\mathds`, ...)
fn is_text_style_name(name: &str) -> bool {
    name.len() > 4 && (name.starts_with("text") || name.starts_with("math"))
}

/// `value & condition` -> `value if condition`
fn join_condition(cells: &[&str]) -> String {
    let Some((value, rest)) = cells.split_first() else {
        return String::new();
    };
    let condition = rest
        .iter()
        .filter(|cell| !cell.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if condition.is_empty() {
        return value.to_string();
    }
    if condition == "otherwise" || condition == "else" {
        return format!("{} {}", value, condition);
    }
    let condition = condition.strip_prefix("if ").unwrap_or(&condition).trim_start();
    format!("{} if {}", value, condition)
}

// ============================================================================
// Builder
// ============================================================================

/// Merges caller overrides over the default table and freezes the result
#[derive(Debug, Clone, Default)]
pub struct FormatterBuilder {
    overrides: Vec<(String, Renderer)>,
    options: FormatOptions,
    without_defaults: bool,
}

impl FormatterBuilder {
    /// Add or replace the renderer for one command
    pub fn renderer(mut self, name: impl Into<String>, renderer: Renderer) -> Self {
        self.overrides.push((name.into(), renderer));
        self
    }

    /// Add or replace renderers in bulk
    pub fn overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, Renderer)>,
        S: Into<String>,
    {
        self.overrides
            .extend(overrides.into_iter().map(|(name, renderer)| (name.into(), renderer)));
        self
    }

    pub fn options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Start from an empty table instead of the built-in one
    pub fn without_defaults(mut self) -> Self {
        self.without_defaults = true;
        self
    }

    pub fn build(self) -> Formatter {
        let table = if self.without_defaults {
            let mut table = RendererTable::empty();
            table.extend(self.overrides);
            Arc::new(table)
        } else if self.overrides.is_empty() {
            Arc::clone(&DEFAULT_TABLE)
        } else {
            let mut table = RendererTable::defaults();
            table.extend(self.overrides);
            Arc::new(table)
        };

        Formatter {
            table,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::{GroupNode, TextNode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_renders_verbatim() {
        let f = Formatter::new();
        assert_eq!(f.render(&[Node::text("hello, world")]).unwrap(), "hello, world");
    }

    #[test]
    fn test_symbol_lookup() {
        let f = Formatter::new();
        assert_eq!(f.render(&[Node::command("alpha")]).unwrap(), "α");
        assert_eq!(f.render(&[Node::command("sin")]).unwrap(), "sin");
        assert_eq!(f.render(&[Node::command("left")]).unwrap(), "");
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let f = Formatter::new();
        let node = Node::Command(CommandNode::with_arguments("foo", vec![Node::text("x")]));
        let err = f.render(&[node]).unwrap_err();
        assert_eq!(err, ConversionError::unknown_command("foo"));
    }

    #[test]
    fn test_unlisted_text_command_renders_argument() {
        let f = Formatter::new();
        let node = Node::Command(CommandNode::with_arguments("textfrak", vec![Node::text("slanted")]));
        assert_eq!(f.render(&[node]).unwrap(), "slanted");
        assert!(f.can_render("mathds"));
    }

    #[test]
    fn test_passthrough_unknown() {
        let f = Formatter::with_options(FormatOptions {
            passthrough_unknown: true,
            ..FormatOptions::default()
        });
        let node = Node::Command(CommandNode::with_arguments("foo", vec![Node::text("x")]));
        assert_eq!(f.render(&[node]).unwrap(), "x");
        assert_eq!(f.render(&[Node::command("bar")]).unwrap(), "bar");
    }

    #[test]
    fn test_scripts() {
        let f = Formatter::new();
        let node = Node::text("x")
            .with_script(ScriptSlot::Subscript, Node::text("1"))
            .with_script(ScriptSlot::Superscript, Node::text("2"));
        assert_eq!(f.render(&[node.clone()]).unwrap(), "x_{1}^{2}");

        let unicode = Formatter::with_options(FormatOptions::readable());
        assert_eq!(unicode.render(&[node]).unwrap(), "x₁²");
    }

    #[test]
    fn test_command_scripts() {
        let f = Formatter::new();
        let node = Node::command("sum")
            .with_script(ScriptSlot::Subscript, Node::text("i"))
            .with_script(ScriptSlot::Superscript, Node::text("n"));
        assert_eq!(f.render(&[node]).unwrap(), "∑_{i}^{n}");
    }

    #[test]
    fn test_math_group_spacing() {
        let group = Node::Group(GroupNode::math(vec![
            Node::command("alpha"),
            Node::text("+"),
            Node::command("beta"),
        ]));
        assert_eq!(Formatter::new().render(&[group.clone()]).unwrap(), "α + β");
        let literal = Formatter::with_options(FormatOptions::literal());
        assert_eq!(literal.render(&[group]).unwrap(), "α+β");
    }

    #[test]
    fn test_empty_children_are_elided() {
        let group = Node::Group(GroupNode::math(vec![
            Node::text("a"),
            Node::Text(TextNode::empty()),
            Node::text("b"),
        ]));
        assert_eq!(Formatter::new().render(&[group]).unwrap(), "a b");
    }

    #[test]
    fn test_matrix_linearization() {
        let env = Node::Environment(EnvironmentNode::new(
            "pmatrix",
            vec![Node::text("a&b"), Node::command("\\"), Node::text("c&d")],
        ));
        assert_eq!(Formatter::new().render(&[env]).unwrap(), "(a b\nc d)");
    }

    #[test]
    fn test_cases_linearization() {
        let env = Node::Environment(EnvironmentNode::new(
            "cases",
            vec![
                Node::text("x&x>0"),
                Node::command("\\"),
                Node::text("0&"),
                Node::Command(CommandNode::with_arguments("text", vec![Node::text("otherwise")])),
            ],
        ));
        assert_eq!(Formatter::new().render(&[env]).unwrap(), "{ x if x > 0\n0 otherwise");
    }

    #[test]
    fn test_escaped_ampersand_stays_in_its_cell() {
        let env = Node::Environment(EnvironmentNode::new(
            "pmatrix",
            vec![Node::text("a"), Node::command("&"), Node::text("b&c")],
        ));
        assert_eq!(Formatter::new().render(&[env]).unwrap(), "(a & b c)");
    }

    #[test]
    fn test_nested_block_stays_in_its_cell() {
        let inner = Node::Environment(EnvironmentNode::new(
            "bmatrix",
            vec![Node::text("1&2"), Node::command("\\"), Node::text("3&4")],
        ));
        let outer = Node::Environment(EnvironmentNode::new("pmatrix", vec![inner, Node::text("&5")]));
        assert_eq!(Formatter::new().render(&[outer]).unwrap(), "([1 2; 3 4] 5)");
    }

    #[test]
    fn test_optional_arguments_are_kept() {
        let f = Formatter::new();
        let node = CommandNode::new("alpha").optional(vec!["1".into()]);
        assert_eq!(f.render(&[Node::Command(node)]).unwrap(), "α[1]");

        let node = CommandNode::with_arguments("textbf", vec![Node::text("x")]).optional(vec!["b".into()]);
        assert_eq!(f.render(&[Node::Command(node)]).unwrap(), "[b]x");
    }

    #[test]
    fn test_expression_group_is_spaced() {
        let group = Node::Group(GroupNode::expression(vec![Node::command("sin"), Node::text("x")]));
        assert_eq!(Formatter::new().render(&[group.clone()]).unwrap(), "sin x");
        let literal = Formatter::with_options(FormatOptions::literal());
        assert_eq!(literal.render(&[group]).unwrap(), "sinx");
    }

    #[test]
    fn test_not_negates_next_sibling() {
        let f = Formatter::new();
        let group = Node::Group(GroupNode::math(vec![
            Node::text("a"),
            Node::command("not"),
            Node::text("=b"),
        ]));
        assert_eq!(f.render(&[group]).unwrap(), "a ≠ b");

        let group = Node::Group(GroupNode::math(vec![
            Node::text("x"),
            Node::command("not"),
            Node::command("in"),
            Node::text("A"),
        ]));
        assert_eq!(f.render(&[group]).unwrap(), "x ∉ A");

        // nothing after it to negate
        assert_eq!(f.render(&[Node::command("not")]).unwrap(), "¬");
    }

    #[test]
    fn test_builder_overrides() {
        let f = Formatter::builder()
            .renderer("alpha", Renderer::symbol("a"))
            .renderer("shout", Renderer::custom(|node, f| Ok(f.format_arguments(node)?.to_uppercase())))
            .build();
        let nodes = vec![
            Node::command("alpha"),
            Node::Command(CommandNode::with_arguments("shout", vec![Node::text("hi")])),
        ];
        assert_eq!(f.render(&nodes).unwrap(), "aHI");
        assert!(f.can_render("beta"));
    }

    #[test]
    fn test_builder_without_defaults() {
        let f = Formatter::builder().without_defaults().build();
        assert!(f.table().is_empty());
        assert!(!f.can_render("alpha"));
    }

    #[test]
    fn test_default_known_names_cover_table() {
        let known = default_known_names();
        assert!(known.contains("frac"));
        assert!(known.contains("begin"));
        assert!(known.contains("\\"));
        assert!(known.contains("left"));
    }
}
