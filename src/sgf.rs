//! SGF (Smart Game Format) tokenizer, game tree arena and serializer.
//!
//! Records are parsed into a [`Collection`]: an arena of nodes addressed by
//! [`NodeId`], with one or more root nodes forming a forest. The first child
//! of a node is its principal continuation; later children are variations.
//!
//! The parser is tolerant. Structural defects (unbalanced parentheses, an
//! unterminated value, a stray `)`) are recorded and the forest built so far is
//! kept. A property is only committed once its closing `]` is seen, so a
//! truncated tail never corrupts nodes that were already complete.
//!
//! Only `SZ`, `AB`, `AW`, `B` and `W` are interpreted. Every other property is
//! carried opaquely so that serialization reproduces it.

use std::fmt;
use std::mem;

use tracing::debug;

use crate::error::{KifuError, Result};

/// Property identifiers the engine interprets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropIdent {
    /// `SZ`: board size.
    Size,
    /// `AB`: black setup stones.
    AddBlack,
    /// `AW`: white setup stones.
    AddWhite,
    /// `B`: black move.
    Black,
    /// `W`: white move.
    White,
    /// Anything else, kept verbatim for serialization.
    Other(String),
}

impl PropIdent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "SZ" => PropIdent::Size,
            "AB" => PropIdent::AddBlack,
            "AW" => PropIdent::AddWhite,
            "B" => PropIdent::Black,
            "W" => PropIdent::White,
            other => PropIdent::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropIdent::Size => "SZ",
            PropIdent::AddBlack => "AB",
            PropIdent::AddWhite => "AW",
            PropIdent::Black => "B",
            PropIdent::White => "W",
            PropIdent::Other(name) => name,
        }
    }
}

impl fmt::Display for PropIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One property with its (unescaped) values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub ident: PropIdent,
    pub values: Vec<String>,
}

/// The ordered property list of a node.
///
/// Identifiers are not required to be unique; accessors that read values
/// look at every occurrence in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<Property>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ident: PropIdent, values: Vec<String>) {
        self.0.push(Property { ident, values });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, ident: &PropIdent) -> bool {
        self.0.iter().any(|p| &p.ident == ident)
    }

    /// All values of every occurrence of `ident`, in order.
    pub fn values<'a>(&'a self, ident: &'a PropIdent) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |p| &p.ident == ident)
            .flat_map(|p| p.values.iter().map(String::as_str))
    }

    /// First value of the first occurrence of `ident`.
    pub fn first_value(&self, ident: &PropIdent) -> Option<&str> {
        self.0
            .iter()
            .find(|p| &p.ident == ident)
            .and_then(|p| p.values.first())
            .map(String::as_str)
    }

    pub fn size(&self) -> Option<&str> {
        self.first_value(&PropIdent::Size)
    }

    pub fn black_move(&self) -> Option<&str> {
        self.first_value(&PropIdent::Black)
    }

    pub fn white_move(&self) -> Option<&str> {
        self.first_value(&PropIdent::White)
    }

    fn last_mut(&mut self) -> Option<&mut Property> {
        self.0.last_mut()
    }

    pub(crate) fn write_sgf(&self, out: &mut String) {
        for prop in &self.0 {
            out.push_str(prop.ident.as_str());
            for value in &prop.values {
                out.push('[');
                for c in value.chars() {
                    if c == ']' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push(']');
            }
        }
    }
}

/// Index of a node inside a [`Collection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub properties: Properties,
    /// First child is the principal continuation.
    pub children: Vec<NodeId>,
}

/// A parsed SGF forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn first_root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when the forest has no game tree at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Append a node under `parent`, or as a new root when `parent` is `None`.
    pub fn add_node(&mut self, parent: Option<NodeId>, properties: Properties) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            properties,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Serialize the whole forest, variations included, without line breaks.
    pub fn to_sgf(&self) -> String {
        enum Step {
            Open(NodeId),
            Sequence(NodeId),
            Close,
        }

        let mut out = String::new();
        for &root in &self.roots {
            let mut stack = vec![Step::Open(root)];
            while let Some(step) = stack.pop() {
                match step {
                    Step::Open(id) => {
                        out.push('(');
                        stack.push(Step::Close);
                        stack.push(Step::Sequence(id));
                    }
                    Step::Close => out.push(')'),
                    Step::Sequence(mut id) => loop {
                        let node = self.node(id);
                        out.push(';');
                        node.properties.write_sgf(&mut out);
                        match node.children.as_slice() {
                            [] => break,
                            [only] => id = *only,
                            many => {
                                stack.extend(many.iter().rev().map(|&c| Step::Open(c)));
                                break;
                            }
                        }
                    },
                }
            }
        }
        out
    }
}

/// Where the value currently being read will land.
enum ValueTarget {
    New(PropIdent),
    Continue,
    Orphan,
}

struct OpenValue {
    start: usize,
    target: ValueTarget,
    buf: String,
    escaped: bool,
}

struct Parser {
    collection: Collection,
    /// Node each open `(` hangs under, restored on the matching `)`.
    stack: Vec<Option<NodeId>>,
    current: Option<NodeId>,
    node_open: bool,
    ident: String,
    can_continue: bool,
    value: Option<OpenValue>,
    issues: Vec<KifuError>,
}

impl Parser {
    fn new() -> Self {
        Self {
            collection: Collection::new(),
            stack: Vec::new(),
            current: None,
            node_open: false,
            ident: String::new(),
            can_continue: false,
            value: None,
            issues: Vec::new(),
        }
    }

    fn run(mut self, text: &str) -> (Collection, Vec<KifuError>) {
        for (offset, c) in text.char_indices() {
            if let Some(value) = self.value.as_mut() {
                if value.escaped {
                    value.buf.push(c);
                    value.escaped = false;
                } else if c == '\\' {
                    value.escaped = true;
                } else if c == ']' {
                    self.finish_value();
                } else {
                    value.buf.push(c);
                }
                continue;
            }

            match c {
                '(' => self.open_tree(),
                ')' => self.close_tree(offset),
                ';' => self.open_node(),
                '[' => self.open_value(offset),
                c if c.is_ascii_uppercase() => {
                    self.ident.push(c);
                    self.can_continue = false;
                }
                // Lowercase letters in long FF[3] names ("AddBlack") are skipped.
                c if c.is_ascii_lowercase() || c.is_whitespace() => {}
                other => {
                    debug!(offset, ch = %other, "skipping stray character");
                    self.ident.clear();
                    self.can_continue = false;
                }
            }
        }

        if let Some(value) = self.value.take() {
            self.issues
                .push(KifuError::UnterminatedValue { offset: value.start });
        }
        if !self.stack.is_empty() {
            self.issues.push(KifuError::UnclosedTree {
                depth: self.stack.len(),
            });
        }
        (self.collection, self.issues)
    }

    fn reset_property(&mut self) {
        self.ident.clear();
        self.can_continue = false;
    }

    fn open_tree(&mut self) {
        self.reset_property();
        self.stack.push(self.current);
        self.node_open = false;
    }

    fn close_tree(&mut self, offset: usize) {
        self.reset_property();
        match self.stack.pop() {
            Some(parent) => self.current = parent,
            None => self.issues.push(KifuError::UnexpectedClose { offset }),
        }
        self.node_open = false;
    }

    fn open_node(&mut self) {
        self.reset_property();
        if self.stack.is_empty() {
            // A node outside any tree starts an implicit one.
            self.stack.push(None);
            self.current = None;
        }
        let id = self.collection.add_node(self.current, Properties::new());
        self.current = Some(id);
        self.node_open = true;
    }

    fn open_value(&mut self, offset: usize) {
        let target = if !self.ident.is_empty() {
            ValueTarget::New(PropIdent::from_name(&mem::take(&mut self.ident)))
        } else if self.can_continue {
            ValueTarget::Continue
        } else {
            ValueTarget::Orphan
        };
        self.value = Some(OpenValue {
            start: offset,
            target,
            buf: String::new(),
            escaped: false,
        });
    }

    fn finish_value(&mut self) {
        let Some(value) = self.value.take() else {
            return;
        };
        let node = match self.current {
            Some(id) if self.node_open => id,
            _ => {
                debug!(offset = value.start, "ignoring property value outside a node");
                self.can_continue = false;
                return;
            }
        };
        let properties = &mut self.collection.node_mut(node).properties;
        match value.target {
            ValueTarget::New(ident) => {
                properties.push(ident, vec![value.buf]);
                self.can_continue = true;
            }
            ValueTarget::Continue => {
                if let Some(last) = properties.last_mut() {
                    last.values.push(value.buf);
                }
            }
            ValueTarget::Orphan => {
                debug!(offset = value.start, "ignoring value without identifier");
            }
        }
    }
}

/// Parse SGF text and also return every structural defect encountered.
pub fn parse_report(text: &str) -> (Collection, Vec<KifuError>) {
    Parser::new().run(text)
}

/// Parse SGF text, tolerating malformed input.
///
/// Never fails: defects are logged and the forest built so far is returned,
/// which may be empty.
pub fn parse(text: &str) -> Collection {
    let (collection, issues) = parse_report(text);
    for issue in &issues {
        debug!(%issue, "tolerated malformed record");
    }
    collection
}

/// Parse SGF text, rejecting any structural defect or an empty forest.
pub fn parse_strict(text: &str) -> Result<Collection> {
    let (collection, mut issues) = parse_report(text);
    if !issues.is_empty() {
        return Err(issues.swap_remove(0));
    }
    if collection.is_empty() {
        return Err(KifuError::EmptyInput);
    }
    Ok(collection)
}
