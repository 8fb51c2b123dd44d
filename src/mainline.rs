//! Main-line reduction: dropping every variation from a game tree.
//!
//! The main line follows the first child at each branch point. The walk is a
//! plain loop over the arena, so record length never grows the call stack.

use tracing::debug;

use crate::sgf::{self, Collection, NodeId, Properties};

/// A linear chain of nodes from the root to the end of the principal line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainLine {
    nodes: Vec<Properties>,
}

impl MainLine {
    pub fn nodes(&self) -> &[Properties] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Properties> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&Properties> {
        self.nodes.last()
    }

    /// Branch-free SGF text, properties in their original order, no line breaks.
    ///
    /// An empty line serializes to an empty string.
    pub fn to_sgf(&self) -> String {
        if self.nodes.is_empty() {
            return String::new();
        }
        let mut out = String::from("(");
        for props in &self.nodes {
            out.push(';');
            props.write_sgf(&mut out);
        }
        out.push(')');
        out
    }
}

impl From<MainLine> for Collection {
    fn from(line: MainLine) -> Self {
        let mut collection = Collection::new();
        let mut parent = None;
        for props in line.nodes {
            parent = Some(collection.add_node(parent, props));
        }
        collection
    }
}

/// Main line of the first game tree in the forest; empty if there is none.
pub fn reduce_to_main_line(collection: &Collection) -> MainLine {
    match collection.first_root() {
        Some(root) => main_line_from(collection, root),
        None => MainLine::default(),
    }
}

/// Main line starting at `root`.
pub fn main_line_from(collection: &Collection, root: NodeId) -> MainLine {
    let mut nodes = Vec::new();
    let mut cursor = Some(root);
    while let Some(id) = cursor {
        let node = collection.node(id);
        nodes.push(node.properties.clone());
        if node.children.len() > 1 {
            debug!(depth = nodes.len(), dropped = node.children.len() - 1, "dropping variations");
        }
        cursor = node.children.first().copied();
    }
    MainLine { nodes }
}

/// Serialize a main line as SGF text.
pub fn serialize(line: &MainLine) -> String {
    line.to_sgf()
}

/// Prune variations from every game tree of the forest.
pub fn prune_variations(collection: &Collection) -> Collection {
    let mut pruned = Collection::new();
    for &root in collection.roots() {
        let mut parent = None;
        for props in main_line_from(collection, root).nodes {
            parent = Some(pruned.add_node(parent, props));
        }
    }
    pruned
}

/// Re-serialize a record with every variation removed.
///
/// All game trees are kept, each reduced to its main line. Text that yields
/// no game tree at all is returned unchanged.
pub fn extract_main_route(text: &str) -> String {
    let collection = sgf::parse(text);
    if collection.is_empty() {
        return text.to_string();
    }
    prune_variations(&collection).to_sgf()
}
