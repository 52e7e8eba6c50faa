//! Labeled tree data structures
//!
//! Trees live in an arena: every branch, terminal and empty placeholder is a
//! [`Node`] addressed by a [`NodeId`]. A child keeps a back-reference to the
//! branch assembled over it, so [`Tree::parent`] is a field lookup. All
//! relational queries compare nodes by id, never by content, so two
//! separate "the" terminals stay distinguishable.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use thiserror::Error;
use tracing::trace;

use crate::projection::Parameters;

/// Unique identifier for a node within one [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error while assembling tree structure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),

    #[error("node {child} is already attached under {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("node {0} appears twice among the children")]
    DuplicateChild(NodeId),

    #[error("branch '{0}' needs at least one child")]
    NoChildren(String),
}

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Internal node with a label and ordered children
    Branch { label: String, children: Vec<NodeId> },
    /// Non-empty terminal string
    Terminal(String),
    /// Absent constituent; kept in the child list, dropped from derived views
    Empty,
}

/// A node in a labeled tree
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    /// Category of the phrase projected at this node, if it is a projection root
    pub category: Option<String>,
}

impl Node {
    fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            parent: None,
            category: None,
        }
    }
}

/// An arena of labeled trees
///
/// Any number of disconnected trees may share one arena; phrases built
/// separately are later attached under a common parent by id. Cloning the
/// arena produces a fully independent deep copy.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    parameters: Parameters,
}

impl Tree {
    /// Create a new empty tree with default X-bar parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty tree whose projections follow `parameters`
    pub fn with_parameters(parameters: Parameters) -> Self {
        Self {
            nodes: Vec::new(),
            parameters,
        }
    }

    pub fn parameters(&self) -> Parameters {
        self.parameters
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|node| &node.kind)
    }

    /// Label of a branch node
    pub fn label(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Branch { label, .. }) => Some(label),
            _ => None,
        }
    }

    /// Text of a terminal node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Terminal(text)) => Some(text),
            _ => None,
        }
    }

    /// Immediate children of a node; empty for terminals and placeholders
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.kind(id) {
            Some(NodeKind::Branch { children, .. }) => children,
            _ => &[],
        }
    }

    pub fn is_branch(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Branch { .. }))
    }

    pub fn is_empty_node(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Empty))
    }

    /// Add a terminal; the empty string becomes an [`NodeKind::Empty`] placeholder
    pub fn add_terminal(&mut self, text: impl Into<String>) -> NodeId {
        let text = text.into();
        if text.is_empty() {
            self.add_empty()
        } else {
            self.push(NodeKind::Terminal(text))
        }
    }

    /// Add an empty placeholder
    pub fn add_empty(&mut self) -> NodeId {
        self.push(NodeKind::Empty)
    }

    /// Add a branch over existing, still unattached nodes
    ///
    /// Each child gets this branch as its parent.
    pub fn add_branch(
        &mut self,
        label: impl Into<String>,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, TreeError> {
        let label = label.into();
        let children: Vec<NodeId> = children.into_iter().collect();
        if children.is_empty() {
            return Err(TreeError::NoChildren(label));
        }
        self.check_attachable(&children)?;
        Ok(self.push_branch(label, children))
    }

    /// Verify that every id exists, has no parent yet and appears once
    pub(crate) fn check_attachable(&self, ids: &[NodeId]) -> Result<(), TreeError> {
        let mut seen = FxHashSet::default();
        for &id in ids {
            let node = self.node(id).ok_or(TreeError::UnknownNode(id))?;
            if let Some(parent) = node.parent {
                return Err(TreeError::AlreadyAttached { child: id, parent });
            }
            if !seen.insert(id) {
                return Err(TreeError::DuplicateChild(id));
            }
        }
        Ok(())
    }

    pub(crate) fn mark_projection(&mut self, id: NodeId, category: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.category = Some(category.to_string());
        }
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, kind));
        id
    }

    fn push_branch(&mut self, label: String, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        for &child in &children {
            self.nodes[child.0].parent = Some(id);
        }
        trace!(%id, label = %label, arity = children.len(), "branch");
        self.nodes
            .push(Node::new(id, NodeKind::Branch { label, children }));
        id
    }

    /// Render a node as nested, tab-indented braces
    ///
    /// ```text
    /// NP {
    /// 	the
    /// 	N {
    /// 		dragon
    /// 	}
    /// }
    /// ```
    pub fn serialize(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(NodeKind::Branch { label, children }) => {
                let mut out = format!("{label} {{\n");
                for &child in children {
                    match self.kind(child) {
                        Some(NodeKind::Branch { .. }) => {
                            let nested = self.serialize(child);
                            let indented: Vec<String> =
                                nested.split('\n').map(|line| format!("\t{line}")).collect();
                            out.push_str(&indented.join("\n"));
                            out.push('\n');
                        }
                        Some(NodeKind::Terminal(text)) => {
                            out.push('\t');
                            out.push_str(text);
                            out.push('\n');
                        }
                        Some(NodeKind::Empty) | None => {}
                    }
                }
                out.push('}');
                out
            }
            Some(NodeKind::Terminal(text)) => text.clone(),
            Some(NodeKind::Empty) | None => String::new(),
        }
    }

    /// `Display` adaptor over [`Tree::serialize`]
    pub fn display(&self, id: NodeId) -> Rendered<'_> {
        Rendered { tree: self, id }
    }

    /// Terminal nodes below `id`, left to right; placeholders are skipped
    pub fn terminals(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_terminals(id, &mut out);
        out
    }

    fn collect_terminals(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            match self.kind(child) {
                Some(NodeKind::Branch { .. }) => self.collect_terminals(child, out),
                Some(NodeKind::Terminal(_)) => out.push(child),
                Some(NodeKind::Empty) | None => {}
            }
        }
    }

    /// Strings of [`Tree::terminals`]
    pub fn terminal_texts(&self, id: NodeId) -> Vec<&str> {
        self.terminals(id)
            .into_iter()
            .filter_map(|t| self.text(t))
            .collect()
    }

    /// Every strict descendant branch, preorder
    pub fn subtrees(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_subtrees(id, &mut out);
        out
    }

    fn collect_subtrees(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            if self.is_branch(child) {
                out.push(child);
                self.collect_subtrees(child, out);
            }
        }
    }

    /// Get the parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// The parent's other children, or `None` for a root
    pub fn sisters(&self, id: NodeId) -> Option<Vec<NodeId>> {
        let parent = self.parent(id)?;
        Some(
            self.children(parent)
                .iter()
                .copied()
                .filter(|&child| child != id)
                .collect(),
        )
    }

    /// The root of the tree containing `id`
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Compare the shape and content of two subtrees, possibly in different arenas
    pub fn subtree_eq(&self, a: NodeId, other: &Tree, b: NodeId) -> bool {
        match (self.kind(a), other.kind(b)) {
            (
                Some(NodeKind::Branch {
                    label: la,
                    children: ca,
                }),
                Some(NodeKind::Branch {
                    label: lb,
                    children: cb,
                }),
            ) => {
                la == lb
                    && ca.len() == cb.len()
                    && ca
                        .iter()
                        .zip(cb)
                        .all(|(&x, &y)| self.subtree_eq(x, other, y))
            }
            (Some(NodeKind::Terminal(x)), Some(NodeKind::Terminal(y))) => x == y,
            (Some(NodeKind::Empty), Some(NodeKind::Empty)) => true,
            _ => false,
        }
    }

    /// Rebuild the subtree at `root` inside `into`
    ///
    /// Nodes listed in `substitutions` are replaced by a terminal with the
    /// given text (the empty string yields a placeholder) instead of being
    /// copied. Projection markers are carried over. Returns the new root.
    pub fn copy_subtree(
        &self,
        root: NodeId,
        into: &mut Tree,
        substitutions: &FxHashMap<NodeId, String>,
    ) -> NodeId {
        if let Some(text) = substitutions.get(&root) {
            return into.add_terminal(text.as_str());
        }
        let copied = match self.kind(root) {
            Some(NodeKind::Branch { label, children }) => {
                let children: Vec<NodeId> = children
                    .iter()
                    .map(|&child| self.copy_subtree(child, into, substitutions))
                    .collect();
                into.push_branch(label.clone(), children)
            }
            Some(NodeKind::Terminal(text)) => into.add_terminal(text.as_str()),
            Some(NodeKind::Empty) | None => into.add_empty(),
        };
        if let Some(category) = self.node(root).and_then(|node| node.category.as_deref()) {
            into.mark_projection(copied, category);
        }
        copied
    }
}

/// A node rendered in the nested-brace format
pub struct Rendered<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tree.serialize(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sentence {
    ///     Subject { D { The } N { dog } }
    ///     Predicate { Verb { chases } Object { D { the } N { fox } } }
    /// }
    fn create_test_tree() -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let the_upper = tree.add_terminal("The");
        let dog = tree.add_terminal("dog");
        let d1 = tree.add_branch("D", [the_upper]).unwrap();
        let n1 = tree.add_branch("N", [dog]).unwrap();
        let subject = tree.add_branch("Subject", [d1, n1]).unwrap();

        let chases = tree.add_terminal("chases");
        let verb = tree.add_branch("Verb", [chases]).unwrap();
        let the = tree.add_terminal("the");
        let fox = tree.add_terminal("fox");
        let d2 = tree.add_branch("D", [the]).unwrap();
        let n2 = tree.add_branch("N", [fox]).unwrap();
        let object = tree.add_branch("Object", [d2, n2]).unwrap();
        let predicate = tree.add_branch("Predicate", [verb, object]).unwrap();

        let root = tree.add_branch("Sentence", [subject, predicate]).unwrap();
        (tree, root)
    }

    #[test]
    fn test_tree_creation() {
        let (tree, root) = create_test_tree();

        assert_eq!(tree.label(root), Some("Sentence"));
        assert_eq!(tree.children(root).len(), 2);
        let subject = tree.children(root)[0];
        assert_eq!(tree.parent(subject), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_serialize() {
        let mut tree = Tree::new();
        let the = tree.add_terminal("the");
        let dragon = tree.add_terminal("dragon");
        let n = tree.add_branch("N", [dragon]).unwrap();
        let np = tree.add_branch("NP", [the, n]).unwrap();

        assert_eq!(tree.serialize(np), "NP {\n\tthe\n\tN {\n\t\tdragon\n\t}\n}");
        assert_eq!(tree.display(np).to_string(), tree.serialize(np));
    }

    #[test]
    fn test_serialize_omits_placeholders() {
        let mut tree = Tree::new();
        let empty = tree.add_empty();
        let blank = tree.add_terminal("");
        let word = tree.add_terminal("onto");
        let p = tree.add_branch("P", [word]).unwrap();
        let pp = tree.add_branch("PP", [empty, blank, p]).unwrap();

        assert!(tree.is_empty_node(blank));
        assert_eq!(tree.serialize(pp), "PP {\n\tP {\n\t\tonto\n\t}\n}");
    }

    #[test]
    fn test_terminals_and_subtrees() {
        let (tree, root) = create_test_tree();

        assert_eq!(
            tree.terminal_texts(root),
            vec!["The", "dog", "chases", "the", "fox"]
        );
        let labels: Vec<_> = tree
            .subtrees(root)
            .into_iter()
            .filter_map(|id| tree.label(id))
            .collect();
        assert_eq!(
            labels,
            vec!["Subject", "D", "N", "Predicate", "Verb", "Object", "D", "N"]
        );
    }

    #[test]
    fn test_terminals_skip_empty() {
        let mut tree = Tree::new();
        let empty = tree.add_empty();
        let word = tree.add_terminal("sword");
        let n = tree.add_branch("N", [word]).unwrap();
        let np = tree.add_branch("NP", [empty, n]).unwrap();

        let terminals = tree.terminals(np);
        assert_eq!(terminals, vec![word]);
        assert!(!terminals.contains(&empty));
    }

    #[test]
    fn test_sisters() {
        let (tree, root) = create_test_tree();
        let subject = tree.children(root)[0];
        let predicate = tree.children(root)[1];

        assert_eq!(tree.sisters(subject), Some(vec![predicate]));
        assert_eq!(tree.sisters(root), None);
    }

    #[test]
    fn test_identical_terminals_are_distinct() {
        let mut tree = Tree::new();
        let first = tree.add_terminal("the");
        let second = tree.add_terminal("the");
        assert_ne!(first, second);
        assert!(tree.subtree_eq(first, &tree, second));
    }

    #[test]
    fn test_attach_errors() {
        let mut tree = Tree::new();
        let word = tree.add_terminal("dog");
        tree.add_branch("N", [word]).unwrap();

        assert!(matches!(
            tree.add_branch("N", [word]),
            Err(TreeError::AlreadyAttached { child, .. }) if child == word
        ));
        assert_eq!(
            tree.add_branch("X", [NodeId::new(99)]),
            Err(TreeError::UnknownNode(NodeId::new(99)))
        );
        assert_eq!(
            tree.add_branch("X", Vec::new()),
            Err(TreeError::NoChildren("X".to_string()))
        );

        let fresh = tree.add_terminal("cat");
        assert_eq!(
            tree.add_branch("N", [fresh, fresh]),
            Err(TreeError::DuplicateChild(fresh))
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let (tree, root) = create_test_tree();
        let mut copy = tree.clone();
        let extra = copy.add_terminal("quickly");
        copy.add_branch("Adv", [extra]).unwrap();

        assert_eq!(copy.len(), tree.len() + 2);
        assert!(tree.subtree_eq(root, &copy, root));
    }

    #[test]
    fn test_copy_subtree_with_substitution() {
        let (tree, root) = create_test_tree();
        let dog = tree.terminals(root)[1];
        let mut substitutions = FxHashMap::default();
        substitutions.insert(dog, "cat".to_string());

        let mut other = Tree::new();
        let copied = tree.copy_subtree(root, &mut other, &substitutions);

        assert_eq!(
            other.terminal_texts(copied),
            vec!["The", "cat", "chases", "the", "fox"]
        );
        assert_eq!(tree.text(dog), Some("dog"));
        assert_eq!(other.root_of(other.terminals(copied)[0]), copied);
    }
}
