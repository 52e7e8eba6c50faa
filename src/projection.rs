//! X-bar phrase projections
//!
//! A projection of category `X` is a branch labeled `XP` with two children,
//! the specifier and the X-bar chain. The chain is built from the head
//! outward: the head sits under a node labeled `X`, each complement adds an
//! `Xc'` level and each adjunct an `Xa'` level. Those two suffixes are the
//! only markers of intermediate levels, and the accessors rely on them.

use thiserror::Error;
use tracing::debug;

use crate::tree::{NodeId, Tree, TreeError};

/// Suffix of a complement bar level
pub const COMPLEMENT_BAR: &str = "c'";
/// Suffix of an adjunct bar level
pub const ADJUNCT_BAR: &str = "a'";

/// Which side of the head complements attach on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadParameter {
    /// `[X', complement]`
    #[default]
    HeadFirst,
    /// `[complement, X']`
    HeadLast,
}

/// Which side of the X-bar the specifier attaches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecParameter {
    /// `[specifier, X']`
    #[default]
    SpecFirst,
    /// `[X', specifier]`
    SpecLast,
}

/// Word-order parameters applied to every projection built in a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Parameters {
    pub head: HeadParameter,
    pub spec: SpecParameter,
}

/// The kind of constituent an accessor looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstituentKind {
    Complement,
    Adjunct,
}

impl ConstituentKind {
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            ConstituentKind::Complement => COMPLEMENT_BAR,
            ConstituentKind::Adjunct => ADJUNCT_BAR,
        }
    }
}

impl std::fmt::Display for ConstituentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstituentKind::Complement => write!(f, "complement"),
            ConstituentKind::Adjunct => write!(f, "adjunct"),
        }
    }
}

/// Error while building or inspecting a projection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("{phrase} has no {constituent}")]
    ConstituentAbsent {
        constituent: ConstituentKind,
        phrase: String,
    },

    #[error("node {0} is not a phrase projection")]
    NotAProjection(NodeId),

    #[error("unknown phrase category: {0}")]
    UnknownPhrase(String),

    #[error("no verb phrase under {0}")]
    NoVerbPhrase(String),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A constituent supplied to a [`Phrase`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constituent {
    /// A word or multi-word string, added as a new terminal
    Word(String),
    /// An existing, unattached node of the target tree
    Node(NodeId),
    /// An absent constituent
    Empty,
}

impl From<&str> for Constituent {
    fn from(text: &str) -> Self {
        Constituent::from(text.to_string())
    }
}

impl From<String> for Constituent {
    fn from(text: String) -> Self {
        if text.is_empty() {
            Constituent::Empty
        } else {
            Constituent::Word(text)
        }
    }
}

impl From<NodeId> for Constituent {
    fn from(id: NodeId) -> Self {
        Constituent::Node(id)
    }
}

impl From<&Projection> for Constituent {
    fn from(projection: &Projection) -> Self {
        Constituent::Node(projection.root)
    }
}

impl From<Projection> for Constituent {
    fn from(projection: Projection) -> Self {
        Constituent::Node(projection.root)
    }
}

impl<T: Into<Constituent>> From<Option<T>> for Constituent {
    fn from(value: Option<T>) -> Self {
        value.map_or(Constituent::Empty, Into::into)
    }
}

/// Handle on a built projection: its root node and category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Projection {
    root: NodeId,
    category: String,
}

impl Projection {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Label of the root node, `category + "P"`
    pub fn label(&self) -> String {
        format!("{}P", self.category)
    }

    pub(crate) fn bar_label(&self, kind: ConstituentKind) -> String {
        format!("{}{}", self.category, kind.suffix())
    }

    /// Is `label` the head level or one of the bar levels of this projection?
    pub(crate) fn is_chain_label(&self, label: &str) -> bool {
        label == self.category
            || label
                .strip_prefix(self.category.as_str())
                .is_some_and(|suffix| suffix == COMPLEMENT_BAR || suffix == ADJUNCT_BAR)
    }
}

impl From<&Projection> for NodeId {
    fn from(projection: &Projection) -> Self {
        projection.root
    }
}

/// Declarative description of a projection
///
/// ```
/// use xbar::{Phrase, Tree};
///
/// let mut tree = Tree::new();
/// let np = Phrase::new("N").head("sword").specifier("his").build(&mut tree).unwrap();
/// let pp = Phrase::new("P").head("onto").complement(&np).build(&mut tree).unwrap();
/// assert_eq!(tree.terminal_texts(pp.root()), vec!["onto", "his", "sword"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    category: String,
    head: Constituent,
    specifier: Constituent,
    complements: Vec<Constituent>,
    adjuncts: Vec<Constituent>,
}

impl Phrase {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            head: Constituent::Empty,
            specifier: Constituent::Empty,
            complements: Vec::new(),
            adjuncts: Vec::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn head(mut self, head: impl Into<Constituent>) -> Self {
        self.head = head.into();
        self
    }

    pub fn specifier(mut self, specifier: impl Into<Constituent>) -> Self {
        self.specifier = specifier.into();
        self
    }

    /// Append one complement; later complements attach higher
    pub fn complement(mut self, complement: impl Into<Constituent>) -> Self {
        self.complements.push(complement.into());
        self
    }

    pub fn complements<I, C>(mut self, complements: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Constituent>,
    {
        self.complements
            .extend(complements.into_iter().map(Into::into));
        self
    }

    /// Append one adjunct; adjuncts attach above all complements
    pub fn adjunct(mut self, adjunct: impl Into<Constituent>) -> Self {
        self.adjuncts.push(adjunct.into());
        self
    }

    pub fn adjuncts<I, C>(mut self, adjuncts: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Constituent>,
    {
        self.adjuncts.extend(adjuncts.into_iter().map(Into::into));
        self
    }

    /// Assemble the projection inside `tree`
    ///
    /// Node constituents must belong to `tree` and be unattached; nothing is
    /// added to the tree when that check fails.
    pub fn build(self, tree: &mut Tree) -> Result<Projection, ProjectionError> {
        let supplied: Vec<NodeId> = std::iter::once(&self.head)
            .chain(std::iter::once(&self.specifier))
            .chain(&self.complements)
            .chain(&self.adjuncts)
            .filter_map(|c| match c {
                Constituent::Node(id) => Some(*id),
                _ => None,
            })
            .collect();
        tree.check_attachable(&supplied)?;

        let parameters = tree.parameters();
        let category = self.category;
        let n_complements = self.complements.len();
        let n_adjuncts = self.adjuncts.len();

        let head = place(tree, self.head);
        let mut bar = tree.add_branch(category.as_str(), [head])?;

        let complement_label = format!("{category}{COMPLEMENT_BAR}");
        for complement in self.complements {
            let complement = place(tree, complement);
            let children = match parameters.head {
                HeadParameter::HeadFirst => [bar, complement],
                HeadParameter::HeadLast => [complement, bar],
            };
            bar = tree.add_branch(complement_label.as_str(), children)?;
        }

        let adjunct_label = format!("{category}{ADJUNCT_BAR}");
        for adjunct in self.adjuncts {
            let adjunct = place(tree, adjunct);
            let children = if tree.text(adjunct).is_some_and(is_bare_word) {
                [adjunct, bar]
            } else {
                [bar, adjunct]
            };
            bar = tree.add_branch(adjunct_label.as_str(), children)?;
        }

        let specifier = place(tree, self.specifier);
        let children = match parameters.spec {
            SpecParameter::SpecFirst => [specifier, bar],
            SpecParameter::SpecLast => [bar, specifier],
        };
        let root = tree.add_branch(format!("{category}P"), children)?;
        tree.mark_projection(root, &category);

        debug!(
            %root,
            category = %category,
            complements = n_complements,
            adjuncts = n_adjuncts,
            "assembled projection"
        );

        Ok(Projection { root, category })
    }
}

/// A single word with no internal whitespace
pub(crate) fn is_bare_word(text: &str) -> bool {
    !text.contains(char::is_whitespace)
}

fn place(tree: &mut Tree, constituent: Constituent) -> NodeId {
    match constituent {
        Constituent::Word(text) => tree.add_terminal(text),
        Constituent::Node(id) => id,
        Constituent::Empty => tree.add_empty(),
    }
}

impl Tree {
    /// Projection handle for a node built by [`Phrase::build`]
    pub fn projection_at(&self, id: NodeId) -> Option<Projection> {
        let category = self.node(id)?.category.clone()?;
        Some(Projection { root: id, category })
    }

    /// Projections strictly below `id`, preorder
    pub fn projections(&self, id: NodeId) -> Vec<Projection> {
        self.subtrees(id)
            .into_iter()
            .filter_map(|node| self.projection_at(node))
            .collect()
    }

    /// Structural equality over category, specifier, head, complements and adjuncts
    pub fn projection_eq(&self, a: &Projection, other: &Tree, b: &Projection) -> bool {
        if a.category != b.category {
            return false;
        }
        let pairs = [
            (self.spec(a), other.spec(b)),
            (self.head(a), other.head(b)),
        ];
        let singles_match = pairs.into_iter().all(|pair| match pair {
            (Ok(x), Ok(y)) => self.subtree_eq(x, other, y),
            (Err(_), Err(_)) => true,
            _ => false,
        });
        let lists_match = [(self.comp(a), other.comp(b)), (self.adju(a), other.adju(b))]
            .into_iter()
            .all(|pair| match pair {
                (Ok(xs), Ok(ys)) => {
                    xs.len() == ys.len()
                        && xs
                            .iter()
                            .zip(&ys)
                            .all(|(&x, &y)| self.subtree_eq(x, other, y))
                }
                (Err(_), Err(_)) => true,
                _ => false,
            });
        singles_match && lists_match
    }
}
