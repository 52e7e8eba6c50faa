//! Recovering specifier, head, complements and adjuncts from a projection
//!
//! The accessors walk the bar-level chain left behind by
//! [`Phrase::build`](crate::Phrase::build). At each `c'` or `a'` level one
//! child continues the chain and the other is the constituent introduced at
//! that level.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::projection::{
    ConstituentKind, HeadParameter, Projection, ProjectionError, SpecParameter, is_bare_word,
};
use crate::tree::{NodeId, Tree};

/// Functional placeholders that never surface as words
pub const PLACEHOLDERS: [&str; 5] = ["AGR", "C", "T", "e", "t"];

/// A whole-token feature annotation such as `[SINGULAR]`
static FEATURE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.*\]$").expect("feature annotation pattern is valid"));

impl Tree {
    /// The projection's specifier node, verbatim (possibly a placeholder)
    pub fn spec(&self, projection: &Projection) -> Result<NodeId, ProjectionError> {
        let xbar = self.xbar(projection)?;
        self.children(projection.root())
            .iter()
            .copied()
            .find(|&child| child != xbar)
            .ok_or(ProjectionError::NotAProjection(projection.root()))
    }

    /// The node supplied as head
    pub fn head(&self, projection: &Projection) -> Result<NodeId, ProjectionError> {
        let mut node = self.xbar(projection)?;
        while self.label(node) != Some(projection.category()) {
            node = self.level(node, projection)?.0;
        }
        self.children(node)
            .first()
            .copied()
            .ok_or(ProjectionError::NotAProjection(projection.root()))
    }

    /// Complements, outermost first (the reverse of the order supplied)
    pub fn comp(&self, projection: &Projection) -> Result<Vec<NodeId>, ProjectionError> {
        self.peel(projection, ConstituentKind::Complement)
    }

    /// Adjuncts, outermost first (the reverse of the order supplied)
    pub fn adju(&self, projection: &Projection) -> Result<Vec<NodeId>, ProjectionError> {
        self.peel(projection, ConstituentKind::Adjunct)
    }

    /// Surface words below `id`: terminals minus placeholders and feature annotations
    pub fn words(&self, id: NodeId) -> Vec<&str> {
        self.terminal_texts(id)
            .into_iter()
            .filter(|word| !PLACEHOLDERS.contains(word) && !FEATURE_ANNOTATION.is_match(word))
            .collect()
    }

    /// `"VP: he happily gave ..."`
    pub fn summary(&self, projection: &Projection) -> String {
        format!(
            "{}: {}",
            projection.label(),
            self.terminal_texts(projection.root()).join(" ")
        )
    }

    /// Top of the bar chain, the root's non-specifier child
    fn xbar(&self, projection: &Projection) -> Result<NodeId, ProjectionError> {
        let root = projection.root();
        if self.label(root) != Some(projection.label().as_str()) {
            return Err(ProjectionError::NotAProjection(root));
        }
        let position = match self.parameters().spec {
            SpecParameter::SpecFirst => 1,
            SpecParameter::SpecLast => 0,
        };
        self.children(root)
            .get(position)
            .copied()
            .filter(|&child| self.is_chain_node(child, projection))
            .ok_or(ProjectionError::NotAProjection(root))
    }

    fn is_chain_node(&self, id: NodeId, projection: &Projection) -> bool {
        self.label(id)
            .is_some_and(|label| projection.is_chain_label(label))
    }

    /// Split a `c'` or `a'` level into (next bar level, constituent)
    ///
    /// The bar level is taken from the position the builder put it in, so a
    /// constituent labeled like the chain is never mistaken for it.
    fn level(
        &self,
        node: NodeId,
        projection: &Projection,
    ) -> Result<(NodeId, NodeId), ProjectionError> {
        let malformed = ProjectionError::NotAProjection(projection.root());
        let label = self.label(node).ok_or(malformed.clone())?;
        let &[first, second] = self.children(node) else {
            return Err(malformed);
        };

        let bar_first = if label == projection.bar_label(ConstituentKind::Complement) {
            self.parameters().head == HeadParameter::HeadFirst
        } else if label == projection.bar_label(ConstituentKind::Adjunct) {
            !self.text(first).is_some_and(is_bare_word)
        } else {
            return Err(malformed);
        };
        let (bar, constituent) = if bar_first {
            (first, second)
        } else {
            (second, first)
        };

        if !self.is_chain_node(bar, projection) {
            return Err(malformed);
        }
        trace!(level = %node, %bar, %constituent, "bar level");
        Ok((bar, constituent))
    }

    fn peel(
        &self,
        projection: &Projection,
        kind: ConstituentKind,
    ) -> Result<Vec<NodeId>, ProjectionError> {
        let target = projection.bar_label(kind);
        let mut found = Vec::new();
        let mut node = self.xbar(projection)?;

        while self.label(node) != Some(projection.category()) {
            let (bar, constituent) = self.level(node, projection)?;
            if self.label(node) == Some(target.as_str()) {
                found.push(constituent);
            }
            node = bar;
        }

        if found.is_empty() {
            return Err(ProjectionError::ConstituentAbsent {
                constituent: kind,
                phrase: projection.label(),
            });
        }
        Ok(found)
    }
}
