//! Structural relations between nodes
//!
//! Dominance, c-command, government and sisterhood, all defined in terms
//! of the stored parent reference and the parent's domain (its strict
//! descendant branches plus its non-empty terminals).

use rustc_hash::FxHashSet;

use crate::tree::{NodeId, Tree};

impl Tree {
    /// `subtrees(id) + terminals(id)`
    pub fn domain(&self, id: NodeId) -> Vec<NodeId> {
        let mut domain = self.subtrees(id);
        domain.extend(self.terminals(id));
        domain
    }

    /// Does `ancestor` dominate `other`?
    ///
    /// With `immediately`, only direct children count (placeholders
    /// included). Otherwise `other` must be a descendant branch or a
    /// non-empty terminal anywhere below `ancestor`.
    pub fn dominates(&self, ancestor: NodeId, other: NodeId, immediately: bool) -> bool {
        if immediately {
            return self.children(ancestor).contains(&other);
        }
        if self.is_empty_node(other) {
            return false;
        }
        let mut current = self.parent(other);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// The parent's domain, or nothing for a root
    pub fn c_command_domain(&self, id: NodeId) -> Vec<NodeId> {
        self.parent(id)
            .map(|parent| self.domain(parent))
            .unwrap_or_default()
    }

    /// Does `a` c-command `b`?
    ///
    /// True when `b` lies in the domain of `a`'s parent, is not `a` itself
    /// and is not dominated by `a`: a node c-commands its sisters and
    /// everything they dominate.
    pub fn c_commands(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.c_command_domain(a).contains(&b) && !self.dominates(a, b, false)
    }

    /// Branches in the c-command domain of `id` that c-command `id` back
    pub fn government_domain(&self, id: NodeId) -> Vec<NodeId> {
        self.c_command_domain(id)
            .into_iter()
            .filter(|&x| x != id && self.is_branch(x))
            .filter(|&x| {
                let domain: FxHashSet<NodeId> = self.c_command_domain(x).into_iter().collect();
                domain.contains(&id)
            })
            .collect()
    }

    /// Mutual c-command
    pub fn governs(&self, a: NodeId, b: NodeId) -> bool {
        self.c_commands(a, b) && self.c_commands(b, a)
    }

    /// Distinct nodes under the same parent
    pub fn sisterhood(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.parent(a).is_some() && self.parent(a) == self.parent(b)
    }
}
