//! Derivations from deep structure to surface form
//!
//! Transformations never touch their input. The surface tree is a fresh
//! arena rebuilt from the deep one, with the moved or inserted material
//! substituted along the way.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::projection::{Projection, ProjectionError};
use crate::tree::Tree;

/// Verbs that front directly in questions instead of triggering do-support
pub const AUXILIARIES: [&str; 2] = ["be", "have"];

/// Inserted in the specifier of CP when the main verb cannot front
pub const DO_SUPPORT: &str = "do";

/// Form a yes/no question from a clause
///
/// The deepest verb phrase under `clause` decides the strategy: an
/// auxiliary head moves into the clause's specifier, leaving an empty
/// placeholder behind; any other verb leaves everything in place and
/// `do` is inserted in the specifier instead.
pub fn question(tree: &Tree, clause: &Projection) -> Result<(Tree, Projection), ProjectionError> {
    let vp = tree
        .projections(clause.root())
        .into_iter()
        .filter(|p| p.category() == "V")
        .last()
        .ok_or_else(|| ProjectionError::NoVerbPhrase(clause.label()))?;
    let verb = tree.head(&vp)?;
    let specifier = tree.spec(clause)?;

    let mut substitutions = FxHashMap::default();
    match tree.text(verb) {
        Some(auxiliary) if AUXILIARIES.contains(&auxiliary) => {
            substitutions.insert(specifier, auxiliary.to_string());
            substitutions.insert(verb, String::new());
        }
        _ => {
            substitutions.insert(specifier, DO_SUPPORT.to_string());
        }
    }

    let mut surface = Tree::with_parameters(tree.parameters());
    let root = tree.copy_subtree(clause.root(), &mut surface, &substitutions);
    let projection = surface
        .projection_at(root)
        .ok_or(ProjectionError::NotAProjection(root))?;

    debug!(
        clause = %clause.root(),
        verb = tree.text(verb).unwrap_or_default(),
        words = surface.words(root).join(" "),
        "formed question"
    );

    Ok((surface, projection))
}
