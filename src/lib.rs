//! xbar: X-bar phrase-structure trees
//!
//! Build phrase projections (specifier, head, complements, adjuncts) into a
//! labeled tree, query structural relations between nodes (dominance,
//! c-command, government, sisterhood) and take projections apart again.

// Core modules
pub mod accessors; // Head/spec/complement/adjunct recovery
pub mod catalog; // Named phrase categories
pub mod projection; // X-bar projection builder
pub mod relations; // Dominance, c-command, government
pub mod transform; // Surface-form derivations
pub mod tree; // Arena of labeled nodes

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use accessors::PLACEHOLDERS;
pub use catalog::{PhraseKind, clause};
pub use projection::{
    Constituent, ConstituentKind, HeadParameter, Parameters, Phrase, Projection, ProjectionError,
    SpecParameter,
};
pub use transform::question;
pub use tree::{Node, NodeId, NodeKind, Tree, TreeError};
