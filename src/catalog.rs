//! Named phrase categories
//!
//! Each entry only fixes the category tag handed to [`Phrase::new`].

use std::str::FromStr;

use crate::projection::{Constituent, Phrase, Projection, ProjectionError};
use crate::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseKind {
    Noun,
    Verb,
    Adjective,
    Preposition,
    Inflection,
    Complementizer,
    Agreement,
    SubjectAgreement,
    ObjectAgreement,
    Tense,
}

/// (kind, phrase label, category tag)
pub const CATALOG: [(PhraseKind, &str, &str); 10] = [
    (PhraseKind::Noun, "NP", "N"),
    (PhraseKind::Verb, "VP", "V"),
    (PhraseKind::Adjective, "AP", "A"),
    (PhraseKind::Preposition, "PP", "P"),
    (PhraseKind::Inflection, "IP", "I"),
    (PhraseKind::Complementizer, "CP", "C"),
    (PhraseKind::Agreement, "AGRP", "AGR"),
    (PhraseKind::SubjectAgreement, "AGRSP", "AGRS"),
    (PhraseKind::ObjectAgreement, "AGROP", "AGRO"),
    (PhraseKind::Tense, "TP", "T"),
];

impl PhraseKind {
    fn entry(self) -> &'static (PhraseKind, &'static str, &'static str) {
        CATALOG
            .iter()
            .find(|(kind, _, _)| *kind == self)
            .expect("every phrase kind has a catalog entry")
    }

    /// Category tag, e.g. `"V"`
    pub fn category(self) -> &'static str {
        self.entry().2
    }

    /// Phrase label, e.g. `"VP"`
    pub fn label(self) -> &'static str {
        self.entry().1
    }

    /// An empty [`Phrase`] of this category
    pub fn phrase(self) -> Phrase {
        Phrase::new(self.category())
    }

    pub fn all() -> impl Iterator<Item = PhraseKind> {
        CATALOG.iter().map(|(kind, _, _)| *kind)
    }
}

impl FromStr for PhraseKind {
    type Err = ProjectionError;

    /// Parse a phrase label such as `"NP"` or `"AGRSP"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|(_, label, _)| *label == s)
            .map(|(kind, _, _)| *kind)
            .ok_or_else(|| ProjectionError::UnknownPhrase(s.to_string()))
    }
}

pub fn noun(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Noun.phrase().head(head)
}

pub fn verb(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Verb.phrase().head(head)
}

pub fn adjective(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Adjective.phrase().head(head)
}

pub fn preposition(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Preposition.phrase().head(head)
}

pub fn inflection(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Inflection.phrase().head(head)
}

pub fn complementizer(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Complementizer.phrase().head(head)
}

pub fn agreement(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Agreement.phrase().head(head)
}

pub fn subject_agreement(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::SubjectAgreement.phrase().head(head)
}

pub fn object_agreement(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::ObjectAgreement.phrase().head(head)
}

pub fn tense(head: impl Into<Constituent>) -> Phrase {
    PhraseKind::Tense.phrase().head(head)
}

/// Wrap a verb phrase in the functional layers of a finite clause
///
/// `CP { C, AGRP { e, AGR, TP { T, vp } } }`
pub fn clause(tree: &mut Tree, vp: impl Into<Constituent>) -> Result<Projection, ProjectionError> {
    let tp = tense("T").complement(vp).build(tree)?;
    let agrp = agreement("AGR").specifier("e").complement(&tp).build(tree)?;
    complementizer("C").complement(&agrp).build(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_categories() {
        assert_eq!(PhraseKind::Verb.category(), "V");
        assert_eq!(PhraseKind::Agreement.label(), "AGRP");
        assert_eq!(PhraseKind::all().count(), CATALOG.len());
        for kind in PhraseKind::all() {
            assert_eq!(kind.label(), format!("{}P", kind.category()));
            assert_eq!(kind.label().parse::<PhraseKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_phrase() {
        assert_eq!(
            "XP".parse::<PhraseKind>(),
            Err(ProjectionError::UnknownPhrase("XP".to_string()))
        );
    }

    #[test]
    fn test_catalog_builders() {
        let mut tree = Tree::new();
        let np = noun("sister")
            .specifier("his")
            .adjunct("dead")
            .build(&mut tree)
            .unwrap();
        let pp = preposition("for").complement(&np).build(&mut tree).unwrap();
        let vp = verb("grieved")
            .specifier("he")
            .complement(&pp)
            .build(&mut tree)
            .unwrap();

        assert_eq!(np.category(), "N");
        assert_eq!(tree.label(vp.root()), Some("VP"));
        assert_eq!(
            tree.words(vp.root()),
            vec!["he", "grieved", "for", "his", "dead", "sister"]
        );
    }

    #[test]
    fn test_clause() {
        let mut tree = Tree::new();
        let subject = noun("you").build(&mut tree).unwrap();
        let object = noun("football").build(&mut tree).unwrap();
        let vp = verb("play")
            .specifier(&subject)
            .complement(&object)
            .build(&mut tree)
            .unwrap();
        let cp = clause(&mut tree, &vp).unwrap();

        assert_eq!(cp.category(), "C");
        assert_eq!(
            tree.terminal_texts(cp.root()),
            vec!["C", "e", "AGR", "T", "you", "play", "football"]
        );
        assert_eq!(tree.words(cp.root()), vec!["you", "play", "football"]);
        let categories: Vec<_> = tree
            .projections(cp.root())
            .iter()
            .map(|p| p.category().to_string())
            .collect();
        assert_eq!(categories, vec!["AGR", "T", "V", "N", "N"]);
    }
}
