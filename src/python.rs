//! Python bindings for xbar
//!
//! A `Tree` object owns an arena; phrases and nodes are referred to by
//! integer node ids, strings become terminals and `None` an empty
//! placeholder.

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::catalog::{PhraseKind, clause};
use crate::projection::{Constituent, Phrase, Projection, ProjectionError};
use crate::transform::question;
use crate::tree::{NodeId, Tree as RustTree};

impl From<ProjectionError> for PyErr {
    fn from(err: ProjectionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// A constituent passed from Python: an existing node id or a string
#[derive(FromPyObject)]
enum PyConstituent {
    Node(usize),
    Word(String),
}

/// Complements or adjuncts: a list, or a single value standing for a
/// one-element list. `None` items become empty placeholders.
#[derive(FromPyObject)]
enum PyConstituents {
    Many(Vec<Option<PyConstituent>>),
    One(PyConstituent),
}

fn constituent(value: Option<PyConstituent>) -> Constituent {
    match value {
        Some(PyConstituent::Node(id)) => Constituent::Node(NodeId::new(id)),
        Some(PyConstituent::Word(text)) => Constituent::from(text),
        None => Constituent::Empty,
    }
}

fn constituents(value: Option<PyConstituents>) -> Vec<Constituent> {
    match value {
        Some(PyConstituents::Many(items)) => items.into_iter().map(constituent).collect(),
        Some(PyConstituents::One(item)) => vec![constituent(Some(item))],
        None => Vec::new(),
    }
}

#[pyclass(name = "Tree")]
#[derive(Clone, Default)]
pub struct PyTree {
    inner: RustTree,
}

impl PyTree {
    fn node(&self, id: usize) -> PyResult<NodeId> {
        let id = NodeId::new(id);
        self.inner
            .node(id)
            .map(|node| node.id)
            .ok_or_else(|| PyIndexError::new_err(format!("node index out of range: {}", id)))
    }

    fn projection(&self, id: usize) -> PyResult<Projection> {
        let id = self.node(id)?;
        self.inner
            .projection_at(id)
            .ok_or_else(|| ProjectionError::NotAProjection(id).into())
    }
}

#[pymethods]
impl PyTree {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Build a projection and return the id of its root.
    ///
    /// Args:
    ///     category: category tag such as "V", or a phrase label such as "VP"
    ///     head, specifier: node id, string or None
    ///     complements, adjuncts: a node id, string, or a list of them
    #[pyo3(signature = (category, head=None, specifier=None, complements=None, adjuncts=None))]
    fn phrase(
        &mut self,
        category: &str,
        head: Option<PyConstituent>,
        specifier: Option<PyConstituent>,
        complements: Option<PyConstituents>,
        adjuncts: Option<PyConstituents>,
    ) -> PyResult<usize> {
        let phrase = match category.parse::<PhraseKind>() {
            Ok(kind) => kind.phrase(),
            Err(_) => Phrase::new(category),
        };
        let projection = phrase
            .head(constituent(head))
            .specifier(constituent(specifier))
            .complements(constituents(complements))
            .adjuncts(constituents(adjuncts))
            .build(&mut self.inner)?;
        Ok(projection.root().index())
    }

    /// Wrap a verb phrase in CP / AGRP / TP.
    fn clause(&mut self, vp: usize) -> PyResult<usize> {
        let vp = self.node(vp)?;
        Ok(clause(&mut self.inner, vp)?.root().index())
    }

    /// Form a question from a clause; returns (new tree, root id).
    fn question(&self, cp: usize) -> PyResult<(PyTree, usize)> {
        let projection = self.projection(cp)?;
        let (surface, surface_cp) = question(&self.inner, &projection)?;
        let root = surface_cp.root().index();
        Ok((PyTree { inner: surface }, root))
    }

    fn serialize(&self, id: usize) -> PyResult<String> {
        Ok(self.inner.serialize(self.node(id)?))
    }

    fn terminals(&self, id: usize) -> PyResult<Vec<String>> {
        let id = self.node(id)?;
        Ok(self
            .inner
            .terminal_texts(id)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn words(&self, id: usize) -> PyResult<Vec<String>> {
        let id = self.node(id)?;
        Ok(self.inner.words(id).into_iter().map(str::to_string).collect())
    }

    fn label(&self, id: usize) -> PyResult<Option<String>> {
        Ok(self.inner.label(self.node(id)?).map(str::to_string))
    }

    fn text(&self, id: usize) -> PyResult<Option<String>> {
        Ok(self.inner.text(self.node(id)?).map(str::to_string))
    }

    fn parent(&self, id: usize) -> PyResult<Option<usize>> {
        Ok(self.inner.parent(self.node(id)?).map(NodeId::index))
    }

    fn head(&self, id: usize) -> PyResult<usize> {
        let projection = self.projection(id)?;
        Ok(self.inner.head(&projection)?.index())
    }

    fn spec(&self, id: usize) -> PyResult<usize> {
        let projection = self.projection(id)?;
        Ok(self.inner.spec(&projection)?.index())
    }

    fn comp(&self, id: usize) -> PyResult<Vec<usize>> {
        let projection = self.projection(id)?;
        Ok(self
            .inner
            .comp(&projection)?
            .into_iter()
            .map(NodeId::index)
            .collect())
    }

    fn adju(&self, id: usize) -> PyResult<Vec<usize>> {
        let projection = self.projection(id)?;
        Ok(self
            .inner
            .adju(&projection)?
            .into_iter()
            .map(NodeId::index)
            .collect())
    }

    #[pyo3(signature = (a, b, immediately=false))]
    fn dominates(&self, a: usize, b: usize, immediately: bool) -> PyResult<bool> {
        Ok(self.inner.dominates(self.node(a)?, self.node(b)?, immediately))
    }

    fn c_commands(&self, a: usize, b: usize) -> PyResult<bool> {
        Ok(self.inner.c_commands(self.node(a)?, self.node(b)?))
    }

    fn governs(&self, a: usize, b: usize) -> PyResult<bool> {
        Ok(self.inner.governs(self.node(a)?, self.node(b)?))
    }

    fn sisterhood(&self, a: usize, b: usize) -> PyResult<bool> {
        Ok(self.inner.sisterhood(self.node(a)?, self.node(b)?))
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("<Tree len={}>", self.inner.len())
    }
}

#[pyfunction]
fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn xbar(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTree>()?;
    m.add_function(wrap_pyfunction!(__version__, m)?)?;
    Ok(())
}
