// PyPath - PyO3 wrapper for the Path record

use crate::extractors::base::Path;
use pyo3::prelude::*;

/// One hook path found in source. All fields are read-only from Python.
#[pyclass(name = "Path")]
#[derive(Clone)]
pub struct PyPath {
    inner: Path,
}

impl PyPath {
    pub fn from_path(path: Path) -> Self {
        PyPath { inner: path }
    }
}

#[pymethods]
impl PyPath {
    /// "function", "method" or "property"
    #[getter]
    fn kind(&self) -> String {
        self.inner.kind.to_string()
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn text(&self) -> String {
        self.inner.text.clone()
    }

    #[getter]
    fn segments(&self) -> Vec<String> {
        self.inner.segments.iter().map(|s| s.to_string()).collect()
    }

    #[getter]
    fn context(&self) -> String {
        self.inner.context.to_string()
    }

    #[getter]
    fn computed(&self) -> bool {
        self.inner.computed
    }

    #[getter]
    fn parameter_count(&self) -> Option<usize> {
        self.inner.parameter_count
    }

    #[getter]
    fn argument_count(&self) -> Option<usize> {
        self.inner.argument_count
    }

    fn __repr__(&self) -> String {
        format!("Path({})", self.inner)
    }
}
