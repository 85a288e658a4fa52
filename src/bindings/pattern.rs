// PyPattern - PyO3 wrapper for a synthesized Pattern

use super::{PyMatchReport, PyPath};
use crate::synth::{self, Pattern};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass(name = "Pattern")]
pub struct PyPattern {
    inner: Pattern,
}

impl PyPattern {
    pub fn from_pattern(pattern: Pattern) -> Self {
        PyPattern { inner: pattern }
    }
}

#[pymethods]
impl PyPattern {
    #[getter]
    fn source(&self) -> String {
        self.inner.source().to_string()
    }

    /// "exact", "flexible", "smart" or "tail"
    #[getter]
    fn mode(&self) -> String {
        self.inner.mode().to_string()
    }

    #[getter]
    fn fragments(&self) -> Vec<String> {
        self.inner.fragments().to_vec()
    }

    #[getter]
    fn paths(&self) -> Vec<PyPath> {
        self.inner
            .paths()
            .iter()
            .cloned()
            .map(PyPath::from_path)
            .collect()
    }

    /// Plain-text description of how the pattern was built.
    fn explain(&self) -> String {
        synth::explain(&self.inner)
    }

    /// Run the pattern against `text`.
    fn test(&self, text: &str) -> PyResult<PyMatchReport> {
        self.inner
            .test(text)
            .map(PyMatchReport::from_report)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __str__(&self) -> String {
        self.inner.source().to_string()
    }

    fn __repr__(&self) -> String {
        format!("Pattern(mode={}, source={:?})", self.inner.mode(), self.inner.source())
    }
}
