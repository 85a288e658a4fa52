// PyAnalysis - PyO3 wrapper for one analysis run

use super::{PyPath, PyPattern};
use crate::analysis::Analysis;
use crate::config::SynthesisOptions;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass(name = "Analysis")]
pub struct PyAnalysis {
    inner: Analysis,
}

impl PyAnalysis {
    pub fn from_analysis(analysis: Analysis) -> Self {
        PyAnalysis { inner: analysis }
    }
}

#[pymethods]
impl PyAnalysis {
    /// Filtered, deduplicated paths in traversal order
    #[getter]
    fn paths(&self) -> Vec<PyPath> {
        self.inner
            .catalog
            .iter()
            .cloned()
            .map(PyPath::from_path)
            .collect()
    }

    /// Paths emitted before filtering and dedup
    #[getter]
    fn extracted(&self) -> usize {
        self.inner.extracted
    }

    /// Synthesize a pattern from the catalog. Raises ValueError when no
    /// path survived filtering.
    fn pattern(&self) -> PyResult<PyPattern> {
        self.inner
            .pattern(&SynthesisOptions::default())
            .map(PyPattern::from_pattern)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner
            .to_json()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.inner.catalog.len()
    }
}
