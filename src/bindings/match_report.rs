// PyMatchReport / PyMatch - PyO3 wrappers for matcher output

use crate::matcher::{MatchRecord, MatchReport};
use pyo3::prelude::*;

#[pyclass(name = "Match")]
#[derive(Clone)]
pub struct PyMatch {
    inner: MatchRecord,
}

#[pymethods]
impl PyMatch {
    /// 1-based position in the match sequence
    #[getter]
    fn index(&self) -> usize {
        self.inner.index
    }

    #[getter]
    fn text(&self) -> String {
        self.inner.text.clone()
    }

    /// Byte offset of the match start
    #[getter]
    fn start(&self) -> usize {
        self.inner.start
    }

    #[getter]
    fn length(&self) -> usize {
        self.inner.length
    }

    #[getter]
    fn groups(&self) -> Vec<Option<String>> {
        self.inner.groups.clone()
    }
}

#[pyclass(name = "MatchReport")]
pub struct PyMatchReport {
    inner: MatchReport,
}

impl PyMatchReport {
    pub fn from_report(report: MatchReport) -> Self {
        PyMatchReport { inner: report }
    }
}

#[pymethods]
impl PyMatchReport {
    #[getter]
    fn pattern(&self) -> String {
        self.inner.pattern.clone()
    }

    /// "linear" or "backtracking"
    #[getter]
    fn engine(&self) -> String {
        match self.inner.engine {
            crate::matcher::Engine::Linear => "linear".to_string(),
            crate::matcher::Engine::Backtracking => "backtracking".to_string(),
        }
    }

    #[getter]
    fn matches(&self) -> Vec<PyMatch> {
        self.inner
            .matches
            .iter()
            .cloned()
            .map(|inner| PyMatch { inner })
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.count()
    }
}
