// API Functions - PyO3-exposed functions for Python
//
// Options arrive as an optional JSON object string with the same keys the
// CLI config file accepts (`targetSubstring`, `kind`, `depth`, `flexible`).

use super::{PyAnalysis, PyMatchReport, PyPattern};
use crate::config::{AnalysisConfig, SmartOptions, SynthesisOptions};
use crate::error::HookError;
use crate::extractors::ExtractorManager;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(error: HookError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

fn load_config(config: Option<&str>) -> PyResult<AnalysisConfig> {
    match config {
        Some(json) => AnalysisConfig::from_json(json).map_err(to_py_err),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Extract and catalog the hook paths in `source`.
///
/// Args:
///     source (str): JavaScript source code
///     config (str | None): JSON options object
///
/// Returns:
///     Analysis: catalog of filtered, deduplicated paths
///
/// Raises:
///     ValueError: on empty source, parse failure or invalid config
#[pyfunction]
#[pyo3(signature = (source, config=None))]
pub fn analyze(source: &str, config: Option<&str>) -> PyResult<PyAnalysis> {
    let config = load_config(config)?;
    ExtractorManager::new()
        .analyze(source, &config)
        .map(PyAnalysis::from_analysis)
        .map_err(to_py_err)
}

/// Synthesize a regex for the hook paths in `source`.
///
/// Raises:
///     ValueError: when no path survives filtering, or on parse failure
#[pyfunction]
#[pyo3(signature = (source, config=None))]
pub fn generate_regex(source: &str, config: Option<&str>) -> PyResult<PyPattern> {
    let config = load_config(config)?;
    ExtractorManager::new()
        .generate(source, &config, &SynthesisOptions::default())
        .map(PyPattern::from_pattern)
        .map_err(to_py_err)
}

/// Tail-anchored patterns for `target` (e.g. "profile.getName()").
///
/// Returns:
///     tuple[Pattern, Pattern | None]: the loose tail pattern and, when the
///     source contains a chain ending with the target, the smart pattern
#[pyfunction]
#[pyo3(signature = (source, target, keep_tail=2))]
pub fn smart_regex(
    source: &str,
    target: &str,
    keep_tail: usize,
) -> PyResult<(PyPattern, Option<PyPattern>)> {
    let options = SmartOptions {
        keep_tail,
        ..SmartOptions::default()
    };
    let result = ExtractorManager::new()
        .smart(source, target, &options)
        .map_err(to_py_err)?;
    Ok((
        PyPattern::from_pattern(result.loose),
        result.smart.map(PyPattern::from_pattern),
    ))
}

/// Run `pattern` against `text`.
///
/// Zero matches is a report with no entries; a broken pattern raises.
#[pyfunction]
pub fn test_regex(pattern: &str, text: &str) -> PyResult<PyMatchReport> {
    crate::matcher::test(pattern, text)
        .map(PyMatchReport::from_report)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Check that `source` parses.
///
/// Returns:
///     tuple[bool, str | None]: (valid, error message)
#[pyfunction]
pub fn validate_syntax(source: &str) -> (bool, Option<String>) {
    match crate::ast::validate_syntax(source) {
        Ok(()) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    }
}

#[pyfunction]
pub fn supported_languages() -> Vec<String> {
    ExtractorManager::new()
        .supported_languages()
        .iter()
        .map(|&s| s.to_string())
        .collect()
}

/// Analyze many sources in parallel.
///
/// Releases the GIL while Rayon fans the sources out across cores. Sources
/// that fail to parse come back as None; the rest of the batch is unaffected.
///
/// Args:
///     sources (list[tuple[str, str]]): (name, source) pairs
///     config (str | None): JSON options object applied to every source
///
/// Returns:
///     list[Analysis | None]: results in input order
#[pyfunction]
#[pyo3(signature = (sources, config=None))]
pub fn analyze_batch(
    py: Python<'_>,
    sources: Vec<(String, String)>,
    config: Option<&str>,
) -> PyResult<Vec<Option<PyAnalysis>>> {
    let config = load_config(config)?;

    // Release GIL for parallel processing
    let results = py.detach(move || ExtractorManager::new().analyze_batch(&sources, &config));

    Ok(results
        .into_iter()
        .map(|(name, result)| match result {
            Ok(analysis) => Some(PyAnalysis::from_analysis(analysis)),
            Err(e) => {
                tracing::warn!("Failed to analyze {}: {}", name, e);
                None
            }
        })
        .collect())
}
