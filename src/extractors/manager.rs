//! ExtractorManager - Public API for hook path extraction
//!
//! Stateless entry point that handles source loading and language checks and
//! delegates to the analysis pipeline. Batches fan out over rayon; each
//! source is analyzed independently with its own tree and traversal state.

use crate::analysis::{self, Analysis};
use crate::config::{AnalysisConfig, SmartOptions, SynthesisOptions};
use crate::error::HookError;
use crate::synth::{Pattern, SmartResult};
use rayon::prelude::*;
use std::path::Path;

/// Manager for JavaScript hook path extraction
pub struct ExtractorManager {
    // No state needed - every call builds its own tree and catalog
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {}
    }

    pub fn supported_languages(&self) -> Vec<&'static str> {
        vec!["javascript", "jsx"]
    }

    pub fn analyze(&self, source: &str, config: &AnalysisConfig) -> Result<Analysis, HookError> {
        analysis::analyze(source, config)
    }

    pub fn generate(
        &self,
        source: &str,
        config: &AnalysisConfig,
        options: &SynthesisOptions,
    ) -> Result<Pattern, HookError> {
        analysis::generate(source, config, options)
    }

    pub fn smart(
        &self,
        source: &str,
        target: &str,
        options: &SmartOptions,
    ) -> Result<SmartResult, HookError> {
        analysis::smart(source, target, options)
    }

    /// Read a source file and analyze it.
    ///
    /// Files without a JavaScript extension are still parsed as JavaScript;
    /// bundles are often served under other names.
    pub fn analyze_file(
        &self,
        file_path: &Path,
        config: &AnalysisConfig,
    ) -> Result<Analysis, HookError> {
        let source = self.read_source(file_path)?;
        let analysis = self.analyze(&source, config)?;
        tracing::debug!(
            "Extracted {} hook paths from {}",
            analysis.catalog.len(),
            file_path.display()
        );
        Ok(analysis)
    }

    /// Load a source file, warning when the extension is not JavaScript.
    pub fn read_source(&self, file_path: &Path) -> Result<String, HookError> {
        if crate::language::detect_language(file_path).is_none() {
            tracing::warn!(
                "{} has no JavaScript extension; parsing as JavaScript",
                file_path.display()
            );
        }
        Ok(std::fs::read_to_string(file_path)?)
    }

    /// Analyze many named sources in parallel. Output order follows input
    /// order; one failing source does not affect the others.
    pub fn analyze_batch(
        &self,
        sources: &[(String, String)],
        config: &AnalysisConfig,
    ) -> Vec<(String, Result<Analysis, HookError>)> {
        let results: Vec<(String, Result<Analysis, HookError>)> = sources
            .par_iter()
            .map(|(name, source)| (name.clone(), analysis::analyze(source, config)))
            .collect();

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        tracing::debug!(
            "Batch analysis of {} sources finished ({} failed)",
            results.len(),
            failed
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KindFilter;
    use std::io::Write;

    #[test]
    fn test_analyze_file() {
        let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
        writeln!(file, "function boot() {{}} boot();").unwrap();

        let manager = ExtractorManager::new();
        let analysis = manager
            .analyze_file(file.path(), &AnalysisConfig::default())
            .unwrap();
        assert_eq!(analysis.catalog.len(), 1);
        assert_eq!(analysis.catalog.paths()[0].name, "boot");
    }

    #[test]
    fn test_analyze_missing_file_is_io_error() {
        let manager = ExtractorManager::new();
        let result = manager.analyze_file(
            Path::new("/definitely/not/here.js"),
            &AnalysisConfig::default(),
        );
        assert!(matches!(result, Err(HookError::Io(_))));
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let sources = vec![
            ("a.js".to_string(), "a.b();".to_string()),
            ("broken.js".to_string(), "function (".to_string()),
            ("c.js".to_string(), "c.d.e(); c.d.e();".to_string()),
        ];
        let config = AnalysisConfig::default().with_kind(KindFilter::Method);
        let results = ExtractorManager::new().analyze_batch(&sources, &config);

        let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a.js", "broken.js", "c.js"]);
        assert_eq!(results[0].1.as_ref().unwrap().catalog.len(), 1);
        assert!(matches!(results[1].1, Err(HookError::Parse(_))));
        assert_eq!(results[2].1.as_ref().unwrap().catalog.paths()[0].text, "c.d.e");
    }
}
