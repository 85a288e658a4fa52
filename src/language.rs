//! Language Support - tree-sitter grammar configuration
//!
//! The analysis core only understands JavaScript. All grammar wiring lives here
//! so the adapter and the CLI agree on what counts as a JavaScript source.

use anyhow::Result;

/// Get tree-sitter language parser for a given language name
///
/// JSX shares the JavaScript grammar.
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "javascript" | "jsx" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: javascript, jsx",
            language
        )),
    }
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("jsx"),
        _ => None,
    }
}

/// Detect language from a file path, by extension.
pub fn detect_language(path: &std::path::Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(detect_language_from_extension)
}
