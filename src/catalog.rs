//! Path Catalog
//!
//! The filtered, deduplicated list of paths produced by one extraction run.
//! A catalog is built fresh per analysis and never updated in place.

use crate::config::AnalysisConfig;
use crate::extractors::base::{Path, PathKind};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    paths: Vec<Path>,
}

impl Catalog {
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }

    pub fn count_of(&self, kind: PathKind) -> usize {
        self.paths.iter().filter(|p| p.kind == kind).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Apply, in order: the name filter, the kind filter, then dedup by
/// `(kind, text)` keeping the first occurrence.
///
/// The name filter keeps a path when the target substring is empty or occurs
/// case-insensitively in its name or its text. The substring is used as
/// given; whitespace is significant.
pub fn build_catalog(paths: Vec<Path>, config: &AnalysisConfig) -> Catalog {
    let total = paths.len();
    let needle = config.target_substring.to_lowercase();
    let mut seen: HashSet<(PathKind, String)> = HashSet::new();

    let paths: Vec<Path> = paths
        .into_iter()
        .filter(|path| {
            needle.is_empty()
                || path.name.to_lowercase().contains(&needle)
                || path.text.to_lowercase().contains(&needle)
        })
        .filter(|path| config.kind.accepts(path.kind))
        .filter(|path| seen.insert((path.kind, path.text.clone())))
        .collect();

    debug!("Catalog kept {} of {} extracted paths", paths.len(), total);
    Catalog { paths }
}
