//! Exact mode: the path text, escaped, plus the call suffix for callables.

use super::escape_regex;
use crate::config::SynthesisOptions;
use crate::extractors::base::Path;

pub(super) fn exact_fragment(path: &Path, options: &SynthesisOptions) -> String {
    let mut pattern = escape_regex(&path.text);
    if path.kind.is_callable() {
        pattern.push_str(options.call_suffix.as_regex());
    }
    pattern
}
