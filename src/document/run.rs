//! Run-text element (w:t) grammar

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening `w:t` tag, bare or carrying attributes
pub(crate) const RUN_OPEN: &str = r"(<w:t>|<w:t [^>]*>)";

/// Closing `w:t` tag
pub(crate) const RUN_CLOSE: &str = r"(</w:t>)";

/// Shortest span from a `w:t` open tag through its close tag
static RUN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?U)(<w:t>|<w:t .*>)(.*)(</w:t>)").expect("invalid regex"));

/// Collect the inner text of every run-text element, left to right.
///
/// The text is returned exactly as stored, entity references included.
pub fn run_texts(xml: &str) -> Vec<String> {
    RUN_TEXT
        .captures_iter(xml)
        .map(|caps| caps[2].to_string())
        .collect()
}
