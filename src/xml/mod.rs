//! XML utilities: run-text escaping, attribute helpers and the structured
//! text lister

mod escape;
mod lister;

pub use escape::{escape_text, stored_text_pattern, unescape_text};
pub use lister::list_text;

use quick_xml::events::BytesStart;

/// Helper to get attribute value from BytesStart
pub fn get_attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name.as_bytes())
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}
