//! Package storage
//!
//! This module handles the ZIP-based package format used by DOCX files.

mod package;
mod part;

pub use package::{OpenOptions, Package, ReadPolicy};
pub use part::Part;

/// Member holding the document body
pub const MAIN_DOCUMENT: &str = "word/document.xml";
