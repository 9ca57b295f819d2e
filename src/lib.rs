//! # docx-runtext
//!
//! Extract and rewrite the run text of DOCX documents.
//!
//! ## Features
//!
//! - Load every member of a DOCX package into memory
//! - List run text grouped by paragraph, or as one flat list
//! - Replace run text in place; all other markup and members are kept intact
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_runtext::{Document, ReplaceRequest};
//!
//! let mut doc = Document::open("letter.docx")?;
//!
//! for para in doc.paragraphs() {
//!     println!("{}: {:?}", para.pid, para.content);
//! }
//!
//! doc.replace(&ReplaceRequest::new().with("NAME", "Ada Lovelace"));
//! doc.save("letter-filled.docx")?;
//! ```

pub mod document;
pub mod error;
pub mod opc;
pub mod xml;

pub use document::{
    Document, NestingExtractor, Paragraph, PatternExtractor, ReplaceOptions, ReplaceRequest,
    TextExtractor,
};
pub use error::{Error, Result};
pub use opc::{OpenOptions, Package, Part, ReadPolicy, MAIN_DOCUMENT};
