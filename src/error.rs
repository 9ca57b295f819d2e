//! Error types for docx-runtext

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Package archive handle already closed")]
    Closed,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
