//! Document model - paragraph text extraction and run-text substitution

mod paragraph;
mod replace;
mod run;

pub use paragraph::{has_paragraph, NestingExtractor, Paragraph, PatternExtractor, TextExtractor};
pub use replace::{replace, ReplaceOptions, ReplaceRequest};
pub use run::run_texts;

use crate::error::Result;
use crate::opc::{OpenOptions, Package, MAIN_DOCUMENT};
use crate::xml;
use log::debug;
use std::borrow::Cow;
use std::path::Path;

/// A DOCX document
#[derive(Debug, Default)]
pub struct Document {
    /// Underlying package
    package: Package,
    /// Paragraphs from the last extraction
    words: Vec<Paragraph>,
}

impl Document {
    /// Open a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &OpenOptions::default())
    }

    /// Open a document from a file path with explicit options
    pub fn open_with<P: AsRef<Path>>(path: P, options: &OpenOptions) -> Result<Self> {
        let package = Package::open_with(path, options)?;
        Ok(Self::from_package(package))
    }

    /// Open a document from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &OpenOptions::default())
    }

    /// Open a document from bytes with explicit options
    pub fn from_bytes_with(bytes: &[u8], options: &OpenOptions) -> Result<Self> {
        let package = Package::from_bytes_with(bytes, options)?;
        Ok(Self::from_package(package))
    }

    /// Wrap an existing package
    pub fn from_package(package: Package) -> Self {
        Self {
            package,
            words: Vec::new(),
        }
    }

    /// Get the underlying package
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Get the underlying package mutably
    pub fn package_mut(&mut self) -> &mut Package {
        self.words.clear();
        &mut self.package
    }

    /// Unwrap into the underlying package
    pub fn into_package(self) -> Package {
        self.package
    }

    /// Document body XML. An absent body reads as empty.
    pub fn document_xml(&self) -> Cow<'_, str> {
        match self.package.get(MAIN_DOCUMENT) {
            Ok(bytes) => String::from_utf8_lossy(bytes),
            Err(_) => {
                debug!("No {} member, using empty body", MAIN_DOCUMENT);
                Cow::Borrowed("")
            }
        }
    }

    /// Extract paragraphs with the pattern extractor and remember them
    pub fn paragraphs(&mut self) -> &[Paragraph] {
        self.paragraphs_with(&PatternExtractor)
    }

    /// Extract paragraphs with the given extractor and remember them
    pub fn paragraphs_with<E: TextExtractor>(&mut self, extractor: &E) -> &[Paragraph] {
        let words = extractor.extract(&self.document_xml());
        self.words = words;
        &self.words
    }

    /// Paragraphs from the last extraction
    pub fn words(&self) -> &[Paragraph] {
        &self.words
    }

    /// List every run text in the body by walking it as XML
    pub fn list_text(&self) -> Result<Vec<String>> {
        let body = self.package.get(MAIN_DOCUMENT).unwrap_or_default();
        xml::list_text(body)
    }

    /// Replace run text in the body
    pub fn replace(&mut self, request: &ReplaceRequest) -> usize {
        self.replace_with(request, &ReplaceOptions::default())
    }

    /// Replace run text with explicit read and write members
    pub fn replace_with(&mut self, request: &ReplaceRequest, options: &ReplaceOptions) -> usize {
        self.words.clear();
        replace(&mut self.package, request, options)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.package.save(path)
    }

    /// Save the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package.to_bytes()
    }

    /// Release the archive handle; safe to call repeatedly
    pub fn close(&mut self) {
        self.package.close();
    }
}
