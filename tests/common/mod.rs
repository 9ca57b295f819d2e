//! Shared fixtures: DOCX archives built in memory

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

pub const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0, 1, 2, 3];

/// Wrap paragraph markup in a document body
pub fn document_xml(paragraphs: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            r#"<w:body>{}<w:sectPr/></w:body></w:document>"#
        ),
        paragraphs
    )
}

/// Build a zip archive from (name, content, compression) triples
pub fn build_archive(members: &[(&str, &[u8], CompressionMethod)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        for (name, data, method) in members {
            let options = SimpleFileOptions::default().compression_method(*method);
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

/// A minimal DOCX with the given paragraph markup and one binary media member
pub fn build_docx(paragraphs: &str) -> Vec<u8> {
    let body = document_xml(paragraphs);
    build_archive(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes(), CompressionMethod::Deflated),
        ("_rels/.rels", RELS.as_bytes(), CompressionMethod::Deflated),
        ("word/document.xml", body.as_bytes(), CompressionMethod::Deflated),
        ("word/media/image1.png", PNG_BYTES, CompressionMethod::Stored),
    ])
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
