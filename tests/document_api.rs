//! Integration test: Document API

mod common;

use common::{build_docx, init_logger, PNG_BYTES};
use docx_runtext::{
    Document, NestingExtractor, PatternExtractor, ReplaceOptions, ReplaceRequest, TextExtractor,
    MAIN_DOCUMENT,
};
use pretty_assertions::assert_eq;
use std::collections::{BTreeSet, HashMap};

const LETTER: &str = concat!(
    r#"<w:p w:rsidR="00A10001" w:rsidRDefault="00A10001"><w:pPr><w:pStyle w:val="Heading1"/></w:pPr>"#,
    r#"<w:r><w:t>Invoice</w:t></w:r></w:p>"#,
    r#"<w:p w:rsidR="00A10002"><w:r><w:t xml:space="preserve">Dear </w:t></w:r>"#,
    r#"<w:r><w:rPr><w:b/></w:rPr><w:t>CUSTOMER</w:t></w:r></w:p>"#,
    r#"<w:p w:rsidR="00A10003"><w:r><w:t>Terms &amp; Conditions</w:t></w:r></w:p>"#,
    r#"<w:p w:rsidR="00A10004"><w:pPr><w:jc w:val="right"/></w:pPr></w:p>"#
);

fn letter() -> Document {
    Document::from_bytes(&build_docx(LETTER)).expect("Failed to open document")
}

#[test]
fn test_paragraph_extraction() {
    init_logger();
    let mut doc = letter();
    let paragraphs = doc.paragraphs();

    assert_eq!(paragraphs.len(), 4);
    assert_eq!(paragraphs[0].pid, "00A10001");
    assert_eq!(paragraphs[0].content, vec!["Invoice"]);
    assert_eq!(paragraphs[1].content, vec!["Dear ", "CUSTOMER"]);
    assert_eq!(paragraphs[2].content, vec!["Terms &amp; Conditions"]);
    assert_eq!(paragraphs[2].text(), "Terms & Conditions");
    assert!(paragraphs[3].content.is_empty());
}

#[test]
fn test_two_sibling_paragraphs() {
    let siblings = concat!(
        r#"<w:p w:rsidR="01"><w:r><w:t>alpha</w:t></w:r></w:p>"#,
        r#"<w:p w:rsidR="02"><w:r><w:t>beta</w:t></w:r></w:p>"#
    );
    let mut doc = Document::from_bytes(&build_docx(siblings)).unwrap();

    let paragraphs = doc.paragraphs();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].content, vec!["alpha"]);
    assert_eq!(paragraphs[1].content, vec!["beta"]);
}

#[test]
fn test_body_without_paragraphs() {
    let mut doc = Document::from_bytes(&build_docx("")).unwrap();
    assert!(doc.paragraphs().is_empty());
    assert!(doc.list_text().unwrap().is_empty());
}

#[test]
fn test_lister_matches_extractor() {
    let plain = concat!(
        r#"<w:p w:rsidR="01"><w:r><w:t>one</w:t></w:r><w:r><w:t>two</w:t></w:r></w:p>"#,
        r#"<w:p w:rsidR="02"><w:r><w:t xml:space="preserve">three </w:t></w:r></w:p>"#
    );
    let mut doc = Document::from_bytes(&build_docx(plain)).unwrap();

    let listed: BTreeSet<String> = doc.list_text().unwrap().into_iter().collect();
    let extracted: BTreeSet<String> = doc
        .paragraphs()
        .iter()
        .flat_map(|p| p.content.iter().cloned())
        .collect();

    assert_eq!(listed, extracted);
}

#[test]
fn test_extractors_agree_without_nesting() {
    let doc = letter();
    let xml = doc.document_xml();
    assert_eq!(PatternExtractor.extract(&xml), NestingExtractor.extract(&xml));
}

#[test]
fn test_replace_and_save() {
    init_logger();
    let mut doc = letter();

    let mut values = HashMap::new();
    values.insert("CUSTOMER".to_string(), "Ada".to_string());
    values.insert("Terms & Conditions".to_string(), "Fine Print".to_string());
    let count = doc.replace(&ReplaceRequest::from(values));
    assert_eq!(count, 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filled.docx");
    doc.save(&path).expect("Should save to file");
    doc.close();

    let mut reopened = Document::open(&path).expect("Should reopen");
    let body = reopened.document_xml().into_owned();
    assert!(body.contains(r#"<w:rPr><w:b/></w:rPr><w:t> Ada </w:t>"#));
    assert!(body.contains("<w:t> Fine Print </w:t>"));
    assert!(!body.contains("CUSTOMER"));
    assert!(body.contains(r#"<w:pStyle w:val="Heading1"/>"#));

    let paragraphs = reopened.paragraphs();
    assert_eq!(paragraphs[1].content, vec!["Dear ", " Ada "]);
    assert_eq!(
        reopened.package().get("word/media/image1.png").unwrap(),
        PNG_BYTES
    );
}

#[test]
fn test_noop_replace_is_byte_identical() {
    let mut doc = letter();
    let before = doc.package().get(MAIN_DOCUMENT).unwrap().to_vec();

    let request = ReplaceRequest::new()
        .with("Nobody", "x")
        .with("Dear", "x")
        .with("Terms &amp; Conditions", "x");
    assert_eq!(doc.replace(&request), 0);

    assert_eq!(doc.package().get(MAIN_DOCUMENT).unwrap(), before.as_slice());
}

#[test]
fn test_replace_reads_other_member() {
    let mut doc = letter();
    doc.package_mut()
        .set("word/footer1.xml", b"<w:ftr><w:t>PAGE</w:t></w:ftr>".to_vec());

    let options = ReplaceOptions::new().read_member("word/footer1.xml");
    doc.replace_with(&ReplaceRequest::new().with("PAGE", "1"), &options);

    assert_eq!(
        doc.package().get_str(MAIN_DOCUMENT).unwrap(),
        "<w:ftr><w:t> 1 </w:t></w:ftr>"
    );
    assert_eq!(
        doc.package().get_str("word/footer1.xml").unwrap(),
        "<w:ftr><w:t>PAGE</w:t></w:ftr>"
    );
}

#[test]
fn test_nested_paragraphs() {
    let nested = concat!(
        r#"<w:p w:rsidR="0A"><w:r><w:t>outer</w:t></w:r>"#,
        r#"<w:p w:rsidR="0B"><w:r><w:t>inner</w:t></w:r></w:p></w:p>"#
    );
    let mut doc = Document::from_bytes(&build_docx(nested)).unwrap();

    let pattern = doc.paragraphs().to_vec();
    assert_eq!(pattern.len(), 1);
    assert_eq!(pattern[0].pid, "0A");
    assert_eq!(pattern[0].content, vec!["outer", "inner"]);

    let nesting = doc.paragraphs_with(&NestingExtractor);
    assert_eq!(nesting.len(), 1);
    assert_eq!(nesting[0].pid, "0B");
    assert_eq!(nesting[0].content, vec!["inner"]);
}
