//! Paragraph (w:p) records and the extractors that produce them

use crate::document::run::run_texts;
use crate::xml::{get_attr, unescape_text};
use log::{debug, trace};
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

const PARAGRAPH_TAG: &[u8] = b"w:p";
const RUN_TEXT_TAG: &[u8] = b"w:t";
const PID_ATTR: &str = "w:rsidR";

/// Shortest span from a `w:p` open tag carrying `w:rsidR` to a `w:p` close tag
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?U)<w:p w:rsidR="((?-u:\w)*)"[^>]*>(.*)</w:p>"#).expect("invalid regex")
});

/// Run text grouped by the paragraph element it was found in
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Revision identifier from the opening tag (`w:rsidR`)
    pub pid: String,
    /// Inner XML of the paragraph, as matched
    pub raw: String,
    /// Run-text found directly in this paragraph, still escaped
    pub content: Vec<String>,
}

impl Paragraph {
    /// Create a paragraph record
    pub fn new(pid: impl Into<String>, raw: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            pid: pid.into(),
            raw: raw.into(),
            content,
        }
    }

    /// Display text of all runs, entity references resolved
    pub fn text(&self) -> String {
        self.content.iter().map(|t| unescape_text(t)).collect()
    }

    /// Whether the paragraph has no run-text
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Turns document-body XML into paragraph records
pub trait TextExtractor {
    /// Extract leaf paragraphs in discovery order. Never fails; input that
    /// does not match simply yields fewer records.
    fn extract(&self, xml: &str) -> Vec<Paragraph>;
}

/// Whether `xml` contains at least one complete paragraph span
pub fn has_paragraph(xml: &str) -> bool {
    PARAGRAPH.is_match(xml)
}

/// Pattern-matching extractor.
///
/// Matches are shortest spans, so an outer paragraph that contains a nested
/// one ends at the nested paragraph's close tag: the record carries the outer
/// `w:rsidR` and the runs up to that point. Use [`NestingExtractor`] when
/// nested paragraphs must be resolved.
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    fn collect(xml: &str, out: &mut Vec<Paragraph>) {
        for caps in PARAGRAPH.captures_iter(xml) {
            let pid = &caps[1];
            let inner = &caps[2];

            if has_paragraph(inner) {
                trace!("Paragraph {} holds nested paragraphs, descending", pid);
                Self::collect(inner, out);
                continue;
            }

            out.push(Paragraph::new(pid, inner, run_texts(inner)));
        }
    }
}

impl TextExtractor for PatternExtractor {
    fn extract(&self, xml: &str) -> Vec<Paragraph> {
        let mut paragraphs = Vec::new();
        Self::collect(xml, &mut paragraphs);
        debug!("Pattern extractor found {} paragraphs", paragraphs.len());
        paragraphs
    }
}

/// Tokenizing extractor that tracks `w:p` nesting depth.
///
/// Emits one record per paragraph element that contains no other paragraph
/// element. The identifier is empty when `w:rsidR` is absent. Malformed markup
/// stops extraction; the paragraphs completed before that point are returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct NestingExtractor;

/// A `w:p` element that has been opened but not yet closed
struct OpenParagraph {
    pid: String,
    inner_start: usize,
    content: Vec<String>,
    has_nested: bool,
}

impl TextExtractor for NestingExtractor {
    fn extract(&self, xml: &str) -> Vec<Paragraph> {
        let mut reader = Reader::from_str(xml);
        let mut open: Vec<OpenParagraph> = Vec::new();
        let mut run_start: Option<usize> = None;
        let mut paragraphs = Vec::new();

        let slice = |from: usize, to: usize| xml.get(from..to).unwrap_or_default().to_string();

        loop {
            let before = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    debug!("Stopping paragraph extraction at byte {}: {}", before, e);
                    break;
                }
            };
            let after = reader.buffer_position() as usize;

            match event {
                Event::Start(e) if e.name().as_ref() == PARAGRAPH_TAG => {
                    if let Some(parent) = open.last_mut() {
                        parent.has_nested = true;
                    }
                    open.push(OpenParagraph {
                        pid: get_attr(&e, PID_ATTR).unwrap_or_default(),
                        inner_start: after,
                        content: Vec::new(),
                        has_nested: false,
                    });
                }
                Event::Empty(e) if e.name().as_ref() == PARAGRAPH_TAG => {
                    if let Some(parent) = open.last_mut() {
                        parent.has_nested = true;
                    }
                    let pid = get_attr(&e, PID_ATTR).unwrap_or_default();
                    paragraphs.push(Paragraph::new(pid, "", Vec::new()));
                }
                Event::End(e) if e.name().as_ref() == PARAGRAPH_TAG => {
                    if let Some(para) = open.pop() {
                        if !para.has_nested {
                            let raw = slice(para.inner_start, before);
                            paragraphs.push(Paragraph::new(para.pid, raw, para.content));
                        }
                    }
                }
                Event::Start(e) if e.name().as_ref() == RUN_TEXT_TAG => {
                    run_start = Some(after);
                }
                Event::End(e) if e.name().as_ref() == RUN_TEXT_TAG => {
                    if let (Some(start), Some(para)) = (run_start.take(), open.last_mut()) {
                        para.content.push(slice(start, before));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        debug!("Nesting extractor found {} paragraphs", paragraphs.len());
        paragraphs
    }
}
