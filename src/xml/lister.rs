//! Flat listing of every `t` text value in a well-formed XML part.
//!
//! Unlike the paragraph extractors this path runs a real XML reader over the
//! whole part, so it fails on malformed input and keeps no paragraph grouping.

use crate::error::{Error, Result};
use log::trace;
use quick_xml::events::Event;
use quick_xml::Reader;

/// An element currently open during the walk
struct OpenElement {
    /// Local name is `t`
    is_text: bool,
    /// Unescaped character data collected so far
    text: String,
    /// Whether any child element was seen
    has_children: bool,
}

impl OpenElement {
    fn new(is_text: bool) -> Self {
        Self {
            is_text,
            text: String::new(),
            has_children: false,
        }
    }
}

/// List the text of every element whose local name is `t`, in document order.
///
/// Entity references are resolved. A `t` element that contains child
/// elements does not hold a scalar value and is skipped.
pub fn list_text(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut seen_root = false;
    let mut result = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                }
                seen_root = true;
                stack.push(OpenElement::new(e.local_name().as_ref() == b"t"));
            }
            Event::Empty(e) => {
                if let Some(parent) = stack.last_mut() {
                    parent.has_children = true;
                }
                seen_root = true;
                if e.local_name().as_ref() == b"t" {
                    result.push(String::new());
                }
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    if current.is_text {
                        current.text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    if current.is_text {
                        current.text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::InvalidDocument("Unexpected end tag".into()))?;
                if element.is_text {
                    if element.has_children {
                        trace!("Skipping non-scalar text element");
                    } else {
                        result.push(element.text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(Error::InvalidDocument("No root element".into()));
    }
    if !stack.is_empty() {
        return Err(Error::InvalidDocument(format!(
            "{} element(s) left unclosed",
            stack.len()
        )));
    }

    Ok(result)
}
