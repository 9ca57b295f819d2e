//! Escaping between display text and run-text content

use std::borrow::Cow;

/// Escape display text the way it appears inside a `w:t` element.
///
/// Covers `&`, `<`, `>` and both quote characters.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Regex fragment matching `text` as it may be stored inside a `w:t` element.
///
/// `&`, `<` and `>` must appear escaped. A quote matches its literal form and
/// each of its entity forms, since Word writes quotes unescaped while other
/// writers emit named or numeric references.
pub fn stored_text_pattern(text: &str) -> String {
    let escaped = quick_xml::escape::partial_escape(text);
    let mut pattern = String::with_capacity(escaped.len());
    let mut utf8 = [0u8; 4];
    for c in escaped.chars() {
        match c {
            '\'' => pattern.push_str("(?:'|&apos;|&#39;|&#x27;)"),
            '"' => pattern.push_str("(?:\"|&quot;|&#34;|&#x22;)"),
            _ => pattern.push_str(&regex::escape(c.encode_utf8(&mut utf8))),
        }
    }
    pattern
}

/// Turn escaped run-text content back into display text.
///
/// Content with unknown or broken entity references is returned as is.
pub fn unescape_text(raw: &str) -> Cow<'_, str> {
    match quick_xml::escape::unescape(raw) {
        Ok(text) => text,
        Err(e) => {
            log::trace!("Leaving run text escaped: {}", e);
            Cow::Borrowed(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_text("A & B"), "A &amp; B");
        assert_eq!(escape_text("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_text(r#"say "hi" 'there'"#), "say &quot;hi&quot; &apos;there&apos;");
    }

    #[test]
    fn test_escape_plain_text_is_borrowed() {
        assert!(matches!(escape_text("Hello"), Cow::Borrowed("Hello")));
    }

    #[test]
    fn test_stored_text_pattern() {
        let amp = regex::Regex::new(&format!("^{}$", stored_text_pattern("A & B"))).unwrap();
        assert!(amp.is_match("A &amp; B"));
        assert!(!amp.is_match("A & B"));

        let dot = regex::Regex::new(&format!("^{}$", stored_text_pattern("a.c"))).unwrap();
        assert!(dot.is_match("a.c"));
        assert!(!dot.is_match("abc"));

        let re = regex::Regex::new(&format!("^{}$", stored_text_pattern("Don't"))).unwrap();
        for stored in ["Don't", "Don&apos;t", "Don&#39;t", "Don&#x27;t"] {
            assert!(re.is_match(stored), "{}", stored);
        }
        assert!(!re.is_match("Don&quot;t"));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_text("A &amp; B"), "A & B");
        assert_eq!(unescape_text("&#65;"), "A");
        assert_eq!(unescape_text("broken &nope; entity"), "broken &nope; entity");
    }
}
