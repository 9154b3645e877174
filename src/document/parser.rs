// src/document/parser.rs
//! Lenient markup reader with line tracking.
//!
//! Report files are HTML rather than XML, so end-tag names are not checked,
//! void elements never open a scope and raw-text bodies (`script`, `style`)
//! are blanked before parsing. Blanking keeps every newline so line numbers
//! still match the original file. A `<` that cannot open a tag is read as
//! literal text.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use super::tree::{Document, Element, NodeId, NodeKind, ROOT};
use crate::error::{Result, StimtraceError};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Tracks 1-based line numbers from byte offsets as the reader advances.
struct LineTracker<'a> {
    content: &'a [u8],
    line: usize,
    last_position: usize,
}

impl<'a> LineTracker<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content: content.as_bytes(),
            line: 1,
            last_position: 0,
        }
    }

    fn advance_to(&mut self, position: usize) -> usize {
        let end = position.min(self.content.len());
        if end > self.last_position {
            let newlines = self.content[self.last_position..end]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.line += newlines;
            self.last_position = end;
        }
        self.line
    }
}

/// Parses markup text into a [`Document`].
///
/// # Errors
/// Returns `StimtraceError::Markup` when the reader cannot recover, e.g. an
/// unterminated tag at end of input.
pub fn parse(content: &str) -> Result<Document> {
    let blanked = blank_raw_text(content);
    let cleaned = escape_bare_angles(&blanked);
    let mut reader = Reader::from_str(&cleaned);
    reader.trim_text(false);
    reader.check_end_names(false);
    reader.expand_empty_elements(false);

    let mut lines = LineTracker::new(&cleaned);
    let mut doc = Document::with_root();
    let mut stack: Vec<(NodeId, String)> = vec![(ROOT, String::new())];

    loop {
        let line = lines.advance_to(reader.buffer_position());
        let event = reader.read_event().map_err(|e| StimtraceError::Markup {
            position: reader.buffer_position(),
            message: e.to_string(),
        })?;
        let parent = stack.last().map_or(ROOT, |(id, _)| *id);

        match event {
            Event::Start(e) => {
                let element = read_element(&e);
                let name = element.name.clone();
                let id = doc.push(parent, NodeKind::Element(element), line);
                if !VOID_ELEMENTS.contains(&name.as_str()) {
                    stack.push((id, name));
                }
            }
            Event::Empty(e) => {
                doc.push(parent, NodeKind::Element(read_element(&e)), line);
            }
            Event::End(e) => {
                let name = lowercase(e.name().as_ref());
                close_scope(&mut stack, &name);
            }
            Event::Text(t) => {
                doc.push(parent, NodeKind::Text(decode_text(&t)), line);
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c).into_owned();
                doc.push(parent, NodeKind::Text(text), line);
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    doc.seal();
    Ok(doc)
}

/// Pops to the nearest open element with this name; stray end tags are ignored.
fn close_scope(stack: &mut Vec<(NodeId, String)>, name: &str) {
    if let Some(pos) = stack.iter().rposition(|(_, open)| open == name) {
        if pos > 0 {
            stack.truncate(pos);
        }
    }
}

fn read_element(e: &BytesStart<'_>) -> Element {
    let name = lowercase(e.name().as_ref());
    let mut attrs = Vec::new();
    let mut classes = Vec::new();

    let mut iter = e.html_attributes();
    iter.with_checks(false);
    for attr in iter.flatten() {
        let key = lowercase(attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map(Cow::into_owned)
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        if key == "class" {
            classes.extend(value.split_whitespace().map(str::to_string));
        }
        attrs.push((key, value));
    }

    Element {
        name,
        classes,
        attrs,
    }
}

fn decode_text(t: &BytesText<'_>) -> String {
    t.unescape_with(resolve_entity)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| String::from_utf8_lossy(t).into_owned())
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "deg" => "\u{b0}",
        "micro" => "\u{b5}",
        "plusmn" => "\u{b1}",
        "copy" => "\u{a9}",
        "hellip" => "\u{2026}",
        _ => return None,
    })
}

fn lowercase(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

/// Replaces the bodies of raw-text elements with spaces, keeping newlines.
fn blank_raw_text(content: &str) -> Cow<'_, str> {
    let lower = content.to_ascii_lowercase();
    if !RAW_TEXT_ELEMENTS
        .iter()
        .any(|tag| lower.contains(&format!("<{tag}")))
    {
        return Cow::Borrowed(content);
    }

    let mut out = content.as_bytes().to_vec();
    for tag in RAW_TEXT_ELEMENTS {
        let open = format!("<{tag}");
        let close = format!("</{tag}");
        let mut cursor = 0;
        while let Some(start) = lower[cursor..].find(&open).map(|i| i + cursor) {
            let Some(body_start) = lower[start..].find('>').map(|i| i + start + 1) else {
                break;
            };
            let body_end = lower[body_start..]
                .find(&close)
                .map_or(lower.len(), |i| i + body_start);
            for byte in &mut out[body_start..body_end] {
                if *byte != b'\n' {
                    *byte = b' ';
                }
            }
            cursor = body_end;
        }
    }
    // Body ranges start after '>' and end at '<', so whole UTF-8 sequences were overwritten.
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

/// True when the `<` at `index` cannot start a tag, comment, declaration or PI.
fn is_bare_angle(bytes: &[u8], index: usize) -> bool {
    bytes.get(index) == Some(&b'<')
        && !bytes
            .get(index + 1)
            .is_some_and(|b| b.is_ascii_alphabetic() || matches!(*b, b'/' | b'!' | b'?'))
}

/// Escapes every bare `<` so the reader keeps it as text. Newlines are untouched.
fn escape_bare_angles(content: &str) -> Cow<'_, str> {
    let bytes = content.as_bytes();
    if !(0..bytes.len()).any(|i| is_bare_angle(bytes, i)) {
        return Cow::Borrowed(content);
    }
    let mut out = String::with_capacity(content.len() + 8);
    for (i, ch) in content.char_indices() {
        if is_bare_angle(bytes, i) {
            out.push_str("&lt;");
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements_do_not_nest() {
        let doc = parse("<div><br><span class=\"a\">x</span></div>").unwrap();
        let span = doc.elements_named("span").next().unwrap();
        assert!(span.parent().unwrap().is("div"));
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        let doc = parse("<div></p><span>x</span></div><i>y</i>").unwrap();
        let span = doc.elements_named("span").next().unwrap();
        assert!(span.parent().unwrap().is("div"));
        let i = doc.elements_named("i").next().unwrap();
        assert_eq!(i.parent().unwrap().id(), ROOT);
    }

    #[test]
    fn test_script_body_blanked_lines_kept() {
        let src = "<html>\n<script>\nif (a < b) { x(); }\n</script>\n<div class=\"content\">ok</div>\n</html>";
        let doc = parse(src).unwrap();
        let div = doc.elements_named("div").next().unwrap();
        assert_eq!(div.line(), 5);
        assert_eq!(div.text(), "ok");
    }

    #[test]
    fn test_bare_angle_stays_text() {
        let doc = parse(
            "<p><span class=\"text-error\">t|a|b|10_X value < 5</span>\n<span>after</span></p>",
        )
        .unwrap();
        let spans: Vec<_> = doc.elements_named("span").collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(), "t|a|b|10_X value < 5");
        assert_eq!(spans[1].text(), "after");
        assert_eq!(spans[1].line(), 2);
        assert_eq!(spans[0].next_element_siblings().count(), 1);
    }

    #[test]
    fn test_arrows_stay_text() {
        let doc = parse("<p>step 1 -> step 2 <- back</p>\n<span>after</span><i>x <</i>").unwrap();
        let p = doc.elements_named("p").next().unwrap();
        assert_eq!(p.text(), "step 1 -> step 2 <- back");
        let span = doc.elements_named("span").next().unwrap();
        assert_eq!(span.parent().unwrap().id(), ROOT);
        assert_eq!(doc.elements_named("i").next().unwrap().text(), "x <");
    }

    #[test]
    fn test_html_entities() {
        let doc = parse("<span>a&nbsp;&amp;&nbsp;b</span>").unwrap();
        let span = doc.elements_named("span").next().unwrap();
        assert_eq!(span.text(), "a\u{a0}&\u{a0}b");
    }

    #[test]
    fn test_unquoted_and_uppercase_attributes() {
        let doc = parse("<DIV CLASS=title data-tab=campaign>t</DIV>").unwrap();
        let div = doc.elements_named("div").next().unwrap();
        assert!(div.has_class("title"));
        assert_eq!(div.attr("data-tab"), Some("campaign"));
    }
}
