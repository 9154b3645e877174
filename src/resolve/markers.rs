// src/resolve/markers.rs
//! Stimulation and test-case markers read from document headers.

use serde::Serialize;

use crate::config::MarkupConfig;
use crate::document::{Document, NodeRef};

/// A named scope header. Events after it (until the next one) belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StimulationMarker {
    pub line: usize,
    pub name: String,
}

/// A test-case label, matched to events by absolute line distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseMarker {
    pub line: usize,
    pub name: String,
}

impl StimulationMarker {
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self { line, name: name.into() }
    }
}

impl TestCaseMarker {
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self { line, name: name.into() }
    }
}

fn title_divs<'a>(
    doc: &'a Document,
    markup: &'a MarkupConfig,
) -> impl Iterator<Item = NodeRef<'a>> + 'a {
    doc.elements_named("div")
        .filter(move |div| div.has_class(&markup.title_class))
}

/// Title headers holding a highlight label, in document order.
#[must_use]
pub fn extract_stimulations(doc: &Document, markup: &MarkupConfig) -> Vec<StimulationMarker> {
    title_divs(doc, markup)
        .filter_map(|div| {
            let label = div
                .descendants_named("span")
                .find(|span| span.has_class(&markup.highlight_class))?;
            Some(StimulationMarker::new(label.stripped_text(), div.line()))
        })
        .collect()
}

/// Title headers also marked as tests; the name is the first token of their text.
#[must_use]
pub fn extract_test_cases(doc: &Document, markup: &MarkupConfig) -> Vec<TestCaseMarker> {
    title_divs(doc, markup)
        .filter(|div| div.has_class(&markup.test_class))
        .filter_map(|div| {
            let text = div.stripped_text();
            let name = text.split_whitespace().next()?;
            Some(TestCaseMarker::new(name, div.line()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<body>
<div class="title"><span class="highlight"> Stim One </span></div>
<div class="title test">
  05_Power check
</div>
<div class="title">no label</div>
<div class="title test"> </div>
<div class="title"><b><span class="highlight">Stim Two</span></b></div>
</body>"#;

    #[test]
    fn test_stimulation_markers() {
        let doc = Document::parse(DOC).unwrap();
        let markers = extract_stimulations(&doc, &MarkupConfig::default());
        assert_eq!(
            markers,
            vec![
                StimulationMarker::new("Stim One", 2),
                StimulationMarker::new("Stim Two", 8),
            ]
        );
    }

    #[test]
    fn test_test_case_markers_skip_empty() {
        let doc = Document::parse(DOC).unwrap();
        let markers = extract_test_cases(&doc, &MarkupConfig::default());
        assert_eq!(markers, vec![TestCaseMarker::new("05_Power", 3)]);
    }
}
