//! Paragraph stream normalizer for HTML help pages.
//!
//! Every `<p>` element becomes one [`Paragraph`]. Its style tag is the
//! element's first class name. `<br>` elements become literal newlines so a
//! multi-overload signature block stays a single paragraph.

use crate::model::Paragraph;
use scraper::{ElementRef, Html, Node, Selector};
use unicode_normalization::UnicodeNormalization;

/// A parsed HTML help page that can be walked as a paragraph stream any
/// number of times.
pub struct HtmlSource {
    document: Html,
    selector: Selector,
    normalize_unicode: bool,
}

impl HtmlSource {
    /// Parse an HTML document. Malformed markup is recovered by the HTML
    /// parser; this never fails.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            selector: Selector::parse("p").unwrap(),
            normalize_unicode: true,
        }
    }

    /// Enable or disable NFC normalization of paragraph text.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Iterate over the paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph> + '_ {
        self.document
            .select(&self.selector)
            .map(move |p| self.to_paragraph(p))
    }

    /// Number of paragraph elements in the document.
    pub fn paragraph_count(&self) -> usize {
        self.document.select(&self.selector).count()
    }

    fn to_paragraph(&self, element: ElementRef<'_>) -> Paragraph {
        let style = element
            .value()
            .attr("class")
            .and_then(|classes| classes.split_ascii_whitespace().next())
            .unwrap_or_default();
        let raw = element_text(element);
        let text = if self.normalize_unicode {
            raw.trim().nfc().collect::<String>()
        } else {
            raw.trim().to_string()
        };
        Paragraph::new(text, style)
    }
}

/// Collect the text of an element, turning `<br>` into `\n` and collapsing
/// runs of source-formatting whitespace inside text nodes.
fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => push_collapsed(&mut out, text),
            Node::Element(el) if el.name().eq_ignore_ascii_case("br") => out.push('\n'),
            _ => {}
        }
    }
    out
}

fn push_collapsed(out: &mut String, text: &str) {
    let mut in_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_in_document_order() {
        let source = HtmlSource::parse(
            r#"<html><body>
            <p class="p1">Class Foo</p>
            <p class="p2 extra">Foo methods</p>
            <p class="p4 a1">Text.</p>
            <p>plain</p>
            </body></html>"#,
        );
        let paragraphs: Vec<_> = source.paragraphs().collect();
        assert_eq!(paragraphs.len(), 4);
        assert_eq!(paragraphs[0], Paragraph::new("Class Foo", "p1"));
        assert_eq!(paragraphs[1].style, "p2");
        assert_eq!(paragraphs[2].style, "p4");
        assert_eq!(paragraphs[3].style, "");
        assert_eq!(source.paragraph_count(), 4);
    }

    #[test]
    fn test_br_becomes_newline() {
        let source = HtmlSource::parse(
            r#"<p class="p2">(void)f(void)<br>(void)f(integer x)<br/></p>"#,
        );
        let p = source.paragraphs().next().unwrap();
        assert_eq!(p.text, "(void)f(void)\n(void)f(integer x)");
    }

    #[test]
    fn test_source_whitespace_collapsed_and_entities_decoded() {
        let source = HtmlSource::parse(
            "<p class=\"p3\">  tag   &lt;–&gt;\n   (integer$)  </p>",
        );
        let p = source.paragraphs().next().unwrap();
        assert_eq!(p.text, "tag <–> (integer$)");
    }

    #[test]
    fn test_nested_inline_markup_flattened() {
        let source = HtmlSource::parse(
            r#"<p class="p4">Returns <span class="s1"><b>T</b></span> if set.</p>"#,
        );
        let p = source.paragraphs().next().unwrap();
        assert_eq!(p.text, "Returns T if set.");
    }

    #[test]
    fn test_stream_is_restartable() {
        let source = HtmlSource::parse(r#"<p class="p1">a</p><p class="p2">b</p>"#);
        let first: Vec<_> = source.paragraphs().collect();
        let second: Vec<_> = source.paragraphs().collect();
        assert_eq!(first, second);
    }
}
