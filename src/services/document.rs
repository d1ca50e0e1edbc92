// src/services/document.rs

//! HTML document feature parser.
//!
//! Pulls a fixed set of shallow signals out of one document: title, paragraph
//! text, and link/image target descriptors.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::FeatureRecord;
use crate::utils::url::{UrlParts, classify};

/// Parser holding the compiled element selectors.
pub struct DocumentParser {
    title: Selector,
    paragraph: Selector,
    anchor: Selector,
    image: Selector,
    strict_utf8: bool,
}

impl DocumentParser {
    /// Create a parser that decodes invalid UTF-8 lossily.
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: Self::parse_selector("title")?,
            paragraph: Self::parse_selector("p")?,
            anchor: Self::parse_selector("a")?,
            image: Self::parse_selector("img")?,
            strict_utf8: false,
        })
    }

    /// Reject documents that are not valid UTF-8 instead of decoding lossily.
    pub fn strict_utf8(mut self, strict: bool) -> Self {
        self.strict_utf8 = strict;
        self
    }

    /// Decode and parse raw entry bytes.
    ///
    /// `entry` only labels the error when decoding fails.
    pub fn parse_bytes(&self, entry: &str, bytes: &[u8]) -> Result<FeatureRecord> {
        let html = match std::str::from_utf8(bytes) {
            Ok(text) => std::borrow::Cow::Borrowed(text),
            Err(e) if self.strict_utf8 => return Err(AppError::document(entry, e)),
            Err(e) => {
                log::debug!("{entry}: {e}, decoding lossily");
                String::from_utf8_lossy(bytes)
            }
        };
        Ok(self.parse_html(&html))
    }

    /// Parse markup into a feature record. `document_id` is left empty.
    pub fn parse_html(&self, html: &str) -> FeatureRecord {
        let document = Html::parse_document(html);
        self.extract(&document)
    }

    /// Extract features from an already parsed tree.
    pub fn extract(&self, document: &Html) -> FeatureRecord {
        let mut record = FeatureRecord::default();

        if let Some(title) = document.select(&self.title).next() {
            let text: String = title.text().collect();
            record.title_char_count = text.trim().chars().count();
            record.title_word_count = text.split_whitespace().count();
            record.title_text = text;
        }

        record.body_text = document
            .select(&self.paragraph)
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ");

        for target in Self::targets(document, &self.anchor, "href") {
            record.link_count += 1;
            if let Some(parts) = target {
                record.link_network_locations.push(parts.resource());
                record.link_schemes.push(parts.scheme);
            }
        }

        for source in Self::targets(document, &self.image, "src") {
            record.image_count += 1;
            if let Some(parts) = source {
                record.image_network_locations.push(parts.resource());
                record.image_extensions.push(parts.extension().to_string());
                record.image_schemes.push(parts.scheme);
            }
        }

        record
    }

    /// Classified attribute values of every matching element, in document order.
    fn targets<'a>(
        document: &'a Html,
        selector: &'a Selector,
        attr: &'a str,
    ) -> impl Iterator<Item = Option<UrlParts>> + 'a {
        document
            .select(selector)
            .map(move |el: ElementRef<'a>| classify(el.value().attr(attr)))
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::config(format!("invalid selector '{s}': {e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> FeatureRecord {
        DocumentParser::new().unwrap().parse_html(html)
    }

    #[test]
    fn test_full_document() {
        let record = parse(
            r#"<html><head><title> Hello World </title></head>
            <body><p>Body text.</p>
            <a href="http://a.com/x">x</a>
            <img src="http://b.com/y.png"></body></html>"#,
        );

        assert_eq!(record.title_text, " Hello World ");
        assert_eq!(record.title_char_count, 11);
        assert_eq!(record.title_word_count, 2);
        assert_eq!(record.body_text, "Body text.");
        assert_eq!(record.link_count, 1);
        assert_eq!(record.link_network_locations, vec!["a_com"]);
        assert_eq!(record.link_schemes, vec!["http"]);
        assert_eq!(record.image_count, 1);
        assert_eq!(record.image_network_locations, vec!["b_com"]);
        assert_eq!(record.image_schemes, vec!["http"]);
        assert_eq!(record.image_extensions, vec!["png"]);
        assert!(record.document_id.is_empty());
    }

    #[test]
    fn test_missing_title_defaults() {
        let record = parse("<html><body><p>no title</p></body></html>");
        assert_eq!(record.title_text, "");
        assert_eq!(record.title_char_count, 0);
        assert_eq!(record.title_word_count, 0);
    }

    #[test]
    fn test_first_title_wins() {
        let record = parse("<title>One</title><title>Two</title>");
        assert_eq!(record.title_text, "One");
    }

    #[test]
    fn test_paragraphs_joined_in_order() {
        let record = parse("<p>first <b>bold</b></p><div><p>second</p></div><p></p>");
        assert_eq!(record.body_text, "first bold second ");
    }

    #[test]
    fn test_malformed_link_counted_but_not_listed() {
        let record = parse(
            r#"<a href="not a url:::">bad</a>
            <a href="https://ok.org/">ok</a>
            <a>no href</a>"#,
        );

        assert_eq!(record.link_count, 3);
        assert_eq!(record.link_network_locations, vec!["ok_org", ""]);
        assert_eq!(record.link_schemes, vec!["https", ""]);
        assert!(record.link_network_locations.len() <= record.link_count);
    }

    #[test]
    fn test_relative_image_sources() {
        let record = parse(r#"<img src="/static/pic.JPG"><img src="data"><img>"#);
        assert_eq!(record.image_count, 3);
        assert_eq!(record.image_network_locations, vec!["", "", ""]);
        assert_eq!(record.image_extensions, vec!["JPG", "", ""]);
    }

    #[test]
    fn test_unclosed_tags_degrade_gracefully() {
        let record = parse("<p>text <a href='http://x.io'>link");
        assert_eq!(record.title_text, "");
        assert_eq!(record.body_text, "text link");
        assert_eq!(record.link_count, 1);
        assert_eq!(record.link_network_locations, vec!["x_io"]);
    }

    #[test]
    fn test_parse_bytes_lossy_and_strict() {
        let bytes = b"<title>caf\xe9</title>";
        let lossy = DocumentParser::new().unwrap();
        assert_eq!(lossy.parse_bytes("a.html", bytes).unwrap().title_text, "caf\u{fffd}");

        let strict = DocumentParser::new().unwrap().strict_utf8(true);
        let err = strict.parse_bytes("a.html", bytes).unwrap_err();
        assert!(err.is_entry_fault());
    }
}
