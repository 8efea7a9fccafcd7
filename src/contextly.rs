// ABOUTME: Parsing for the contextly-page embedded-JSON block.
// ABOUTME: Carries redundant title/author/date/tag signals used as late fallbacks.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::document::HtmlView;
use crate::timeparse::parse_embedded_time;

/// The embedded-JSON blob some pages carry in a
/// `<meta name="contextly-page">` tag.
///
/// Every field is optional; the block as a whole is a low-priority fallback
/// source, so malformed JSON simply yields the empty default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContextlyInfo {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub author_display_name: Option<String>,
    pub author_name: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub_date: Option<String>,
    mod_date: Option<String>,
}

impl ContextlyInfo {
    /// Extract and parse the block from a parsed HTML document.
    ///
    /// A missing tag or unparseable JSON yields the empty default.
    pub fn from_html(html: &HtmlView) -> Self {
        html.meta_name("contextly-page")
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// The publication date, pre-parsed from the embedded format.
    pub fn pub_date(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_embedded_time)
    }

    /// The modification date, pre-parsed from the embedded format.
    pub fn mod_date(&self) -> Option<DateTime<Utc>> {
        self.mod_date.as_deref().and_then(parse_embedded_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_full_block() {
        let view = HtmlView::parse(
            r#"<html><head><meta name="contextly-page" content='{
                "title": "Embedded Title",
                "type": "article",
                "image": "http://example.com/e.png",
                "url": "http://example.com/page",
                "author_display_name": "Jane Doe",
                "tags": ["one", "two"],
                "pub_date": "2024-01-15 10:00:00"
            }'></head></html>"#,
        );
        let info = ContextlyInfo::from_html(&view);
        assert_eq!(info.title.as_deref(), Some("Embedded Title"));
        assert_eq!(info.kind.as_deref(), Some("article"));
        assert_eq!(info.tags, vec!["one", "two"]);
        let pub_date = info.pub_date().expect("pub_date should parse");
        assert_eq!(pub_date.year(), 2024);
        assert_eq!(pub_date.hour(), 10);
        assert!(info.mod_date().is_none());
    }

    #[test]
    fn missing_tag_is_default() {
        let view = HtmlView::parse("<html><head></head></html>");
        let info = ContextlyInfo::from_html(&view);
        assert!(info.title.is_none());
        assert!(info.tags.is_empty());
    }

    #[test]
    fn malformed_json_is_default() {
        let view =
            HtmlView::parse(r#"<html><head><meta name="contextly-page" content="{oops"></head></html>"#);
        let info = ContextlyInfo::from_html(&view);
        assert!(info.title.is_none());
    }
}
