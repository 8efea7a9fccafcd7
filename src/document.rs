// ABOUTME: DocumentModel classifying a fetched body by media type and exposing typed views.
// ABOUTME: Provides a queryable parsed tree for HTML and a flat info dictionary for PDF.

use std::collections::HashMap;

use scraper::{Html, Selector};

use crate::resource::decode_body;

/// Coarse/fine media classification, analogous to a MIME type split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub maintype: String,
    pub subtype: String,
}

impl MediaType {
    fn new(maintype: &str, subtype: &str) -> Self {
        Self {
            maintype: maintype.to_string(),
            subtype: subtype.to_string(),
        }
    }

    /// Parse a Content-Type header value, ignoring parameters.
    fn from_content_type(value: &str) -> Option<Self> {
        let mime = value.split(';').next()?.trim().to_lowercase();
        let (main, sub) = mime.split_once('/')?;
        if main.is_empty() || sub.is_empty() {
            return None;
        }
        Some(Self::new(main, sub))
    }

    /// Infer a media type from a URL's file extension.
    fn from_url_extension(url: &str) -> Option<Self> {
        let parsed = url::Url::parse(url).ok()?;
        let last = parsed.path_segments()?.next_back()?;
        let ext = last.rsplit_once('.')?.1.to_lowercase();
        let (main, sub) = match ext.as_str() {
            "html" | "htm" => ("text", "html"),
            "txt" => ("text", "plain"),
            "pdf" => ("application", "pdf"),
            "png" => ("image", "png"),
            "jpg" | "jpeg" => ("image", "jpeg"),
            "gif" => ("image", "gif"),
            "webp" => ("image", "webp"),
            "bmp" => ("image", "bmp"),
            "ico" => ("image", "x-icon"),
            "svg" => ("image", "svg+xml"),
            "mp4" => ("video", "mp4"),
            "webm" => ("video", "webm"),
            "mov" => ("video", "quicktime"),
            "mkv" => ("video", "x-matroska"),
            "mp3" => ("audio", "mpeg"),
            "ogg" => ("audio", "ogg"),
            "wav" => ("audio", "wav"),
            "flac" => ("audio", "flac"),
            "m4a" => ("audio", "mp4"),
            _ => return None,
        };
        Some(Self::new(main, sub))
    }

    /// Probe the first bytes of the body for well-known signatures.
    fn sniff(body: &[u8]) -> Option<Self> {
        if body.starts_with(b"%PDF-") {
            return Some(Self::new("application", "pdf"));
        }
        if body.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::new("image", "png"));
        }
        if body.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::new("image", "jpeg"));
        }
        if body.starts_with(b"GIF8") {
            return Some(Self::new("image", "gif"));
        }
        if body.len() >= 12 && body.starts_with(b"RIFF") && &body[8..12] == b"WEBP" {
            return Some(Self::new("image", "webp"));
        }
        let head_len = body.len().min(256);
        let head = body[..head_len].to_ascii_lowercase();
        let text = String::from_utf8_lossy(&head);
        let trimmed = text.trim_start();
        if trimmed.starts_with("<!doctype html") || trimmed.starts_with("<html") {
            return Some(Self::new("text", "html"));
        }
        None
    }
}

/// The typed view of a classified document body.
#[derive(Debug)]
enum DocumentKind {
    Html(HtmlView),
    Pdf(Option<PdfInfo>),
    Binary,
}

/// Wraps the fetched body, classified by media type.
#[derive(Debug)]
pub struct DocumentModel {
    media: MediaType,
    kind: DocumentKind,
}

impl DocumentModel {
    /// Classify and wrap a fetched body.
    ///
    /// Classification order: Content-Type header, then URL file extension,
    /// then a content sniff; unknowns fall back to application/octet-stream.
    pub fn new(body: &[u8], content_type: Option<&str>, url: Option<&str>) -> Self {
        let media = content_type
            .and_then(MediaType::from_content_type)
            .or_else(|| url.and_then(MediaType::from_url_extension))
            .or_else(|| MediaType::sniff(body))
            .unwrap_or_else(|| MediaType::new("application", "octet-stream"));

        let kind = if media.subtype == "html" {
            let text = decode_body(body, content_type);
            DocumentKind::Html(HtmlView::parse(&text))
        } else if media.subtype == "pdf" {
            DocumentKind::Pdf(PdfInfo::parse(body))
        } else {
            DocumentKind::Binary
        };

        Self { media, kind }
    }

    /// Wrap caller-supplied HTML content directly, bypassing classification.
    pub fn from_html(body: &[u8]) -> Self {
        let text = decode_body(body, Some("text/html"));
        Self {
            media: MediaType::new("text", "html"),
            kind: DocumentKind::Html(HtmlView::parse(&text)),
        }
    }

    pub fn maintype(&self) -> &str {
        &self.media.maintype
    }

    pub fn subtype(&self) -> &str {
        &self.media.subtype
    }

    pub fn is_html(&self) -> bool {
        matches!(self.kind, DocumentKind::Html(_))
    }

    pub fn is_pdf(&self) -> bool {
        self.media.subtype == "pdf"
    }

    pub fn is_image(&self) -> bool {
        self.media.maintype == "image"
    }

    /// The parsed-tree view, for HTML documents.
    pub fn html(&self) -> Option<&HtmlView> {
        match &self.kind {
            DocumentKind::Html(view) => Some(view),
            _ => None,
        }
    }

    /// The info dictionary view, for PDF documents that parsed successfully.
    pub fn pdf_info(&self) -> Option<&PdfInfo> {
        match &self.kind {
            DocumentKind::Pdf(info) => info.as_ref(),
            _ => None,
        }
    }
}

/// A queryable parsed-tree view over an HTML document.
pub struct HtmlView {
    doc: Html,
}

impl std::fmt::Debug for HtmlView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlView").finish_non_exhaustive()
    }
}

impl HtmlView {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// The raw `content` attribute of the first `<meta property=...>` tag.
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.attr_first(&format!("meta[property='{}']", property), "content")
    }

    /// The `content` attributes of every `<meta property=...>` tag, in order.
    pub fn meta_property_all(&self, property: &str) -> Vec<String> {
        self.attr_all(&format!("meta[property='{}']", property), "content")
    }

    /// The raw `content` attribute of the first `<meta name=...>` tag.
    pub fn meta_name(&self, name: &str) -> Option<String> {
        self.attr_first(&format!("meta[name='{}']", name), "content")
    }

    /// The attribute value of the first element matching the selector.
    pub fn attr_first(&self, selector: &str, attr: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.doc
            .select(&sel)
            .find_map(|el| el.value().attr(attr).map(|v| v.to_string()))
    }

    /// The attribute values of every element matching the selector, in order.
    pub fn attr_all(&self, selector: &str, attr: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.doc
            .select(&sel)
            .filter_map(|el| el.value().attr(attr).map(|v| v.to_string()))
            .collect()
    }

    /// The joined inner text of the first element matching the selector.
    pub fn text_first(&self, selector: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.doc
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<Vec<_>>().join(""))
    }

    /// The joined inner text of every element matching the selector, in order.
    pub fn text_all(&self, selector: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.doc
            .select(&sel)
            .map(|el| el.text().collect::<Vec<_>>().join(""))
            .collect()
    }

    /// Every `<meta property=... content=...>` pair in document order.
    ///
    /// Structured Open Graph groups are assembled by scanning this list
    /// forward from a primary tag until the next tag of the same property.
    pub fn meta_property_pairs(&self) -> Vec<(String, String)> {
        let Ok(sel) = Selector::parse("meta[property]") else {
            return Vec::new();
        };
        self.doc
            .select(&sel)
            .filter_map(|el| {
                let property = el.value().attr("property")?;
                let content = el.value().attr("content")?;
                Some((property.to_string(), content.to_string()))
            })
            .collect()
    }
}

/// A flat metadata dictionary extracted from a PDF's document info.
#[derive(Debug, Default)]
pub struct PdfInfo {
    entries: HashMap<String, Vec<u8>>,
}

impl PdfInfo {
    /// Parse the info dictionary out of raw PDF bytes.
    ///
    /// Any parse failure yields None; callers treat that as an absent
    /// metadata view, never an error.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let doc = lopdf::Document::load_mem(body).ok()?;
        let info = doc.trailer.get(b"Info").ok()?;
        let dict = match info {
            lopdf::Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok()?,
            lopdf::Object::Dictionary(dict) => dict,
            _ => return None,
        };

        let mut entries = HashMap::new();
        for (key, value) in dict.iter() {
            let value = match value {
                lopdf::Object::Reference(id) => match doc.get_object(*id) {
                    Ok(obj) => obj,
                    Err(_) => continue,
                },
                other => other,
            };
            if let lopdf::Object::String(bytes, _) = value {
                entries.insert(String::from_utf8_lossy(key).into_owned(), bytes.clone());
            }
        }
        Some(Self { entries })
    }

    /// The raw bytes of an info entry (Title, Author, Subject, ...).
    pub fn get_raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    /// An info entry decoded to text, best-effort.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get_raw(key).map(decode_pdf_string)
    }

    #[cfg(test)]
    fn from_entries(entries: &[(&str, &[u8])]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_vec()))
                .collect(),
        }
    }
}

/// Decode a PDF string value to text.
///
/// PDF text strings are either PDFDocEncoded (ASCII-compatible) or UTF-16
/// with a 2-byte BOM prefix; the BOM is detected and stripped during
/// decoding. Invalid bytes are replaced, never fatal.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (decoded, _, _) = encoding_rs::UTF_16BE.decode(bytes);
        return decoded.into_owned();
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (decoded, _, _) = encoding_rs::UTF_16LE.decode(bytes);
        return decoded.into_owned();
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classify_from_content_type_header() {
        let doc = DocumentModel::new(b"<html></html>", Some("text/html; charset=utf-8"), None);
        assert_eq!(doc.maintype(), "text");
        assert_eq!(doc.subtype(), "html");
        assert!(doc.is_html());
        assert!(!doc.is_pdf());
        assert!(!doc.is_image());
    }

    #[test]
    fn classify_from_url_extension() {
        let doc = DocumentModel::new(b"garbage", None, Some("http://example.com/photo.JPG"));
        assert_eq!(doc.maintype(), "image");
        assert_eq!(doc.subtype(), "jpeg");
        assert!(doc.is_image());
    }

    #[test]
    fn classify_pdf_by_sniff() {
        let doc = DocumentModel::new(b"%PDF-1.4 junk", None, Some("http://example.com/download"));
        assert_eq!(doc.maintype(), "application");
        assert_eq!(doc.subtype(), "pdf");
        assert!(doc.is_pdf());
        // Unparseable PDF bytes yield an absent info view, not an error.
        assert!(doc.pdf_info().is_none());
    }

    #[test]
    fn classify_html_by_sniff() {
        let doc = DocumentModel::new(b"\n  <!DOCTYPE HTML><html></html>", None, None);
        assert_eq!(doc.subtype(), "html");
    }

    #[test]
    fn classify_unknown_is_octet_stream() {
        let doc = DocumentModel::new(&[0x00, 0x01, 0x02], None, Some("http://example.com/blob"));
        assert_eq!(doc.maintype(), "application");
        assert_eq!(doc.subtype(), "octet-stream");
        assert!(!doc.is_html());
    }

    #[test]
    fn html_view_meta_queries() {
        let view = HtmlView::parse(
            r#"<html><head>
                <meta property="og:title" content="The Title">
                <meta property="og:image" content="/a.png">
                <meta property="og:image" content="/b.png">
                <meta name="author" content="Jane">
            </head><body><p>First</p><p>Second</p></body></html>"#,
        );
        assert_eq!(view.meta_property("og:title"), Some("The Title".to_string()));
        assert_eq!(
            view.meta_property_all("og:image"),
            vec!["/a.png".to_string(), "/b.png".to_string()]
        );
        assert_eq!(view.meta_name("author"), Some("Jane".to_string()));
        assert_eq!(view.text_first("p"), Some("First".to_string()));
        assert_eq!(view.text_all("p").len(), 2);
        assert_eq!(view.meta_property("og:missing"), None);
    }

    #[test]
    fn html_view_property_pairs_in_order() {
        let view = HtmlView::parse(
            r#"<html><head>
                <meta property="og:image" content="/a.png">
                <meta property="og:image:width" content="640">
                <meta property="og:image" content="/b.png">
            </head></html>"#,
        );
        let pairs = view.meta_property_pairs();
        assert_eq!(pairs[0].0, "og:image");
        assert_eq!(pairs[1].0, "og:image:width");
        assert_eq!(pairs[2].0, "og:image");
    }

    #[test]
    fn pdf_string_ascii() {
        assert_eq!(decode_pdf_string(b"Plain Title"), "Plain Title");
    }

    #[test]
    fn pdf_string_utf16be_bom_stripped() {
        // UTF-16BE with BOM: "Hi"
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn pdf_info_get_text() {
        let info = PdfInfo::from_entries(&[("Title", b"Report".as_slice())]);
        assert_eq!(info.get_text("Title"), Some("Report".to_string()));
        assert_eq!(info.get_text("Author"), None);
    }
}
