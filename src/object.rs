// ABOUTME: RichObject, the resolved metadata record with one memoized fallback chain per field.
// ABOUTME: Each getter consults the DocumentModel, TimeParser, UrlResolver, and ImageRanker on demand.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::unsync::OnceCell;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::contextly::ContextlyInfo;
use crate::document::DocumentModel;
use crate::imagerank;
use crate::timeparse::{parse_opengraph_time, parse_pdf_time};
use crate::urlutil;

/// A structured Open Graph media sub-object: the primary tag's URL plus the
/// trailing descriptor tags that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructMedia {
    pub url: String,
    pub width: Option<String>,
    pub height: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub secure_url: Option<String>,
}

/// Gate every metadata signal through this: trimmed non-empty, and not an
/// unresolved `{{...}}` template placeholder.
fn valid_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("{{") && trimmed.ends_with("}}") {
        return None;
    }
    Some(trimmed.to_string())
}

/// The resolved rich object for one fetched resource.
///
/// Fields are computed lazily on first access and cached; re-reads are
/// idempotent. A field with no discoverable signal resolves to its defined
/// default (`None`, an empty sequence, or a literal), never an error.
/// `image()` and `snapshot()` are async because the biggest-image fallback
/// downloads candidate images.
///
/// Objects built from markup alone carry no URL context; URL-derived
/// signals (hostname fallbacks, file-name titles, relative-reference
/// absolutization) then resolve as absent.
#[derive(Debug)]
pub struct RichObject {
    base_url: Option<String>,
    headers: HashMap<String, String>,
    document: DocumentModel,
    http: reqwest::Client,
    max_download_size: usize,

    contextly: OnceCell<ContextlyInfo>,
    title: OnceCell<Option<String>>,
    kind: OnceCell<String>,
    url: OnceCell<Option<String>>,
    image: OnceCell<Option<String>>,
    images: OnceCell<Vec<String>>,
    description: OnceCell<Option<String>>,
    author: OnceCell<Option<String>>,
    site_name: OnceCell<Option<String>>,
    generator: OnceCell<Option<String>>,
    locale: OnceCell<Option<String>>,
    locale_alternative: OnceCell<Vec<String>>,
    determiner: OnceCell<String>,
    audio: OnceCell<Option<String>>,
    video: OnceCell<Option<String>>,
    tags: OnceCell<Vec<String>>,
    section: OnceCell<Option<String>>,
    created_time: OnceCell<Option<DateTime<Utc>>>,
    published_time: OnceCell<Option<DateTime<Utc>>>,
    modified_time: OnceCell<Option<DateTime<Utc>>>,
    expiration_time: OnceCell<Option<DateTime<Utc>>>,
    struct_image: OnceCell<Option<StructMedia>>,
    struct_video: OnceCell<Option<StructMedia>>,
    struct_audio: OnceCell<Option<StructMedia>>,
    obj_music_song: OnceCell<Option<Value>>,
    obj_music_album: OnceCell<Option<Value>>,
    obj_music_playlist: OnceCell<Option<Value>>,
    obj_music_radio_station: OnceCell<Option<Value>>,
    obj_video_movie: OnceCell<Option<Value>>,
    obj_article: OnceCell<Option<Value>>,
    obj_book: OnceCell<Option<Value>>,
    obj_profile: OnceCell<Option<Value>>,
}

impl RichObject {
    pub(crate) fn new(
        document: DocumentModel,
        base_url: Option<String>,
        headers: HashMap<String, String>,
        http: reqwest::Client,
        max_download_size: usize,
    ) -> Self {
        Self {
            base_url,
            headers,
            document,
            http,
            max_download_size,
            contextly: OnceCell::new(),
            title: OnceCell::new(),
            kind: OnceCell::new(),
            url: OnceCell::new(),
            image: OnceCell::new(),
            images: OnceCell::new(),
            description: OnceCell::new(),
            author: OnceCell::new(),
            site_name: OnceCell::new(),
            generator: OnceCell::new(),
            locale: OnceCell::new(),
            locale_alternative: OnceCell::new(),
            determiner: OnceCell::new(),
            audio: OnceCell::new(),
            video: OnceCell::new(),
            tags: OnceCell::new(),
            section: OnceCell::new(),
            created_time: OnceCell::new(),
            published_time: OnceCell::new(),
            modified_time: OnceCell::new(),
            expiration_time: OnceCell::new(),
            struct_image: OnceCell::new(),
            struct_video: OnceCell::new(),
            struct_audio: OnceCell::new(),
            obj_music_song: OnceCell::new(),
            obj_music_album: OnceCell::new(),
            obj_music_playlist: OnceCell::new(),
            obj_music_radio_station: OnceCell::new(),
            obj_video_movie: OnceCell::new(),
            obj_article: OnceCell::new(),
            obj_book: OnceCell::new(),
            obj_profile: OnceCell::new(),
        }
    }

    /// The URL/identity supplied by the caller, if any. Set once, never
    /// mutated.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// The classified document view.
    pub fn document(&self) -> &DocumentModel {
        &self.document
    }

    fn contextly(&self) -> &ContextlyInfo {
        self.contextly.get_or_init(|| {
            self.document
                .html()
                .map(ContextlyInfo::from_html)
                .unwrap_or_default()
        })
    }

    /// Title: PDF Title metadata, `og:title`, `<title>`, embedded-JSON
    /// title, the URL's file name (non-HTML), then `site_name`.
    pub fn title(&self) -> Option<&str> {
        self.title.get_or_init(|| self.compute_title()).as_deref()
    }

    fn compute_title(&self) -> Option<String> {
        let mut title = None;
        if self.document.is_pdf() {
            if let Some(info) = self.document.pdf_info() {
                title = info.get_text("Title").and_then(|t| valid_string(&t));
            }
        } else if let Some(html) = self.document.html() {
            // og:title content is returned byte-exact once it passes the
            // valid-string gate.
            title = html
                .meta_property("og:title")
                .filter(|c| valid_string(c).is_some());
            if title.is_none() {
                title = html.text_first("title").and_then(|t| valid_string(&t));
            }
            if title.is_none() {
                title = self
                    .contextly()
                    .title
                    .as_deref()
                    .and_then(valid_string);
            }
        }
        if title.is_none() && !self.document.is_html() {
            title = self.file_name_from_base_url();
        }
        if title.is_none() {
            title = self.site_name().map(str::to_string);
        }
        title
    }

    /// The last path segment of `base_url`, percent-decoded.
    fn file_name_from_base_url(&self) -> Option<String> {
        let parsed = Url::parse(self.base_url.as_deref()?).ok()?;
        let last = parsed.path_segments()?.next_back()?;
        let decoded = percent_decode_str(last).decode_utf8_lossy();
        if decoded.is_empty() {
            None
        } else {
            Some(decoded.into_owned())
        }
    }

    /// Type: the main media type for non-text resources, a `video` override
    /// for Facebook video URLs, `og:type` with its namespace prefix
    /// stripped, the embedded-JSON type, then `website`. Always lowercase.
    pub fn object_type(&self) -> &str {
        self.kind.get_or_init(|| self.compute_type())
    }

    fn compute_type(&self) -> String {
        let maintype = self.document.maintype();
        let facebook_video = self
            .url()
            .is_some_and(|u| u.contains("facebook.com/") && u.contains("/videos/"));
        let kind = if maintype != "text" {
            maintype.to_string()
        } else if facebook_video {
            "video".to_string()
        } else {
            let mut kind = self
                .document
                .html()
                .and_then(|h| h.meta_property("og:type"))
                .and_then(|c| valid_string(&c))
                .map(|t| t.rsplit(':').next().unwrap_or("").to_string());
            if kind.is_none() {
                kind = self.contextly().kind.as_deref().and_then(valid_string);
            }
            kind.unwrap_or_else(|| "website".to_string())
        };
        kind.to_lowercase()
    }

    /// The MIME subtype of the fetched resource (html, pdf, png, ...).
    pub fn subtype(&self) -> &str {
        self.document.subtype()
    }

    /// Canonical URL: `og:url`, embedded-JSON url, then `base_url`.
    pub fn url(&self) -> Option<&str> {
        self.url
            .get_or_init(|| {
                let mut url = self
                    .document
                    .html()
                    .and_then(|h| h.meta_property("og:url"))
                    .and_then(|c| valid_string(&c));
                if url.is_none() {
                    url = self.contextly().url.as_deref().and_then(valid_string);
                }
                url.or_else(|| self.base_url.clone())
            })
            .as_deref()
    }

    /// Image: the resource itself for image media, the MediaWiki thumbnail,
    /// `og:image`, the embedded-JSON image, the biggest `<img>` on the page,
    /// then the favicon links. Relative results are made absolute.
    pub async fn image(&self) -> Option<&str> {
        if self.image.get().is_none() {
            let computed = self.compute_image().await;
            let _ = self.image.set(computed);
        }
        self.image.get().and_then(|v| v.as_deref())
    }

    async fn compute_image(&self) -> Option<String> {
        let mut image = None;
        if self.document.is_image() {
            image = self.base_url.clone();
        } else if let Some(html) = self.document.html() {
            if self.generator().is_some_and(|g| g.contains("MediaWiki")) {
                image = html.attr_first("div.thumbinner img", "src");
            }
            if image.is_none() {
                image = html.meta_property("og:image").and_then(|c| valid_string(&c));
            }
            if image.is_none() {
                image = self.contextly().image.as_deref().and_then(valid_string);
            }
            if image.is_none() {
                let candidates: Vec<String> = html
                    .attr_all("img", "src")
                    .iter()
                    .filter_map(|src| self.absolutize(src))
                    .collect();
                image =
                    imagerank::pick_biggest(&self.http, &candidates, self.max_download_size).await;
            }
            if image.is_none() {
                image = html.attr_first("link[rel='shortcut icon']", "href");
            }
            if image.is_none() {
                image = html.attr_first("link[rel='icon']", "href");
            }
        }
        image.and_then(|i| self.absolutize(&i))
    }

    /// Make a candidate reference absolute against `base_url`. Absolute
    /// candidates pass through; a relative candidate without a URL context
    /// resolves as absent.
    fn absolutize(&self, candidate: &str) -> Option<String> {
        if candidate.starts_with("http") {
            return Some(candidate.to_string());
        }
        let base = self.base_url.as_deref()?;
        urlutil::resolve(base, candidate).ok()
    }

    /// All `og:image` contents, in document order.
    pub fn images(&self) -> &[String] {
        self.images.get_or_init(|| {
            self.document
                .html()
                .map(|h| h.meta_property_all("og:image"))
                .unwrap_or_default()
        })
    }

    /// Description: PDF Subject, `og:description`, the description meta tag,
    /// then the first substantial paragraph truncated to 100 characters.
    pub fn description(&self) -> Option<&str> {
        self.description
            .get_or_init(|| self.compute_description())
            .as_deref()
    }

    fn compute_description(&self) -> Option<String> {
        if self.document.is_pdf() {
            return self
                .document
                .pdf_info()
                .and_then(|info| info.get_text("Subject"))
                .and_then(|s| valid_string(&s));
        }
        let html = self.document.html()?;
        if let Some(desc) = html
            .meta_property("og:description")
            .and_then(|c| valid_string(&c))
        {
            return Some(desc);
        }
        if let Some(desc) = html.meta_name("description").and_then(|c| valid_string(&c)) {
            return Some(desc);
        }
        for text in html.text_all("p") {
            if text.trim().is_empty() || text.chars().count() < 20 {
                continue;
            }
            let mut description: String = text.chars().take(100).collect();
            if text.chars().count() > 100 {
                description.push_str("...");
            }
            return Some(description);
        }
        None
    }

    /// Author: PDF Author, `og:author`, `article:author`, `book:author`,
    /// embedded-JSON author names, then the author meta tag.
    pub fn author(&self) -> Option<&str> {
        self.author.get_or_init(|| self.compute_author()).as_deref()
    }

    fn compute_author(&self) -> Option<String> {
        if self.document.is_pdf() {
            return self
                .document
                .pdf_info()
                .and_then(|info| info.get_text("Author"))
                .and_then(|a| valid_string(&a));
        }
        let html = self.document.html()?;
        for property in ["og:author", "article:author", "book:author"] {
            if let Some(author) = html.meta_property(property).and_then(|c| valid_string(&c)) {
                return Some(author);
            }
        }
        let contextly = self.contextly();
        if let Some(author) = contextly
            .author_display_name
            .as_deref()
            .and_then(valid_string)
        {
            return Some(author);
        }
        if let Some(author) = contextly.author_name.as_deref().and_then(valid_string) {
            return Some(author);
        }
        html.meta_name("author").and_then(|c| valid_string(&c))
    }

    /// Site name: `og:site_name`, falling back to the hostname of `base_url`.
    pub fn site_name(&self) -> Option<&str> {
        self.site_name
            .get_or_init(|| {
                let mut name = self
                    .document
                    .html()
                    .and_then(|h| h.meta_property("og:site_name"))
                    .and_then(|c| valid_string(&c));
                if name.is_none() {
                    name = self
                        .base_url
                        .as_deref()
                        .and_then(|b| Url::parse(b).ok())
                        .and_then(|u| u.host_str().map(str::to_string));
                }
                name
            })
            .as_deref()
    }

    /// Generator: PDF Creator then Producer; HTML generator meta tag.
    pub fn generator(&self) -> Option<&str> {
        self.generator
            .get_or_init(|| {
                if self.document.is_pdf() {
                    let info = self.document.pdf_info()?;
                    return info
                        .get_text("Creator")
                        .and_then(|c| valid_string(&c))
                        .or_else(|| info.get_text("Producer").and_then(|p| valid_string(&p)));
                }
                self.document
                    .html()?
                    .meta_name("generator")
                    .and_then(|c| valid_string(&c))
            })
            .as_deref()
    }

    /// Locale: `og:locale`, `<html lang>`, `<html xml:lang>`, then the
    /// Content-Language response header. Uppercased.
    pub fn locale(&self) -> Option<&str> {
        self.locale
            .get_or_init(|| {
                let mut locale = None;
                if let Some(html) = self.document.html() {
                    locale = html.meta_property("og:locale").and_then(|c| valid_string(&c));
                    if locale.is_none() {
                        locale = html.attr_first("html", "lang");
                    }
                    if locale.is_none() {
                        locale = html.attr_first("html", "xml:lang");
                    }
                }
                if locale.is_none() {
                    locale = self.headers.get("content-language").cloned();
                }
                locale.map(|l| l.to_uppercase())
            })
            .as_deref()
    }

    /// All `og:locale_alternative` contents.
    pub fn locale_alternative(&self) -> &[String] {
        self.locale_alternative.get_or_init(|| {
            self.document
                .html()
                .map(|h| h.meta_property_all("og:locale_alternative"))
                .unwrap_or_default()
        })
    }

    /// Determiner: `og:determiner`, defaulting to `auto`.
    pub fn determiner(&self) -> &str {
        self.determiner.get_or_init(|| {
            self.document
                .html()
                .and_then(|h| h.meta_property("og:determiner"))
                .and_then(|c| valid_string(&c))
                .unwrap_or_else(|| "auto".to_string())
        })
    }

    /// Audio: the `og:audio` content.
    pub fn audio(&self) -> Option<&str> {
        self.audio
            .get_or_init(|| {
                self.document
                    .html()?
                    .meta_property("og:audio")
                    .and_then(|c| valid_string(&c))
            })
            .as_deref()
    }

    /// Video: `og:video`, `og:video:url`, `og:video:secure_url`, the HTML5
    /// `<video><source>` tag, or the resource itself for video media.
    /// Relative results are made absolute.
    pub fn video(&self) -> Option<&str> {
        self.video.get_or_init(|| self.compute_video()).as_deref()
    }

    fn compute_video(&self) -> Option<String> {
        let mut video = None;
        if let Some(html) = self.document.html() {
            for property in ["og:video", "og:video:url", "og:video:secure_url"] {
                video = html.meta_property(property).and_then(|c| valid_string(&c));
                if video.is_some() {
                    break;
                }
            }
            if video.is_none() {
                video = html.attr_first("video source", "src");
            }
        } else if self.document.maintype() == "video" {
            video = self.base_url.clone();
        }
        video.and_then(|v| self.absolutize(&v))
    }

    /// Tags: PDF Keywords split on whitespace; the union of `og:tag`,
    /// `article:tag`, and `video:tag` contents; then embedded-JSON tags.
    pub fn tags(&self) -> &[String] {
        self.tags.get_or_init(|| self.compute_tags())
    }

    fn compute_tags(&self) -> Vec<String> {
        if self.document.is_pdf() {
            return self
                .document
                .pdf_info()
                .and_then(|info| info.get_text("Keywords"))
                .map(|kw| kw.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();
        }
        let Some(html) = self.document.html() else {
            return Vec::new();
        };
        let mut tags = Vec::new();
        for property in ["og:tag", "article:tag", "video:tag"] {
            tags.extend(html.meta_property_all(property));
        }
        if tags.is_empty() {
            tags = self.contextly().tags.clone();
        }
        tags
    }

    /// Section: `og:section`, `article:section`, then the first
    /// embedded-JSON category.
    pub fn section(&self) -> Option<&str> {
        self.section
            .get_or_init(|| {
                let html = self.document.html()?;
                for property in ["og:section", "article:section"] {
                    if let Some(section) =
                        html.meta_property(property).and_then(|c| valid_string(&c))
                    {
                        return Some(section);
                    }
                }
                self.contextly()
                    .categories
                    .first()
                    .map(String::from)
            })
            .as_deref()
    }

    /// Live alias of [`section`](Self::section).
    pub fn category(&self) -> Option<&str> {
        self.section()
    }

    /// Created time: the PDF CreationDate.
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        *self.created_time.get_or_init(|| {
            self.document
                .pdf_info()
                .and_then(|info| info.get_text("CreationDate"))
                .and_then(|d| parse_pdf_time(&d))
        })
    }

    /// Published time: `og:published_time`, `article:published_time`,
    /// the embedded-JSON pub date, then the legacy `issued` meta tag.
    pub fn published_time(&self) -> Option<DateTime<Utc>> {
        *self.published_time.get_or_init(|| {
            let html = self.document.html()?;
            self.meta_time(html, "og:published_time")
                .or_else(|| self.meta_time(html, "article:published_time"))
                .or_else(|| self.contextly().pub_date())
                .or_else(|| html.meta_name("issued").and_then(|d| parse_opengraph_time(&d)))
        })
    }

    /// Modified time: the PDF ModDate; `og:modified_time`,
    /// `article:modified_time`, the embedded-JSON mod date, then the
    /// legacy `modified` meta tag.
    pub fn modified_time(&self) -> Option<DateTime<Utc>> {
        *self.modified_time.get_or_init(|| {
            if self.document.is_pdf() {
                return self
                    .document
                    .pdf_info()
                    .and_then(|info| info.get_text("ModDate"))
                    .and_then(|d| parse_pdf_time(&d));
            }
            let html = self.document.html()?;
            self.meta_time(html, "og:modified_time")
                .or_else(|| self.meta_time(html, "article:modified_time"))
                .or_else(|| self.contextly().mod_date())
                .or_else(|| {
                    html.meta_name("modified")
                        .and_then(|d| parse_opengraph_time(&d))
                })
        })
    }

    /// Expiration time: `og:expiration_time` then `article:expiration_time`.
    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        *self.expiration_time.get_or_init(|| {
            let html = self.document.html()?;
            self.meta_time(html, "og:expiration_time")
                .or_else(|| self.meta_time(html, "article:expiration_time"))
        })
    }

    fn meta_time(
        &self,
        html: &crate::document::HtmlView,
        property: &str,
    ) -> Option<DateTime<Utc>> {
        html.meta_property(property)
            .and_then(|d| parse_opengraph_time(&d))
    }

    /// Structured `og:image` group: the primary tag plus its trailing
    /// descriptor tags, up to the next `og:image`.
    pub fn struct_image(&self) -> Option<&StructMedia> {
        self.struct_image
            .get_or_init(|| self.compute_struct_media("og:image"))
            .as_ref()
    }

    /// Structured `og:video` group.
    pub fn struct_video(&self) -> Option<&StructMedia> {
        self.struct_video
            .get_or_init(|| self.compute_struct_media("og:video"))
            .as_ref()
    }

    /// Structured `og:audio` group.
    pub fn struct_audio(&self) -> Option<&StructMedia> {
        self.struct_audio
            .get_or_init(|| self.compute_struct_media("og:audio"))
            .as_ref()
    }

    /// Scan forward from the first `primary` tag through the ordered
    /// `meta[property]` list, accumulating descriptor suffixes until the
    /// next tag of the same property terminates the group.
    fn compute_struct_media(&self, primary: &str) -> Option<StructMedia> {
        let html = self.document.html()?;
        let pairs = html.meta_property_pairs();
        let start = pairs.iter().position(|(p, _)| p == primary)?;
        let mut media = StructMedia {
            url: pairs[start].1.clone(),
            ..Default::default()
        };
        for (property, content) in &pairs[start + 1..] {
            if property == primary {
                break;
            }
            let Some(suffix) = property
                .strip_prefix(primary)
                .and_then(|rest| rest.strip_prefix(':'))
            else {
                continue;
            };
            match suffix {
                "width" => media.width = Some(content.clone()),
                "height" => media.height = Some(content.clone()),
                "type" => media.media_type = Some(content.clone()),
                "secure_url" => media.secure_url = Some(content.clone()),
                _ => {}
            }
        }
        Some(media)
    }

    /// Collect a fixed set of namespaced meta keys into a JSON object;
    /// nothing populated resolves to None rather than an empty mapping.
    fn namespaced_object(
        &self,
        prefix: &str,
        scalar_keys: &[&str],
        array_keys: &[&str],
    ) -> Option<Value> {
        let html = self.document.html()?;
        let mut map = serde_json::Map::new();
        for key in scalar_keys {
            if let Some(content) = html.meta_property(&format!("{}:{}", prefix, key)) {
                map.insert(key.replace(':', "_"), Value::String(content));
            }
        }
        for key in array_keys {
            let values = html.meta_property_all(&format!("{}:{}", prefix, key));
            if !values.is_empty() {
                map.insert(
                    key.replace(':', "_"),
                    Value::Array(values.into_iter().map(Value::String).collect()),
                );
            }
        }
        if map.is_empty() {
            None
        } else {
            Some(Value::Object(map))
        }
    }

    pub fn obj_music_song(&self) -> Option<&Value> {
        self.obj_music_song
            .get_or_init(|| {
                self.namespaced_object(
                    "music",
                    &["duration", "album", "album:disc", "album:track"],
                    &["musician"],
                )
            })
            .as_ref()
    }

    pub fn obj_music_album(&self) -> Option<&Value> {
        self.obj_music_album
            .get_or_init(|| {
                self.namespaced_object(
                    "music",
                    &["song", "song:disc", "song:track", "release_date"],
                    &["musician"],
                )
            })
            .as_ref()
    }

    pub fn obj_music_playlist(&self) -> Option<&Value> {
        self.obj_music_playlist
            .get_or_init(|| {
                self.namespaced_object("music", &["song", "song:disc", "song:track", "creator"], &[])
            })
            .as_ref()
    }

    pub fn obj_music_radio_station(&self) -> Option<&Value> {
        self.obj_music_radio_station
            .get_or_init(|| self.namespaced_object("music", &["creator"], &[]))
            .as_ref()
    }

    pub fn obj_video_movie(&self) -> Option<&Value> {
        self.obj_video_movie
            .get_or_init(|| {
                self.namespaced_object(
                    "video",
                    &["duration", "release_date"],
                    &["actor", "director", "writer", "tag"],
                )
            })
            .as_ref()
    }

    pub fn obj_article(&self) -> Option<&Value> {
        self.obj_article
            .get_or_init(|| {
                self.namespaced_object(
                    "article",
                    &["published_time", "modified_time", "expiration_time", "section"],
                    &["author", "tag"],
                )
            })
            .as_ref()
    }

    pub fn obj_book(&self) -> Option<&Value> {
        self.obj_book
            .get_or_init(|| {
                self.namespaced_object("book", &["isbn", "release_date"], &["author", "tag"])
            })
            .as_ref()
    }

    pub fn obj_profile(&self) -> Option<&Value> {
        self.obj_profile
            .get_or_init(|| {
                self.namespaced_object(
                    "profile",
                    &["first_name", "last_name", "username", "gender"],
                    &[],
                )
            })
            .as_ref()
    }

    /// Resolve every field and return a serializable record.
    pub async fn snapshot(&self) -> Snapshot {
        Snapshot {
            title: self.title().map(str::to_string),
            object_type: self.object_type().to_string(),
            subtype: self.subtype().to_string(),
            url: self.url().map(str::to_string),
            base_url: self.base_url.clone(),
            image: self.image().await.map(str::to_string),
            images: self.images().to_vec(),
            description: self.description().map(str::to_string),
            author: self.author().map(str::to_string),
            site_name: self.site_name().map(str::to_string),
            generator: self.generator().map(str::to_string),
            locale: self.locale().map(str::to_string),
            locale_alternative: self.locale_alternative().to_vec(),
            determiner: self.determiner().to_string(),
            audio: self.audio().map(str::to_string),
            video: self.video().map(str::to_string),
            tags: self.tags().to_vec(),
            section: self.section().map(str::to_string),
            created_time: self.created_time(),
            published_time: self.published_time(),
            modified_time: self.modified_time(),
            expiration_time: self.expiration_time(),
            struct_image: self.struct_image().cloned(),
            struct_video: self.struct_video().cloned(),
            struct_audio: self.struct_audio().cloned(),
            obj_music_song: self.obj_music_song().cloned(),
            obj_music_album: self.obj_music_album().cloned(),
            obj_music_playlist: self.obj_music_playlist().cloned(),
            obj_music_radio_station: self.obj_music_radio_station().cloned(),
            obj_video_movie: self.obj_video_movie().cloned(),
            obj_article: self.obj_article().cloned(),
            obj_book: self.obj_book().cloned(),
            obj_profile: self.obj_profile().cloned(),
        }
    }
}

/// A one-shot serializable record of every resolved field.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub object_type: String,
    pub subtype: String,
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub site_name: Option<String>,
    pub generator: Option<String>,
    pub locale: Option<String>,
    pub locale_alternative: Vec<String>,
    pub determiner: String,
    pub audio: Option<String>,
    pub video: Option<String>,
    pub tags: Vec<String>,
    pub section: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
    pub published_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub struct_image: Option<StructMedia>,
    pub struct_video: Option<StructMedia>,
    pub struct_audio: Option<StructMedia>,
    pub obj_music_song: Option<Value>,
    pub obj_music_album: Option<Value>,
    pub obj_music_playlist: Option<Value>,
    pub obj_music_radio_station: Option<Value>,
    pub obj_video_movie: Option<Value>,
    pub obj_article: Option<Value>,
    pub obj_book: Option<Value>,
    pub obj_profile: Option<Value>,
}
