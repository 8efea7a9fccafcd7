// ABOUTME: The extraction client: owns the HTTP client and options, produces RichObjects.
// ABOUTME: fetch() retrieves and classifies a URL; from_html() wraps caller-supplied markup.

use std::collections::HashMap;

use url::Url;

use crate::document::DocumentModel;
use crate::error::ExtractError;
use crate::object::RichObject;
use crate::options::{ClientBuilder, Options};
use crate::resource::{self, FetchOptions};

/// The extraction client.
///
/// Holds the configured options and a reusable HTTP client. One `Client`
/// can produce any number of [`RichObject`]s.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    /// Fetch a URL and build its rich object.
    ///
    /// The body is downloaded up to the configured size cap, classified by
    /// Content-Type (with extension and content sniffing fallbacks), and
    /// wrapped in a [`RichObject`] whose fields resolve lazily.
    pub async fn fetch(&self, url: &str) -> Result<RichObject, ExtractError> {
        if url.trim().is_empty() {
            return Err(ExtractError::config(
                "Extract",
                Some(anyhow::anyhow!("you must supply a URL")),
            ));
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            max_size: self.opts.max_download_size,
        };
        let result = resource::fetch(&self.http_client, url, &fetch_opts).await?;
        let document = DocumentModel::new(&result.body, result.content_type.as_deref(), Some(url));

        Ok(RichObject::new(
            document,
            Some(url.to_string()),
            result.headers,
            self.http_client.clone(),
            self.opts.max_download_size,
        ))
    }

    /// Build a rich object from markup the caller already has.
    ///
    /// The document is always treated as HTML. `url`, when supplied, gives
    /// the identity used for relative-reference resolution and hostname
    /// fallbacks and must be a valid absolute URL; without it those signals
    /// resolve as absent.
    pub fn from_html(
        &self,
        html: impl AsRef<[u8]>,
        url: Option<&str>,
    ) -> Result<RichObject, ExtractError> {
        let html = html.as_ref();
        if html.is_empty() {
            return Err(ExtractError::config(
                "Extract",
                Some(anyhow::anyhow!("you must supply HTML content")),
            ));
        }
        if let Some(url) = url {
            if url.trim().is_empty() {
                return Err(ExtractError::config(
                    "Extract",
                    Some(anyhow::anyhow!("the URL for the content must not be empty")),
                ));
            }
            Url::parse(url)
                .map_err(|e| ExtractError::invalid_url(url, "Extract", Some(e.into())))?;
        }

        let document = DocumentModel::from_html(html);
        Ok(RichObject::new(
            document,
            url.map(str::to_string),
            HashMap::new(),
            self.http_client.clone(),
            self.opts.max_download_size,
        ))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
