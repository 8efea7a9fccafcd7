// ABOUTME: Web rich object extraction library: fetch a URL and resolve its social metadata.
// ABOUTME: Re-exports the public API surface: Client, Options, RichObject, Snapshot, errors.

//! Fetch a web resource and resolve a rich metadata object for it.
//!
//! Every field (title, type, image, author, timestamps, ...) is resolved
//! through an ordered fallback chain over Open Graph tags, plain HTML,
//! PDF metadata, HTTP headers, and the URL itself. Missing signals never
//! error; each field falls back to its defined default.
//!
//! ```no_run
//! use web_rich_object::Client;
//!
//! # async fn run() -> Result<(), web_rich_object::ExtractError> {
//! let client = Client::builder().build();
//! let obj = client.fetch("https://example.com/article").await?;
//! println!("{:?} ({})", obj.title(), obj.object_type());
//! println!("{:?}", obj.image().await);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod contextly;
pub mod document;
pub mod error;
pub mod imagerank;
pub mod object;
pub mod options;
pub mod resource;
pub mod timeparse;
pub mod urlutil;

pub use client::Client;
pub use document::{DocumentModel, HtmlView, MediaType, PdfInfo};
pub use error::{ErrorCode, ExtractError};
pub use object::{RichObject, Snapshot, StructMedia};
pub use options::{ClientBuilder, Options, DEFAULT_DOWNLOAD_MAX_SIZE, DEFAULT_USER_AGENT};
pub use resource::{FetchOptions, FetchResult};
