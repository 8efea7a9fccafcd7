// ABOUTME: Biggest-image selection over a set of candidate image URLs.
// ABOUTME: Fetches each candidate, decodes dimensions, and keeps the tallest above a minimum size.

use std::collections::HashSet;
use std::io::Cursor;

use crate::resource::{fetch, FetchOptions};

/// Images narrower or shorter than this are skipped (tracking pixels, icons).
pub const MIN_DIMENSION: u32 = 80;

/// Pick the URL of the biggest image among the candidates.
///
/// Each candidate is fetched (size-capped) and its dimensions decoded;
/// fetch or decode failures skip that candidate without aborting the rest.
/// Candidates below [`MIN_DIMENSION`] in either axis are discarded. The
/// tallest surviving image wins; ties keep the first-seen candidate. If
/// nothing survives, returns None.
pub async fn pick_biggest(
    client: &reqwest::Client,
    urls: &[String],
    max_size: usize,
) -> Option<String> {
    let opts = FetchOptions {
        max_size,
        ..Default::default()
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut biggest: Option<(&str, u32)> = None;
    for url in urls {
        if !seen.insert(url.as_str()) {
            continue;
        }
        let Some((width, height)) = probe_dimensions(client, url, &opts).await else {
            continue;
        };
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            continue;
        }
        if biggest.map_or(true, |(_, best)| height > best) {
            biggest = Some((url, height));
        }
    }

    biggest.map(|(url, _)| url.to_string())
}

/// Fetch one candidate and decode its pixel dimensions, best-effort.
async fn probe_dimensions(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Option<(u32, u32)> {
    let result = fetch(client, url, opts).await.ok()?;
    image::ImageReader::new(Cursor::new(result.body.as_ref()))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn picks_tallest_above_threshold() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/small.png");
            then.status(200).body(png_bytes(100, 40));
        });
        server.mock(|when, then| {
            when.method(GET).path("/medium.png");
            then.status(200).body(png_bytes(100, 90));
        });
        server.mock(|when, then| {
            when.method(GET).path("/large.png");
            then.status(200).body(png_bytes(100, 150));
        });

        let urls = vec![
            server.url("/small.png"),
            server.url("/medium.png"),
            server.url("/large.png"),
        ];
        let result = pick_biggest(&test_client(), &urls, 10_000_000).await;
        assert_eq!(result, Some(server.url("/large.png")));
    }

    #[tokio::test]
    async fn all_below_threshold_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/tiny1.png");
            then.status(200).body(png_bytes(40, 40));
        });
        server.mock(|when, then| {
            when.method(GET).path("/tiny2.png");
            then.status(200).body(png_bytes(79, 79));
        });

        let urls = vec![server.url("/tiny1.png"), server.url("/tiny2.png")];
        let result = pick_biggest(&test_client(), &urls, 10_000_000).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn failed_candidates_are_skipped() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.png");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/not-an-image");
            then.status(200).body("<html>nope</html>");
        });
        server.mock(|when, then| {
            when.method(GET).path("/good.png");
            then.status(200).body(png_bytes(200, 120));
        });

        let urls = vec![
            server.url("/missing.png"),
            server.url("/not-an-image"),
            server.url("/good.png"),
        ];
        let result = pick_biggest(&test_client(), &urls, 10_000_000).await;
        assert_eq!(result, Some(server.url("/good.png")));
    }

    #[tokio::test]
    async fn ties_keep_first_seen() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET).path("/a.png");
            then.status(200).body(png_bytes(100, 100));
        });
        server.mock(|when, then| {
            when.method(GET).path("/b.png");
            then.status(200).body(png_bytes(100, 100));
        });

        let urls = vec![server.url("/a.png"), server.url("/b.png")];
        let result = pick_biggest(&test_client(), &urls, 10_000_000).await;
        first.assert();
        assert_eq!(result, Some(server.url("/a.png")));
    }

    #[tokio::test]
    async fn duplicates_fetched_once() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/dup.png");
            then.status(200).body(png_bytes(100, 100));
        });

        let urls = vec![server.url("/dup.png"), server.url("/dup.png")];
        let result = pick_biggest(&test_client(), &urls, 10_000_000).await;
        mock.assert_hits(1);
        assert_eq!(result, Some(server.url("/dup.png")));
    }

    #[tokio::test]
    async fn empty_candidates_is_none() {
        let result = pick_biggest(&test_client(), &[], 10_000_000).await;
        assert_eq!(result, None);
    }
}
