// ABOUTME: URL resolution for relative and protocol-relative references.
// ABOUTME: Joins candidates against a base URL honoring root-relative vs path-relative semantics.

use url::Url;

/// Resolve a possibly-relative URL reference against a base URL.
///
/// - Candidates that already carry an `http`/`https` scheme pass through
///   unchanged.
/// - Root-relative (`/path`) and protocol-relative (`//host/path`)
///   candidates join against `scheme://host` of the base, ignoring the
///   base's own path.
/// - Anything else joins against the full base with standard URL-join
///   semantics (`.`/`..` resolution, last-segment replacement).
///
/// A malformed base URL is a hard error; the candidate is never returned
/// unresolved.
pub fn resolve(base_url: &str, candidate: &str) -> Result<String, url::ParseError> {
    if candidate.starts_with("http") {
        return Ok(candidate.to_string());
    }

    let base = Url::parse(base_url)?;
    if candidate.starts_with('/') {
        // Joining "//host/..." against the root keeps protocol-relative
        // semantics intact as well.
        let root = format!(
            "{}://{}",
            base.scheme(),
            base.host_str().ok_or(url::ParseError::EmptyHost)?
        );
        let root = Url::parse(&root)?;
        Ok(root.join(candidate)?.to_string())
    } else {
        Ok(base.join(candidate)?.to_string())
    }
}
