// * Resource Identifier Extraction
// * Derives the stable article identifier from a provider article URL.
// *
// * Público article paths end in a slug carrying the numeric id:
// *   https://www.publico.pt/2024/01/15/politica/noticia/some-slug-2076543
// * A bare numeric final segment (/noticia/123) is accepted as well.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

use crate::config::constants::PROVIDER_DOMAIN;

// * Trailing digits of the final path segment, either the whole segment or after the last hyphen
static ARTICLE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|-)(\d+)$").expect("Invalid article id regex"));

/// Message shown to the user whenever extraction fails
pub const IDENTIFIER_ERROR_MESSAGE: &str = "Could not extract article ID from URL";

/// Why an identifier could not be derived. Never retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Empty article URL")]
    Empty,

    #[error("Invalid article URL `{0}`")]
    InvalidUrl(String),

    #[error("URL host `{0}` is not a provider host")]
    ForeignHost(String),

    #[error("URL `{0}` has no article path")]
    MissingPath(String),

    #[error("Path segment `{0}` carries no article id")]
    NoIdentifier(String),
}

impl IdentifierError {
    /// The fixed user-facing message, independent of the failure detail
    pub fn user_message(&self) -> &'static str {
        IDENTIFIER_ERROR_MESSAGE
    }
}

/// A non-empty numeric article identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts the article id from a Público URL
pub fn extract_article_id(raw: &str) -> Result<ArticleId, IdentifierError> {
    extract_article_id_for(raw, PROVIDER_DOMAIN)
}

/// Extracts the article id from a URL whose host must belong to `domain`
pub fn extract_article_id_for(raw: &str, domain: &str) -> Result<ArticleId, IdentifierError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(IdentifierError::Empty);
    }

    let url = Url::parse(raw).map_err(|_| IdentifierError::InvalidUrl(raw.to_string()))?;

    let host = url.host_str().unwrap_or_default().to_lowercase();
    if !is_provider_host(&host, domain) {
        return Err(IdentifierError::ForeignHost(host));
    }

    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| IdentifierError::MissingPath(raw.to_string()))?;

    ARTICLE_ID_PATTERN
        .captures(segment)
        .and_then(|c| c.get(1))
        .map(|m| ArticleId(m.as_str().to_string()))
        .ok_or_else(|| IdentifierError::NoIdentifier(segment.to_string()))
}

fn is_provider_host(host: &str, domain: &str) -> bool {
    let domain = domain.to_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_with_trailing_id() {
        let id = extract_article_id(
            "https://www.publico.pt/2024/01/15/politica/noticia/governo-aprova-medidas-2076543",
        )
        .unwrap();
        assert_eq!(id.as_str(), "2076543");
    }

    #[test]
    fn test_bare_numeric_segment() {
        let id = extract_article_id("https://www.publico.pt/noticia/123").unwrap();
        assert_eq!(id.as_str(), "123");
    }

    #[test]
    fn test_trailing_slash_and_query() {
        let link = "https://www.publico.pt/2024/01/15/mundo/noticia/slug-42/?ref=home#top";
        let id = extract_article_id(link).unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_subdomain_accepted() {
        let id = extract_article_id("https://p3.publico.pt/actualidade/ambiente/slug-99").unwrap();
        assert_eq!(id.as_str(), "99");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_article_id("   "), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(matches!(
            extract_article_id("/noticia/123"),
            Err(IdentifierError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_foreign_host_rejected() {
        assert!(matches!(
            extract_article_id("https://example.com/noticia/123"),
            Err(IdentifierError::ForeignHost(_))
        ));
        // * Suffix match must be on a label boundary
        assert!(matches!(
            extract_article_id("https://notpublico.pt/noticia/123"),
            Err(IdentifierError::ForeignHost(_))
        ));
    }

    #[test]
    fn test_homepage_has_no_id() {
        assert!(matches!(
            extract_article_id("https://www.publico.pt/"),
            Err(IdentifierError::MissingPath(_))
        ));
    }

    #[test]
    fn test_slug_without_digits() {
        let err =
            extract_article_id("https://www.publico.pt/politica/noticia/sem-numero").unwrap_err();
        assert_eq!(err, IdentifierError::NoIdentifier("sem-numero".to_string()));
        assert_eq!(err.user_message(), "Could not extract article ID from URL");
    }

    #[test]
    fn test_digits_glued_to_letters_rejected() {
        assert!(extract_article_id("https://www.publico.pt/noticia/abc123").is_err());
    }
}
