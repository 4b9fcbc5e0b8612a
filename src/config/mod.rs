// * Feed Configuration
// * Gathers the provider constants into a single structure owned by the view model builder.
// * Every field can be overridden from a TOML file; missing keys keep their defaults.

pub mod constants;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

use constants::*;

/// Errors raised while loading or validating a [`FeedConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration for the normalization pipeline and the API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Domain used to recognise provider URLs
    pub provider_domain: String,
    /// Fallback URL when an article has no usable link
    pub homepage_url: String,
    /// List endpoint
    pub top_news_endpoint: String,
    /// Detail endpoint template containing `{id}`
    pub article_detail_endpoint: String,
    /// HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Label for unresolvable fields
    pub not_available: String,
    /// Title used when the record and the caller have none
    pub untitled: String,
    /// Date prefix the provider uses for "no date"
    pub zero_date_sentinel: String,
    /// Tag cap per article
    pub max_tags: usize,
    /// Separator between author names
    pub author_separator: String,
    /// Letter used when the title is missing
    pub placeholder_letter: String,
    /// Tint of the letter icon
    pub accent_color: String,
    /// Cyclic tag colours
    pub tag_palette: Vec<String>,
    /// Shown in place of a missing article body
    pub read_on_web_notice: String,
    /// Second line of the missing-body notice
    pub web_only_notice: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            provider_domain: PROVIDER_DOMAIN.to_string(),
            homepage_url: HOMEPAGE_URL.to_string(),
            top_news_endpoint: TOP_NEWS_ENDPOINT.to_string(),
            article_detail_endpoint: ARTICLE_DETAIL_ENDPOINT.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            not_available: NOT_AVAILABLE.to_string(),
            untitled: UNTITLED.to_string(),
            zero_date_sentinel: ZERO_DATE_SENTINEL.to_string(),
            max_tags: MAX_TAGS,
            author_separator: AUTHOR_SEPARATOR.to_string(),
            placeholder_letter: PLACEHOLDER_LETTER.to_string(),
            accent_color: ACCENT_COLOR.to_string(),
            tag_palette: TAG_PALETTE.iter().map(|c| c.to_string()).collect(),
            read_on_web_notice: READ_ON_WEB_NOTICE.to_string(),
            web_only_notice: WEB_ONLY_NOTICE.to_string(),
        }
    }
}

impl FeedConfig {
    /// Parses overrides from a TOML document and validates the result
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: FeedConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads overrides from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Loading feed config");
        Self::from_toml_str(&source)
    }

    /// Rejects values that would break the pipeline's output guarantees
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tags == 0 {
            return Err(ConfigError::Invalid {
                field: "max_tags",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.tag_palette.is_empty() {
            return Err(ConfigError::Invalid {
                field: "tag_palette",
                reason: "must contain at least one colour".to_string(),
            });
        }

        if Url::parse(&self.homepage_url).is_err() {
            return Err(ConfigError::Invalid {
                field: "homepage_url",
                reason: format!("`{}` is not an absolute URL", self.homepage_url),
            });
        }

        if self.not_available.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "not_available",
                reason: "must not be blank".to_string(),
            });
        }

        if self.placeholder_letter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "placeholder_letter",
                reason: "must not be blank".to_string(),
            });
        }

        Ok(())
    }

    /// Colour for the tag at `index`, cycling through the palette
    pub fn tag_color(&self, index: usize) -> &str {
        match self.tag_palette.len() {
            0 => ACCENT_COLOR,
            len => self.tag_palette[index % len].as_str(),
        }
    }

    /// Detail endpoint with the identifier substituted
    pub fn article_detail_url(&self, id: &str) -> String {
        self.article_detail_endpoint.replace("{id}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = FeedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_tags, 6);
        assert_eq!(config.tag_palette.len(), 8);
    }

    #[test]
    fn test_tag_color_cycles() {
        let config = FeedConfig::default();
        assert_eq!(config.tag_color(0), "#B22222");
        assert_eq!(config.tag_color(7), "#2F4F4F");
        assert_eq!(config.tag_color(8), "#B22222");
        assert_eq!(config.tag_color(13), "#800080");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FeedConfig::from_toml_str("max_tags = 3\nnot_available = \"N/D\"").unwrap();
        assert_eq!(config.max_tags, 3);
        assert_eq!(config.not_available, "N/D");
        assert_eq!(config.homepage_url, "https://www.publico.pt");
    }

    #[test]
    fn test_rejects_zero_tag_cap() {
        let err = FeedConfig::from_toml_str("max_tags = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_tags", .. }));
    }

    #[test]
    fn test_rejects_relative_homepage() {
        let err = FeedConfig::from_toml_str("homepage_url = \"publico.pt\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "homepage_url", .. }));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = FeedConfig::from_toml_str("tag_palette = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tag_palette", .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = FeedConfig::from_toml_str("max_tags = \"six\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "accent_color = \"#000000\"").unwrap();

        let config = FeedConfig::load(file.path()).unwrap();
        assert_eq!(config.accent_color, "#000000");
    }

    #[test]
    fn test_load_missing_file() {
        let err = FeedConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_detail_url_template() {
        let config = FeedConfig::default();
        assert_eq!(
            config.article_detail_url("2076543"),
            "https://www.publico.pt/api/content/news/2076543"
        );
    }
}
