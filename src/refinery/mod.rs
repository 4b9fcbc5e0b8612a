// * The Refinery: Article Normalization Pipeline
// * Turns untrusted provider records into presentation-ready articles.
// * Field decoding, URL repair and text sanitization run independently and
// * are composed here into one `NormalizedArticle` per record.

pub mod dates;
pub mod fields;
pub mod markdown;
pub mod sanitizer;

// * Re-exports for convenient access
pub use fields::{
    published_label, resolve_icon, ArticleIcon, AuthorEntry, AuthorsField, MediaField, RawArticle,
    TagEntry, TagsField, TimestampField,
};
pub use markdown::{
    detail_markdown, error_markdown, loading_markdown, metadata_rows, preview_markdown, tag_chips,
    DetailParts, MetadataRow, TagChip,
};
pub use sanitizer::{clean_description, strip_tags};

use serde::{Deserialize, Serialize};

use crate::config::FeedConfig;
use crate::engine::identifier::{extract_article_id_for, ArticleId};
use crate::engine::normalization::UrlCanonicalizer;

/// Fully-resolved article, built fresh per render pass
///
/// Every display field is always populated; absence and malformation in the
/// source record are resolved to fallbacks before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedArticle {
    /// Identifier derived from the canonical URL, if it has an article path
    pub id: Option<ArticleId>,
    /// Markup-free title, also the list-row label
    pub title: String,
    pub author_label: String,
    pub published_label: String,
    /// At most `max_tags` entries, source order
    pub tags: Vec<String>,
    pub icon: ArticleIcon,
    /// Absolute URL for the open and copy actions
    pub url: String,
    /// Detail view markdown
    pub body_markdown: String,
    /// List-row detail panel markdown
    pub preview_markdown: String,
    /// Author, Published and keyword rows
    pub metadata: Vec<MetadataRow>,
}

impl NormalizedArticle {
    /// Converts the article to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Converts the article to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Tag list with per-index colours
    pub fn tag_chips(&self, config: &FeedConfig) -> Vec<TagChip> {
        tag_chips(&self.tags, config)
    }
}

/// Caller-side knowledge used when the record itself is incomplete
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleContext<'a> {
    /// Title shown in the list before the detail was fetched
    pub title: Option<&'a str>,
    /// URL used when the record carries no link of its own
    pub url: Option<&'a str>,
    /// URL the detail was opened from; wins over the record's own links
    pub origin_url: Option<&'a str>,
}

/// Composes the field normalizer, URL canonicalizer and text sanitizer
///
/// # Example
/// ```ignore
/// use publico_feed::refinery::{RawArticle, ViewModelBuilder};
///
/// let builder = ViewModelBuilder::new();
/// let article = builder.build(&RawArticle::from_value(json));
///
/// println!("{}", article.title);
/// println!("{}", article.body_markdown);
/// ```
#[derive(Debug, Clone)]
pub struct ViewModelBuilder {
    config: FeedConfig,
    urls: UrlCanonicalizer,
}

impl ViewModelBuilder {
    /// Creates a builder with default configuration
    pub fn new() -> Self {
        Self::with_config(FeedConfig::default())
    }

    /// Creates a builder with custom configuration
    pub fn with_config(config: FeedConfig) -> Self {
        Self {
            urls: UrlCanonicalizer::new(&config),
            config,
        }
    }

    /// Normalizes a record with no caller context
    pub fn build(&self, raw: &RawArticle) -> NormalizedArticle {
        self.build_with(raw, ArticleContext::default())
    }

    /// Normalizes a record, filling title and URL gaps from `context`
    pub fn build_with(&self, raw: &RawArticle, context: ArticleContext<'_>) -> NormalizedArticle {
        let config = &self.config;

        let title = raw
            .title
            .as_deref()
            .map(strip_tags)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| context.title.map(str::trim).filter(|t| !t.is_empty()).map(String::from))
            .unwrap_or_else(|| config.untitled.clone());

        let author_label = raw.authors.label(config);
        let published = published_label(raw, config);
        let tags = raw.tags.resolve(config.max_tags);
        let icon = resolve_icon(raw, config);

        // * Id, action URL and the read-on-the-web link all derive from this one value
        let record = (raw.full_url.as_deref(), raw.url.as_deref());
        let url = match (context.origin_url, record, context.url) {
            (Some(origin), ..) => self.urls.canonicalize(Some(origin), None),
            (None, (None, None), Some(fallback)) => self.urls.canonicalize(Some(fallback), None),
            (None, (full, url), _) => self.urls.canonicalize(full, url),
        };

        let id = match extract_article_id_for(&url, &config.provider_domain) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::debug!(url = %url, reason = %e, "Article has no identifier");
                None
            }
        };

        let body_markdown = detail_markdown(
            DetailParts {
                title: &title,
                authors: &author_label,
                published: &published,
                lead: raw.lead.as_deref(),
                body: raw.body.as_deref(),
                url: &url,
            },
            config,
        );

        let description = raw.description.as_deref().map(strip_tags);
        let preview_markdown = preview_markdown(&title, &clean_description(description.as_deref()));

        let metadata = metadata_rows(&author_label, &published, &tags, config);

        NormalizedArticle {
            id,
            title,
            author_label,
            published_label: published,
            tags,
            icon,
            url,
            body_markdown,
            preview_markdown,
            metadata,
        }
    }

    /// Normalizes every record of a list response, preserving order
    pub fn build_all(&self, raws: &[RawArticle]) -> Vec<NormalizedArticle> {
        raws.iter().map(|raw| self.build(raw)).collect()
    }

    /// Returns the current configuration
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn canonicalizer(&self) -> &UrlCanonicalizer {
        &self.urls
    }
}

impl Default for ViewModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to normalize one record with default settings
pub fn normalize_article(raw: &RawArticle) -> NormalizedArticle {
    ViewModelBuilder::new().build(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_article() -> RawArticle {
        RawArticle::from_value(json!({
            "titulo": "<b>Governo</b> aprova orçamento",
            "lead": "Votação final decorreu esta tarde.",
            "body": "<p>O parlamento aprovou.</p>",
            "descricao": "há 3 horas ... O parlamento aprovou o orçamento.",
            "data": "2024-01-15T10:30:00",
            "autores": [{"nome": "Ana Silva"}, "José Costa"],
            "tags": ["Política", {"nome": "Orçamento"}],
            "multimediaPrincipal": {"src": "https://imagens.publico.pt/a.jpg"},
            "url": "https://www.publico.pthttps//www.publico.pt/2024/01/15/politica/noticia/governo-aprova-2076543"
        }))
    }

    #[test]
    fn test_full_pipeline() {
        let article = ViewModelBuilder::new().build(&sample_article());

        assert_eq!(article.title, "Governo aprova orçamento");
        assert_eq!(article.author_label, "Ana Silva, José Costa");
        assert_eq!(article.published_label, "15 de janeiro de 2024, 10:30");
        assert_eq!(article.tags, vec!["Política", "Orçamento"]);
        assert_eq!(
            article.icon,
            ArticleIcon::Image { source: "https://imagens.publico.pt/a.jpg".into() }
        );
        assert_eq!(
            article.url,
            "https://www.publico.pt/2024/01/15/politica/noticia/governo-aprova-2076543"
        );
        assert_eq!(article.id.as_ref().map(ArticleId::as_str), Some("2076543"));
        assert!(article.body_markdown.contains("**Votação final decorreu esta tarde.**"));
        assert!(article.body_markdown.contains("O parlamento aprovou."));
        assert_eq!(
            article.preview_markdown,
            "# Governo aprova orçamento\n\n---\n\nO parlamento aprovou o orçamento.\n"
        );
    }

    #[test]
    fn test_empty_record_uses_fallbacks() {
        let article = normalize_article(&RawArticle::default());

        assert_eq!(article.title, "Untitled");
        assert_eq!(article.author_label, "Not available");
        assert_eq!(article.published_label, "Not available");
        assert!(article.tags.is_empty());
        assert_eq!(
            article.icon,
            ArticleIcon::Letter { text: "P".into(), tint_color: "#1E90FF".into() }
        );
        assert_eq!(article.url, "https://www.publico.pt");
        assert!(article.id.is_none());
        assert!(article.body_markdown.contains("[Abrir no Navegador](https://www.publico.pt)"));
    }

    #[test]
    fn test_context_fills_gaps() {
        let context = ArticleContext {
            title: Some("Título da lista"),
            url: Some("https://www.publico.pt/mundo/noticia/slug-77"),
            origin_url: None,
        };
        let article = ViewModelBuilder::new().build_with(&RawArticle::default(), context);

        assert_eq!(article.title, "Título da lista");
        assert_eq!(article.url, "https://www.publico.pt/mundo/noticia/slug-77");
        assert_eq!(article.id.map(|id| id.to_string()), Some("77".to_string()));
        assert!(article.body_markdown.starts_with("# Título da lista\n"));
    }

    #[test]
    fn test_record_title_wins_over_context() {
        let raw = RawArticle::from_value(json!({"titulo": "Do registo"}));
        let context = ArticleContext {
            title: Some("Da lista"),
            ..ArticleContext::default()
        };
        assert_eq!(ViewModelBuilder::new().build_with(&raw, context).title, "Do registo");
    }

    #[test]
    fn test_origin_url_wins_over_record_links() {
        let raw = RawArticle::from_value(json!({
            "titulo": "Outro",
            "url": "https://www.publico.pthttps//noticia/123"
        }));
        let context = ArticleContext {
            origin_url: Some("https://www.publico.pt/mundo/noticia/slug-77"),
            ..ArticleContext::default()
        };
        let article = ViewModelBuilder::new().build_with(&raw, context);

        assert_eq!(article.url, "https://www.publico.pt/mundo/noticia/slug-77");
        assert_eq!(article.id.map(|id| id.to_string()), Some("77".to_string()));
        assert!(article.body_markdown.contains(&article.url));
    }

    #[test]
    fn test_custom_tag_cap() {
        let config = FeedConfig { max_tags: 2, ..FeedConfig::default() };
        let raw = RawArticle::from_value(json!({"tags": ["a", "b", "c"]}));
        let article = ViewModelBuilder::with_config(config).build(&raw);
        assert_eq!(article.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_build_all_preserves_order() {
        let raws = vec![
            RawArticle::from_value(json!({"titulo": "Um"})),
            RawArticle::from_value(json!({"titulo": "Dois"})),
        ];
        let titles: Vec<String> = ViewModelBuilder::new()
            .build_all(&raws)
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Um", "Dois"]);
    }

    #[test]
    fn test_serialization() {
        let json = normalize_article(&sample_article()).to_json();
        assert!(json.contains("\"author_label\":\"Ana Silva, José Costa\""));
        assert!(json.contains("\"kind\":\"image\""));
    }
}
