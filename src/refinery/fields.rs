// * Field Normalization
// * Decodes the provider's heterogeneous JSON fields into canonical forms.
// * Each polymorphic field is an untagged enum with a catch-all arm, so a record
// * never fails to decode because one field has an unexpected shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::dates;
use super::sanitizer::strip_tags;
use crate::config::FeedConfig;

// * Stringified placeholders that must never surface as tags
const JUNK_TAG_TOKENS: [&str; 3] = ["undefined", "null", "[object Object]"];

// * Property names probed on author objects, in priority order
const AUTHOR_NAME_KEYS: [&str; 2] = ["nome", "name"];

// * Property names probed on tag objects, in priority order
const TAG_TEXT_KEYS: [&str; 5] = ["nome", "name", "value", "titulo", "title"];

// * Nested property holding an image URL
const MEDIA_SOURCE_KEY: &str = "src";

/// Article record as delivered by the list and detail endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawArticle {
    #[serde(rename = "titulo", deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub lead: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub body: Option<String>,
    #[serde(rename = "descricao", deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "data", deserialize_with = "lenient_text")]
    pub date: Option<String>,
    pub time: TimestampField,
    #[serde(rename = "autores")]
    pub authors: AuthorsField,
    pub tags: TagsField,
    #[serde(rename = "multimediaPrincipal")]
    pub main_media: MediaField,
    #[serde(rename = "imagem")]
    pub image: MediaField,
    #[serde(deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(rename = "fullUrl", deserialize_with = "lenient_text")]
    pub full_url: Option<String>,
}

impl RawArticle {
    /// Decodes a record; non-object input yields an empty record
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable article record");
                Self::default()
            }
        }
    }
}

/// `autores`: a name, an author object, or a list of either
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorsField {
    #[default]
    Absent,
    Name(String),
    Many(Vec<AuthorEntry>),
    Person(Map<String, Value>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorEntry {
    Name(String),
    Person(Map<String, Value>),
    Other(Value),
}

impl AuthorsField {
    /// Resolved author names in source order; unresolvable entries are dropped
    pub fn names(&self) -> Vec<String> {
        match self {
            AuthorsField::Absent | AuthorsField::Other(_) => Vec::new(),
            AuthorsField::Name(name) => non_blank(name).into_iter().collect(),
            AuthorsField::Person(person) => person_name(person).into_iter().collect(),
            AuthorsField::Many(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    AuthorEntry::Name(name) => non_blank(name),
                    AuthorEntry::Person(person) => person_name(person),
                    AuthorEntry::Other(_) => None,
                })
                .collect(),
        }
    }

    /// Joined names, or the "not available" label
    pub fn label(&self, config: &FeedConfig) -> String {
        let names = self.names();
        if names.is_empty() {
            config.not_available.clone()
        } else {
            names.join(&config.author_separator)
        }
    }
}

/// `tags`: a single keyword, or a list of keywords or tag objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    #[default]
    Absent,
    Single(String),
    Many(Vec<TagEntry>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    Text(String),
    Object(Map<String, Value>),
    Other(Value),
}

impl TagsField {
    /// Usable tag texts in source order, at most `limit`, duplicates kept
    pub fn resolve(&self, limit: usize) -> Vec<String> {
        let candidates: Vec<Option<String>> = match self {
            TagsField::Absent | TagsField::Other(_) => Vec::new(),
            TagsField::Single(tag) => vec![non_blank(tag)],
            TagsField::Many(entries) => entries
                .iter()
                .map(|entry| match entry {
                    TagEntry::Text(tag) => non_blank(tag),
                    TagEntry::Object(object) => TAG_TEXT_KEYS
                        .iter()
                        .find_map(|key| object.get(*key).and_then(scalar_text)),
                    TagEntry::Other(value) => scalar_text(value),
                })
                .collect(),
        };

        candidates
            .into_iter()
            .flatten()
            .filter(|tag| !JUNK_TAG_TOKENS.contains(&tag.as_str()))
            .take(limit)
            .collect()
    }
}

/// `multimediaPrincipal` / `imagem`: a URL or an object with a `src`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaField {
    #[default]
    Absent,
    Url(String),
    Object(Map<String, Value>),
    Other(Value),
}

impl MediaField {
    /// URL given directly as a string
    pub fn direct_url(&self) -> Option<String> {
        match self {
            MediaField::Url(url) => non_blank(url),
            _ => None,
        }
    }

    /// URL nested under `src`
    pub fn nested_source(&self) -> Option<String> {
        match self {
            MediaField::Object(object) => object
                .get(MEDIA_SOURCE_KEY)
                .and_then(Value::as_str)
                .and_then(non_blank),
            _ => None,
        }
    }
}

/// `time`: secondary timestamp, as text or epoch number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampField {
    #[default]
    Absent,
    Text(String),
    Epoch(i64),
    Other(Value),
}

impl TimestampField {
    /// Formatted label, if this field carries a usable timestamp
    pub fn format(&self) -> Option<String> {
        match self {
            TimestampField::Text(raw) => non_blank(raw).map(|raw| dates::format_date(&raw)),
            TimestampField::Epoch(secs) => dates::parse_epoch(*secs).map(dates::format_parsed),
            TimestampField::Absent | TimestampField::Other(_) => None,
        }
    }
}

/// Article icon: remote image or letter fallback, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArticleIcon {
    Image { source: String },
    Letter { text: String, tint_color: String },
}

/// Probes the media fields in priority order, then falls back to a title letter
pub fn resolve_icon(article: &RawArticle, config: &FeedConfig) -> ArticleIcon {
    let source = article
        .main_media
        .direct_url()
        .or_else(|| article.main_media.nested_source())
        .or_else(|| article.image.nested_source());

    if let Some(source) = source {
        return ArticleIcon::Image { source };
    }

    let text = article
        .title
        .as_deref()
        .map(strip_tags)
        .and_then(|title| title.trim().chars().next())
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_else(|| config.placeholder_letter.clone());

    ArticleIcon::Letter {
        text,
        tint_color: config.accent_color.clone(),
    }
}

/// `data` first, then `time`, then the sentinel label. A zero date in either means unknown.
pub fn published_label(article: &RawArticle, config: &FeedConfig) -> String {
    let zero_date = |raw: &str| raw.contains(config.zero_date_sentinel.as_str());

    let label = match (article.date.as_deref(), &article.time) {
        (Some(date), _) if zero_date(date) => None,
        (Some(date), _) => Some(dates::format_date(date)),
        (None, TimestampField::Text(time)) if zero_date(time.as_str()) => None,
        (None, time) => time.format(),
    };

    label
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| config.not_available.clone())
}

fn person_name(person: &Map<String, Value>) -> Option<String> {
    AUTHOR_NAME_KEYS
        .iter()
        .find_map(|key| person.get(*key).and_then(Value::as_str).and_then(non_blank))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// * Keeps strings and numbers; any other shape becomes absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => non_blank(&s).map(|_| s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
