// * Markdown & Metadata Rendering
// * Produces the strings and rows handed to the host list/detail widgets.

use serde::{Deserialize, Serialize};

use super::sanitizer::strip_tags;
use crate::config::constants::{
    AUTHOR_ROW_TITLE, KEYWORDS_ROW_TITLE, PUBLISHED_ROW_TITLE, TOPICS_ROW_TITLE,
};
use crate::config::FeedConfig;

// * Icon name the host uses for the empty-topics row
pub const TAG_ROW_ICON: &str = "tag";

const ERROR_HEADING: &str = "# Error";
const LOADING_NOTICE: &str = "Loading article preview...";
const OPEN_IN_BROWSER_LABEL: &str = "Abrir no Navegador";

/// A coloured tag in the keywords list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagChip {
    pub text: String,
    pub color: String,
}

/// One row of the detail metadata panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataRow {
    Label {
        title: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    TagList {
        title: String,
        tags: Vec<TagChip>,
    },
}

/// Inputs of the article detail block
#[derive(Debug, Clone, Copy)]
pub struct DetailParts<'a> {
    pub title: &'a str,
    pub authors: &'a str,
    pub published: &'a str,
    pub lead: Option<&'a str>,
    pub body: Option<&'a str>,
    pub url: &'a str,
}

/// Heading, attribution line, optional lead, then the body or the read-on-the-web notice
pub fn detail_markdown(parts: DetailParts<'_>, config: &FeedConfig) -> String {
    let mut out = format!(
        "# {}\n\n*{} • {}*\n\n",
        parts.title, parts.authors, parts.published
    );

    if let Some(lead) = parts.lead.map(strip_tags).filter(|l| !l.trim().is_empty()) {
        out.push_str(&format!("**{}**\n\n", lead.trim()));
    }

    match parts.body.map(strip_tags).filter(|b| !b.trim().is_empty()) {
        Some(body) => out.push_str(body.trim()),
        None => out.push_str(&read_on_web_notice(parts.url, config)),
    }

    out.push('\n');
    out
}

/// Notice plus a link to the canonical URL
pub fn read_on_web_notice(url: &str, config: &FeedConfig) -> String {
    format!(
        "{}\n\n{}\n\n[{}]({})",
        config.read_on_web_notice, config.web_only_notice, OPEN_IN_BROWSER_LABEL, url
    )
}

/// List-row detail panel: title, rule, cleaned description
pub fn preview_markdown(title: &str, description: &str) -> String {
    format!("# {}\n\n---\n\n{}\n", title, description)
}

/// Shown instead of an article when fetching or id extraction fails
pub fn error_markdown(message: &str) -> String {
    format!("{}\n\n{}", ERROR_HEADING, message)
}

/// Shown while the detail fetch is in flight
pub fn loading_markdown(title: &str) -> String {
    format!("# {}\n\n{}", title, LOADING_NOTICE)
}

/// Author and Published rows, then keywords or the empty-topics row
pub fn metadata_rows(
    authors: &str,
    published: &str,
    tags: &[String],
    config: &FeedConfig,
) -> Vec<MetadataRow> {
    let mut rows = vec![
        MetadataRow::Label {
            title: AUTHOR_ROW_TITLE.to_string(),
            text: authors.to_string(),
            icon: None,
        },
        MetadataRow::Label {
            title: PUBLISHED_ROW_TITLE.to_string(),
            text: published.to_string(),
            icon: None,
        },
    ];

    if tags.is_empty() {
        rows.push(MetadataRow::Label {
            title: TOPICS_ROW_TITLE.to_string(),
            text: config.not_available.clone(),
            icon: Some(TAG_ROW_ICON.to_string()),
        });
    } else {
        rows.push(MetadataRow::TagList {
            title: KEYWORDS_ROW_TITLE.to_string(),
            tags: tag_chips(tags, config),
        });
    }

    rows
}

/// Pairs each tag with its palette colour by position
pub fn tag_chips(tags: &[String], config: &FeedConfig) -> Vec<TagChip> {
    tags.iter()
        .take(config.max_tags)
        .enumerate()
        .map(|(i, text)| TagChip {
            text: text.clone(),
            color: config.tag_color(i).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(lead: Option<&'a str>, body: Option<&'a str>) -> DetailParts<'a> {
        DetailParts {
            title: "Título",
            authors: "Ana Silva",
            published: "15 de janeiro de 2024, 10:30",
            lead,
            body,
            url: "https://www.publico.pt/a-1",
        }
    }

    #[test]
    fn test_detail_with_body_and_lead() {
        let md = detail_markdown(
            parts(Some("<em>Resumo</em>"), Some("<p>Corpo do texto</p>")),
            &FeedConfig::default(),
        );
        assert_eq!(
            md,
            "# Título\n\n*Ana Silva • 15 de janeiro de 2024, 10:30*\n\n**Resumo**\n\nCorpo do texto\n"
        );
    }

    #[test]
    fn test_detail_without_body_links_to_web() {
        let md = detail_markdown(parts(None, Some("  <p> </p> ")), &FeedConfig::default());
        assert!(
            md.starts_with("# Título\n\n*Ana Silva • 15 de janeiro de 2024, 10:30*\n\nPara ler")
        );
        assert!(md.contains("só está disponível no site do Publico"));
        assert!(md.contains("(https://www.publico.pt/a-1)"));
        assert!(!md.contains("**"));
    }

    #[test]
    fn test_error_and_loading() {
        assert_eq!(error_markdown("Falhou"), "# Error\n\nFalhou");
        assert_eq!(loading_markdown("Título"), "# Título\n\nLoading article preview...");
    }

    #[test]
    fn test_empty_tags_fall_back_to_topics_row() {
        let rows = metadata_rows("A", "B", &[], &FeedConfig::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[2],
            MetadataRow::Label {
                title: "Tópicos".into(),
                text: "Not available".into(),
                icon: Some("tag".into()),
            }
        );
    }

    #[test]
    fn test_tag_chips_colours() {
        let tags: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let chips = tag_chips(&tags, &FeedConfig::default());
        assert_eq!(chips[0].color, "#B22222");
        assert_eq!(chips[2].color, "#006400");
    }
}
