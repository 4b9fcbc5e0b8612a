// * Feed Session
// * Holds the display state of the list view and the article detail view.
// *
// * A detail open is split into begin / fetch / complete so the host can run the
// * fetch wherever it likes. Each begin bumps a generation counter; a completion
// * only lands if it belongs to the latest generation, so a slow response for a
// * previously selected article never overwrites the current one.

use tracing::{debug, error, info, warn};

use crate::engine::identifier::{extract_article_id_for, ArticleId, IdentifierError};
use crate::network::{ArticleSource, FetchError};
use crate::refinery::{
    error_markdown, loading_markdown, ArticleContext, NormalizedArticle, RawArticle,
    ViewModelBuilder,
};

/// Display state of the article detail view
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    Loading { title: String, url: String },
    Ready(Box<NormalizedArticle>),
    Failed { title: String, url: String, message: String },
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading { .. })
    }

    /// Markdown for the detail widget
    pub fn markdown(&self) -> String {
        match self {
            DetailState::Idle => String::new(),
            DetailState::Loading { title, .. } => loading_markdown(title),
            DetailState::Ready(article) => article.body_markdown.clone(),
            DetailState::Failed { message, .. } => error_markdown(message),
        }
    }

    /// URL for the open and copy actions
    pub fn action_url(&self) -> Option<&str> {
        match self {
            DetailState::Idle => None,
            DetailState::Loading { url, .. } | DetailState::Failed { url, .. } => {
                Some(url.as_str())
            }
            DetailState::Ready(article) => Some(article.url.as_str()),
        }
    }
}

/// Ticket for one detail open, returned by [`FeedSession::begin_detail`]
#[derive(Debug, Clone)]
pub struct DetailRequest {
    generation: u64,
    pub title: String,
    pub url: String,
    pub id: Result<ArticleId, IdentifierError>,
}

impl DetailRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// List and detail state for one feed view
pub struct FeedSession<S: ArticleSource> {
    source: S,
    builder: ViewModelBuilder,
    articles: Vec<NormalizedArticle>,
    list_loading: bool,
    list_error: Option<String>,
    detail: DetailState,
    detail_generation: u64,
}

impl<S: ArticleSource> FeedSession<S> {
    pub fn new(source: S, builder: ViewModelBuilder) -> Self {
        Self {
            source,
            builder,
            articles: Vec::new(),
            list_loading: false,
            list_error: None,
            detail: DetailState::Idle,
            detail_generation: 0,
        }
    }

    pub fn articles(&self) -> &[NormalizedArticle] {
        &self.articles
    }

    pub fn is_list_loading(&self) -> bool {
        self.list_loading
    }

    pub fn list_error(&self) -> Option<&str> {
        self.list_error.as_deref()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn builder(&self) -> &ViewModelBuilder {
        &self.builder
    }

    // * Fetches and normalizes the list. On failure the previous rows stay visible.
    pub async fn refresh(&mut self) -> &[NormalizedArticle] {
        self.list_loading = true;

        match self.source.fetch_top_news().await {
            Ok(raws) => {
                self.articles = self.builder.build_all(&raws);
                self.list_error = None;
                info!(count = self.articles.len(), "Feed list refreshed");
            }
            Err(e) => {
                error!(error = %e, "Error fetching top news");
                self.list_error = Some(e.to_string());
            }
        }

        self.list_loading = false;
        &self.articles
    }

    // * Starts a detail open: bumps the generation and shows the loading state,
    // * or the identifier error when the link carries no article id.
    pub fn begin_detail(&mut self, url: &str, title: &str) -> DetailRequest {
        self.detail_generation += 1;
        let id = extract_article_id_for(url, &self.builder.config().provider_domain);

        self.detail = match &id {
            Ok(_) => DetailState::Loading {
                title: title.to_string(),
                url: url.to_string(),
            },
            Err(e) => {
                warn!(%url, reason = %e, "Could not extract article ID");
                DetailState::Failed {
                    title: title.to_string(),
                    url: url.to_string(),
                    message: e.user_message().to_string(),
                }
            }
        };

        DetailRequest {
            generation: self.detail_generation,
            title: title.to_string(),
            url: url.to_string(),
            id,
        }
    }

    // * Applies a fetch outcome. Returns false when a newer open superseded it.
    pub fn complete_detail(
        &mut self,
        request: &DetailRequest,
        result: Result<RawArticle, FetchError>,
    ) -> bool {
        if request.generation != self.detail_generation {
            debug!(
                stale = request.generation,
                current = self.detail_generation,
                "Dropping superseded detail response"
            );
            return false;
        }

        self.detail = match result {
            Ok(raw) => {
                // * Actions keep pointing at the link the user opened
                let context = ArticleContext {
                    title: Some(request.title.as_str()),
                    url: None,
                    origin_url: Some(request.url.as_str()),
                };
                DetailState::Ready(Box::new(self.builder.build_with(&raw, context)))
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "Error loading article");
                DetailState::Failed {
                    title: request.title.clone(),
                    url: request.url.clone(),
                    message: format!("Error loading article: {}", e),
                }
            }
        };

        true
    }

    // * Runs begin / fetch / complete in sequence.
    pub async fn open_article(&mut self, url: &str, title: &str) -> &DetailState {
        let request = self.begin_detail(url, title);

        if let Ok(id) = &request.id {
            let result = self.source.fetch_article_detail(id).await;
            self.complete_detail(&request, result);
        }

        &self.detail
    }
}
