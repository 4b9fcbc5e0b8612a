use crate::config::FeedConfig;
use crate::engine::identifier::ArticleId;
use crate::network::errors::FetchError;
use crate::network::identity::ClientIdentity;
use crate::refinery::RawArticle;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

// * Keys under which list endpoints have been seen to wrap their article array
const LIST_WRAPPER_KEYS: [&str; 4] = ["items", "articles", "noticias", "data"];

/// Boxed future returned by [`ArticleSource`] methods
pub type FetchResult<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send>>;

/// Anything that can supply raw provider records
pub trait ArticleSource: Send + Sync {
    /// Fetches the top/latest news list
    fn fetch_top_news(&self) -> FetchResult<Vec<RawArticle>>;

    /// Fetches a single article by identifier
    fn fetch_article_detail(&self, id: &ArticleId) -> FetchResult<RawArticle>;
}

// * The HTTP client for the provider's JSON API. No retry, no caching.
#[derive(Debug, Clone)]
pub struct NewsClient {
    inner: Client,
    config: FeedConfig,
}

impl NewsClient {
    // * Builds the client from the feed configuration.
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        for endpoint in [&config.top_news_endpoint, &config.article_detail_endpoint] {
            if Url::parse(endpoint).is_err() {
                return Err(FetchError::InvalidUrl(endpoint.clone()));
            }
        }

        let client = Client::builder()
            .default_headers(ClientIdentity::default_profile().headers())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            inner: client,
            config: config.clone(),
        })
    }

    // * GETs a URL and decodes the body as JSON.
    async fn get_json(client: Client, url: String) -> Result<Value, FetchError> {
        tracing::debug!(%url, "Fetching");
        let resp = client.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Provider returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ArticleSource for NewsClient {
    fn fetch_top_news(&self) -> FetchResult<Vec<RawArticle>> {
        let client = self.inner.clone();
        let url = self.config.top_news_endpoint.clone();

        Box::pin(async move {
            let body = Self::get_json(client, url).await?;
            let articles = list_records(body)?;
            tracing::info!(count = articles.len(), "Fetched top news");
            Ok(articles)
        })
    }

    fn fetch_article_detail(&self, id: &ArticleId) -> FetchResult<RawArticle> {
        let client = self.inner.clone();
        let url = self.config.article_detail_url(id.as_str());

        Box::pin(async move {
            let body = Self::get_json(client, url).await?;
            detail_record(body)
        })
    }
}

/// Extracts the article array from a list response
pub fn list_records(body: Value) -> Result<Vec<RawArticle>, FetchError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut object) => LIST_WRAPPER_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                FetchError::UnexpectedShape("no article array in list response".to_string())
            })?,
        other => {
            return Err(FetchError::UnexpectedShape(format!(
                "list response is a {}",
                json_kind(&other)
            )))
        }
    };

    Ok(items.into_iter().map(RawArticle::from_value).collect())
}

/// Extracts the single record of a detail response
pub fn detail_record(body: Value) -> Result<RawArticle, FetchError> {
    match body {
        Value::Object(_) => Ok(RawArticle::from_value(body)),
        Value::Array(mut items) if !items.is_empty() => {
            Ok(RawArticle::from_value(items.swap_remove(0)))
        }
        other => Err(FetchError::UnexpectedShape(format!(
            "detail response is a {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "empty array",
        Value::Object(_) => "object",
    }
}
