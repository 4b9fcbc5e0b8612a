pub mod config;
pub mod engine;
pub mod network;
pub mod ops;
pub mod refinery;

pub use config::{ConfigError, FeedConfig};
pub use engine::{extract_article_id, ArticleId, FeedSession, IdentifierError, UrlCanonicalizer};
pub use network::{ArticleSource, FetchError, NewsClient};
pub use refinery::{normalize_article, NormalizedArticle, RawArticle, ViewModelBuilder};
