pub mod identifier;
pub mod normalization;
pub mod session;

pub use identifier::{extract_article_id, ArticleId, IdentifierError, IDENTIFIER_ERROR_MESSAGE};
pub use normalization::{UrlCanonicalizer, UrlRepairRule, URL_REPAIR_RULES};
pub use session::{DetailRequest, DetailState, FeedSession};
