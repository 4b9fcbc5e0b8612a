pub mod client;
pub mod errors;
pub mod identity;

pub use client::{ArticleSource, FetchResult, NewsClient};
pub use errors::FetchError;
pub use identity::ClientIdentity;
