pub mod image;
pub mod reddit;
pub mod types;

pub use reddit::RedditClient;
pub use types::{NewsItem, NewsKey};
