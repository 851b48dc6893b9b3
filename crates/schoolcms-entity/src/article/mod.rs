//! Article domain entities.

pub mod model;
pub mod query;
pub mod status;

pub use model::Article;
pub use query::{ArticleQuery, ArticleScope};
pub use status::ArticleStatus;
