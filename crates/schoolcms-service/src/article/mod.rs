//! The article approval workflow.

pub mod content;
pub mod input;
pub mod service;
pub mod transition;

pub use content::ContentRules;
pub use input::{ArticleFilter, CreateArticleInput, RejectInput, UpdateArticleInput};
pub use service::ArticleService;
pub use transition::Transition;
