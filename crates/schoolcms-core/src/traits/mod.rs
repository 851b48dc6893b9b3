//! Core traits defined in `schoolcms-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
