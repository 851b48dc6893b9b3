//! Administrator-only handlers.

pub mod audit;
