//! Tower middleware wired around the router.

pub mod cors;
pub mod logging;
