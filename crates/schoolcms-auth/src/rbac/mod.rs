//! Role classification.

pub mod gate;

pub use gate::RoleGate;
