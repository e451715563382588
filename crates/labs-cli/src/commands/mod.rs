//! CLI command implementations.

pub mod common;
pub mod energy;
pub mod interactions;
pub mod search;
pub mod version;
