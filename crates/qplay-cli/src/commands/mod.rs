//! CLI command implementations.

pub mod backends;
pub mod common;
pub mod export;
pub mod import;
pub mod simulate;
pub mod validate;
pub mod version;
