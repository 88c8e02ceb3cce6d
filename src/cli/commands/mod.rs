//! CLI command implementations.

pub mod capture;
pub mod refresh;
pub mod validate;
