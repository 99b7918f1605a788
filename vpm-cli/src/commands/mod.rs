//! CLI command implementations.

pub mod products;
pub mod search;
pub mod seed;
pub mod validate;
