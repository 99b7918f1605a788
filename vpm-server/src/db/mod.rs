//! Database module for the VPM server
//!
//! Contains the PostgreSQL-backed product store.

pub mod product;

pub use product::PostgresProductStore;
