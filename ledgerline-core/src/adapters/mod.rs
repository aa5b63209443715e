//! Adapter implementations
//!
//! Concrete implementations of the port traits: DuckDB-backed storage,
//! the cached currency directory, and demo data generation.

pub mod demo;
pub mod directory;
pub mod duckdb;
