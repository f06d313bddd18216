//! # TaskTrack Schema
//!
//! Relational schema for the TaskTrack service: users, their tasks and the
//! comments left on those tasks, plus the migration unit that creates and
//! removes it.
//!
//! ## Module Organization
//!
//! - `schema`: Declarative table definitions and DDL rendering
//! - `revisions`: Migration units (`init_schema`)
//! - `db`: Connection pool and migration invocation
//! - `models`: Row types for the three tables
//! - `config`: Configuration from environment variables
//! - `error`: Error taxonomy for storage-engine rejections

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod revisions;
pub mod schema;

pub use error::{ErrorKind, SchemaError};

/// Current version of the TaskTrack schema library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
