//! Database module: models, schema, and the service facade for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for building and dropping the database (SQLite-first)
//! - `sqlite.rs`: the [`SqlService`] facade every route talks to

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::UserRecord;
pub use schema::{SCHEMA_BUILD, SCHEMA_DROP};
pub use sqlite::{SqlService, SqlitePool, connect};
