//! SQL DDL for the user roster store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `userid` TEXT PRIMARY KEY (the caller-chosen identifier)
/// - `friendlyname`, `emailaddress` free-form and nullable
/// - `admin` BOOLEAN (stored as INTEGER 0/1, nullable)
/// - `created` RFC3339 insertion timestamp
pub const SCHEMA_BUILD: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    userid TEXT PRIMARY KEY,
    friendlyname TEXT NULL,
    emailaddress TEXT NULL,
    admin INTEGER NULL,
    created TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_emailaddress ON users(emailaddress);
"#;

/// Dropping the table drops its index with it.
pub const SCHEMA_DROP: &str = "DROP TABLE IF EXISTS users";
