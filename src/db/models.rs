use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `users` table as surfaced in `allusers` results.
///
/// `userid` is optional too: SQLite lets a TEXT primary key hold NULL, and
/// inserts are unvalidated, so a keyless row must read back as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct UserRecord {
    pub userid: Option<String>,
    pub friendlyname: Option<String>,
    pub emailaddress: Option<String>,
    pub admin: Option<bool>,
    pub created: DateTime<Utc>,
}
