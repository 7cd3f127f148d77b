use crate::db::models::UserRecord;
use crate::db::schema::{SCHEMA_BUILD, SCHEMA_DROP};
use crate::error::RosterError;
use crate::types::Outcome;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::warn;

pub type SqlitePool = Pool<Sqlite>;

/// Open the data store. Called once at process start, before any route is
/// wired; a failure here is fatal to the caller.
///
/// The pool is capped at one connection. Every handler borrows the same
/// underlying handle and `sqlite::memory:` URLs keep a single coherent
/// database.
pub async fn connect(database_url: &str) -> Result<SqlService, RosterError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_opts)
        .await?;
    Ok(SqlService::new(pool))
}

/// The data service facade. Every route delegates here; every operation
/// reports back through an [`Outcome`] envelope.
///
/// Statement-level failures (constraint violations, missing tables) are
/// caught and folded into a failure envelope. Infrastructure failures (pool
/// closed, row decoding) are returned as errors for the caller to propagate.
#[derive(Clone)]
pub struct SqlService {
    pool: SqlitePool,
}

impl SqlService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Release the connection handle. The lifecycle calls this exactly once,
    /// on either the normal or the signal-driven exit path.
    pub async fn disconnect(&self) {
        self.pool.close().await;
    }

    /// Create the `users` table and its index.
    pub async fn build_schema(&self) -> Result<Outcome, RosterError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SCHEMA_BUILD.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            if let Err(e) = sqlx::query(s).execute(&self.pool).await {
                return statement_failure("build", e);
            }
        }
        Ok(Outcome::ok("build", "schema created", Value::Null))
    }

    /// Drop the `users` table.
    pub async fn drop_schema(&self) -> Result<Outcome, RosterError> {
        match sqlx::query(SCHEMA_DROP).execute(&self.pool).await {
            Ok(_) => Ok(Outcome::ok("drop", "schema dropped", Value::Null)),
            Err(e) => statement_failure("drop", e),
        }
    }

    /// Insert one user. The four fields arrive positionally from the route
    /// and are bound as-is; absent fields are stored as NULL and any
    /// constraint failure is reported through the envelope.
    pub async fn adduser(
        &self,
        userid: Option<String>,
        friendlyname: Option<String>,
        emailaddress: Option<String>,
        admin: Option<bool>,
    ) -> Result<Outcome, RosterError> {
        let created = Utc::now().to_rfc3339();
        let admin_i: Option<i64> = admin.map(|a| if a { 1 } else { 0 });

        let insert = sqlx::query(
            r#"
            INSERT INTO users (userid, friendlyname, emailaddress, admin, created)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(userid)
        .bind(friendlyname)
        .bind(emailaddress)
        .bind(admin_i)
        .bind(created)
        .execute(&self.pool)
        .await;

        match insert {
            Ok(_) => Ok(Outcome::ok("adduser", "user added", Value::Null)),
            Err(e) => statement_failure("adduser", e),
        }
    }

    /// List every user row, oldest first.
    pub async fn allusers(&self) -> Result<Outcome, RosterError> {
        let rows = sqlx::query(
            r#"SELECT userid, friendlyname, emailaddress, admin, created
               FROM users ORDER BY created, userid"#,
        )
        .fetch_all(&self.pool)
        .await;

        let rows = match rows {
            Ok(rows) => rows,
            Err(e) => return statement_failure("allusers", e),
        };

        let users = rows
            .into_iter()
            .map(Self::row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        let message = format!("{} users found", users.len());
        Ok(Outcome::ok("allusers", message, serde_json::to_value(users)?))
    }

    /// Connectivity check. The `/init` routes call this and discard the
    /// envelope; it touches no application table.
    pub async fn init(&self) -> Result<Outcome, RosterError> {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => Ok(Outcome::ok("init", "connection verified", Value::Null)),
            Err(e) => statement_failure("init", e),
        }
    }

    fn row_to_user(row: SqliteRow) -> Result<UserRecord, RosterError> {
        // A NULL key would otherwise decode as "" under SQLite.
        let userid: Option<String> = row.try_get("userid")?;
        let friendlyname: Option<String> = row.try_get("friendlyname")?;
        let emailaddress: Option<String> = row.try_get("emailaddress")?;
        let admin_i: Option<i64> = row.try_get("admin")?;
        let created_str: String = row.try_get("created")?;

        let created: DateTime<Utc> = chrono::DateTime::parse_from_rfc3339(&created_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(UserRecord {
            userid,
            friendlyname,
            emailaddress,
            admin: admin_i.map(|v| v != 0),
            created,
        })
    }
}

/// Fold a statement-level database error into a failure envelope; anything
/// else stays an error for the caller to propagate.
fn statement_failure(operation: &str, err: sqlx::Error) -> Result<Outcome, RosterError> {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err
                .code()
                .and_then(|c| c.parse::<i64>().ok())
                .unwrap_or(1);
            warn!(operation, code, error = %db_err.message(), "statement failed");
            Ok(Outcome::failed(operation, code, db_err.message()))
        }
        other => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_service() -> SqlService {
        connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database")
    }

    #[tokio::test]
    async fn operations_round_trip_through_envelopes() {
        let db = memory_service().await;

        let built = db.build_schema().await.expect("build errored");
        assert_eq!(built.operation, "build");
        assert!(built.success);
        assert_eq!(built.code, 0);

        let added = db
            .adduser(
                Some("u1".to_string()),
                Some("Fred".to_string()),
                Some("f@x.com".to_string()),
                Some(true),
            )
            .await
            .expect("adduser errored");
        assert!(added.success);
        assert_eq!(added.results, Value::Null);

        let listed = db.allusers().await.expect("allusers errored");
        assert!(listed.success);
        assert_eq!(listed.message, "1 users found");
        let rows = listed.results.as_array().expect("results was not an array");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["userid"], "u1");
        assert_eq!(rows[0]["friendlyname"], "Fred");
        assert_eq!(rows[0]["emailaddress"], "f@x.com");
        assert_eq!(rows[0]["admin"], true);

        let dropped = db.drop_schema().await.expect("drop errored");
        assert!(dropped.success);
        assert_eq!(dropped.operation, "drop");
    }

    #[tokio::test]
    async fn duplicate_userid_is_caught_into_a_failure_envelope() {
        let db = memory_service().await;
        db.build_schema().await.expect("build errored");

        let first = db
            .adduser(Some("u1".to_string()), None, None, None)
            .await
            .expect("adduser errored");
        assert!(first.success);

        let second = db
            .adduser(Some("u1".to_string()), None, None, None)
            .await
            .expect("duplicate adduser should fold into an envelope");
        assert!(!second.success);
        assert_ne!(second.code, 0);
        assert!(second.message.contains("UNIQUE"));
        assert_eq!(second.results, Value::Null);
    }

    #[tokio::test]
    async fn missing_fields_are_stored_as_nulls() {
        let db = memory_service().await;
        db.build_schema().await.expect("build errored");

        let added = db
            .adduser(Some("u2".to_string()), None, None, None)
            .await
            .expect("adduser errored");
        assert!(added.success);

        // No validation anywhere: even the key may be absent, and SQLite
        // accepts a NULL TEXT primary key.
        let keyless = db
            .adduser(None, None, None, None)
            .await
            .expect("adduser errored");
        assert!(keyless.success);

        let listed = db.allusers().await.expect("allusers errored");
        let rows = listed.results.as_array().expect("results was not an array");
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row["friendlyname"], Value::Null);
            assert_eq!(row["emailaddress"], Value::Null);
            assert_eq!(row["admin"], Value::Null);
        }
        assert!(rows.iter().any(|row| row["userid"] == "u2"));
        assert!(rows.iter().any(|row| row["userid"] == Value::Null));
    }

    #[tokio::test]
    async fn operations_without_schema_report_failure_envelopes() {
        let db = memory_service().await;

        let listed = db
            .allusers()
            .await
            .expect("missing table should fold into an envelope");
        assert_eq!(listed.operation, "allusers");
        assert!(!listed.success);
        assert_ne!(listed.code, 0);

        // The connectivity check is independent of the application schema.
        let checked = db.init().await.expect("init errored");
        assert!(checked.success);
        assert_eq!(checked.operation, "init");
        assert_eq!(checked.message, "connection verified");
    }
}
