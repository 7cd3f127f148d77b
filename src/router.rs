//! Route table and shared request state. The set of routes is static:
//! wired once at startup, never mutated.

use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};

use crate::db::SqlService;
use crate::handlers::init::{
    init_delete_handler, init_get_handler, init_patch_handler, init_post_handler, init_put_handler,
};
use crate::handlers::schema::{build_schema_handler, drop_schema_handler};
use crate::handlers::users::{add_user_handler, all_users_handler};

/// Bodies larger than this are rejected with 413 before any handler runs.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct RosterState {
    pub db: SqlService,
}

impl RosterState {
    pub fn new(db: SqlService) -> Self {
        Self { db }
    }
}

/// Build the route table over the shared state. `static_root` is the
/// directory the front-end assets are served from; `/` returns its
/// `default.html` and unmatched paths fall back to a file lookup there.
pub fn roster_router(state: RosterState, static_root: &Path) -> Router {
    Router::new()
        .route("/buildschema", get(build_schema_handler))
        .route("/dropschema", get(drop_schema_handler))
        .route("/adduser", post(add_user_handler))
        .route("/allusers", get(all_users_handler))
        .route(
            "/init/{uname}",
            get(init_get_handler)
                .post(init_post_handler)
                .put(init_put_handler)
                .patch(init_patch_handler)
                .delete(init_delete_handler),
        )
        .route_service("/", ServeFile::new(static_root.join("default.html")))
        .fallback_service(ServeDir::new(static_root))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
