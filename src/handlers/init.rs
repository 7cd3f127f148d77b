//! Diagnostic routes: five verbs on one path. Inputs (path parameter,
//! `answer` query parameter, `answer` body field) are logged and otherwise
//! ignored; the reply is a fixed per-verb string.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::RosterError;
use crate::middleware::LenientJson;
use crate::router::RosterState;

#[derive(Debug, Default, Deserialize)]
pub struct InitQuery {
    pub answer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InitBody {
    pub answer: Option<Value>,
}

/// Fixed reply shape for the diagnostic routes.
#[derive(Debug, Serialize)]
pub struct InitReply {
    pub status: &'static str,
    pub value: String,
}

/// GET /init/:uname -> fixed diagnostic reply.
pub async fn init_get_handler(
    State(state): State<RosterState>,
    Path(uname): Path<String>,
    query: Result<Query<InitQuery>, QueryRejection>,
    LenientJson(body): LenientJson<InitBody>,
) -> Result<Json<InitReply>, RosterError> {
    respond(&state, "GET", &uname, query, body).await
}

/// POST /init/:uname -> fixed diagnostic reply.
pub async fn init_post_handler(
    State(state): State<RosterState>,
    Path(uname): Path<String>,
    query: Result<Query<InitQuery>, QueryRejection>,
    LenientJson(body): LenientJson<InitBody>,
) -> Result<Json<InitReply>, RosterError> {
    respond(&state, "POST", &uname, query, body).await
}

/// PUT /init/:uname -> fixed diagnostic reply.
pub async fn init_put_handler(
    State(state): State<RosterState>,
    Path(uname): Path<String>,
    query: Result<Query<InitQuery>, QueryRejection>,
    LenientJson(body): LenientJson<InitBody>,
) -> Result<Json<InitReply>, RosterError> {
    respond(&state, "PUT", &uname, query, body).await
}

/// PATCH /init/:uname -> fixed diagnostic reply.
pub async fn init_patch_handler(
    State(state): State<RosterState>,
    Path(uname): Path<String>,
    query: Result<Query<InitQuery>, QueryRejection>,
    LenientJson(body): LenientJson<InitBody>,
) -> Result<Json<InitReply>, RosterError> {
    respond(&state, "PATCH", &uname, query, body).await
}

/// DELETE /init/:uname -> fixed diagnostic reply.
pub async fn init_delete_handler(
    State(state): State<RosterState>,
    Path(uname): Path<String>,
    query: Result<Query<InitQuery>, QueryRejection>,
    LenientJson(body): LenientJson<InitBody>,
) -> Result<Json<InitReply>, RosterError> {
    respond(&state, "DELETE", &uname, query, body).await
}

async fn respond(
    state: &RosterState,
    verb: &str,
    uname: &str,
    query: Result<Query<InitQuery>, QueryRejection>,
    body: InitBody,
) -> Result<Json<InitReply>, RosterError> {
    // The query value is read but never acted on, so a query string this
    // struct cannot represent (a duplicated key, say) is logged, not rejected.
    let query = query.map(|Query(query)| query).unwrap_or_else(|rejection| {
        debug!(error = %rejection, "unreadable query string on a diagnostic route");
        InitQuery::default()
    });
    info!(
        uname,
        query_answer = ?query.answer,
        body_answer = ?body.answer,
        "/init {} request received",
        verb.to_lowercase()
    );

    // The connectivity check's envelope is discarded; the reply is fixed
    // per verb.
    state.db.init().await?;

    Ok(Json(InitReply {
        status: "success",
        value: format!("replied from {verb}"),
    }))
}
