use axum::extract::State;
use serde::Deserialize;
use tracing::info;

use crate::error::RosterError;
use crate::middleware::LenientJson;
use crate::router::RosterState;
use crate::types::Outcome;

/// The four fields a client may post. All optional: an absent field passes
/// through to the store as NULL instead of short-circuiting the call.
#[derive(Debug, Default, Deserialize)]
pub struct AddUserRequest {
    pub userid: Option<String>,
    pub friendlyname: Option<String>,
    pub emailaddress: Option<String>,
    pub admin: Option<bool>,
}

/// POST /adduser -> inserts one user from the posted body. A request without
/// a readable JSON body behaves like an empty one.
pub async fn add_user_handler(
    State(state): State<RosterState>,
    LenientJson(body): LenientJson<AddUserRequest>,
) -> Result<Outcome, RosterError> {
    info!("add user request received");
    state
        .db
        .adduser(body.userid, body.friendlyname, body.emailaddress, body.admin)
        .await
}

/// GET /allusers -> lists every stored user.
pub async fn all_users_handler(State(state): State<RosterState>) -> Result<Outcome, RosterError> {
    info!("all users request received");
    state.db.allusers().await
}
