use axum::extract::State;
use tracing::info;

use crate::error::RosterError;
use crate::router::RosterState;
use crate::types::Outcome;

/// GET /buildschema -> creates the users table and reports through the envelope.
pub async fn build_schema_handler(
    State(state): State<RosterState>,
) -> Result<Outcome, RosterError> {
    info!("build schema request received");
    state.db.build_schema().await
}

/// GET /dropschema -> drops the users table and reports through the envelope.
pub async fn drop_schema_handler(
    State(state): State<RosterState>,
) -> Result<Outcome, RosterError> {
    info!("drop schema request received");
    state.db.drop_schema().await
}
