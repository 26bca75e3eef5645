use std::sync::Arc;

use axum::extract::{Json, State};
use erux_core::access::EmergencyEvent;

use crate::state::ServerState;

#[utoipa::path(
    post,
    path = "/emergencies",
    description = "Declare an emergency and start the (simulated) recording",
    responses(
        (status = 200, description = "Success", body = EmergencyEvent),
    )
)]
#[axum::debug_handler]
pub async fn declare_emergency(
    State(server_state): State<Arc<ServerState>>,
) -> Json<EmergencyEvent> {
    Json(server_state.dashboard().declare_emergency().await)
}

#[utoipa::path(
    get,
    path = "/emergencies",
    description = "Declared emergencies, newest first",
    responses(
        (status = 200, description = "Success", body = [EmergencyEvent]),
    )
)]
#[axum::debug_handler]
pub async fn list_emergencies(
    State(server_state): State<Arc<ServerState>>,
) -> Json<Vec<EmergencyEvent>> {
    Json(server_state.dashboard().emergencies().read().await.to_vec())
}
