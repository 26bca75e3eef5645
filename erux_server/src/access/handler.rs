use std::{sync::Arc, time::Instant};

use axum::extract::{Json, State};
use erux_core::access::AccessEvent;

use crate::{access::dto::Detection, state::ServerState};

#[utoipa::path(
    get,
    path = "/access-log",
    description = "Latest access attempts, newest first",
    responses(
        (status = 200, description = "Success", body = [AccessEvent]),
    )
)]
#[axum::debug_handler]
pub async fn access_log(State(server_state): State<Arc<ServerState>>) -> Json<Vec<AccessEvent>> {
    Json(server_state.dashboard().log().read().await.to_vec())
}

#[utoipa::path(
    get,
    path = "/detection",
    description = "Subject currently shown on the kiosk panel",
    responses(
        (status = 200, description = "Success", body = Detection),
    )
)]
#[axum::debug_handler]
pub async fn detection(State(server_state): State<Arc<ServerState>>) -> Json<Detection> {
    let banner = server_state.dashboard().detection().lock().await;
    let now = Instant::now();

    Json(Detection {
        name: banner.current(now).to_string(),
        idle: banner.is_idle(now),
    })
}
