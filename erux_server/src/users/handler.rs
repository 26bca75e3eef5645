use std::sync::Arc;

use axum::extract::{Json, Path, State};
use erux_core::directory::dto::{RegisteredUser, UserForm};

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/users",
    description = "Registered users, newest first",
    responses(
        (status = 200, description = "Success", body = [RegisteredUser]),
    )
)]
#[axum::debug_handler]
pub async fn list_users(State(server_state): State<Arc<ServerState>>) -> Json<Vec<RegisteredUser>> {
    Json(server_state.dashboard().directory().read().await.list().to_vec())
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserForm,
    description = "Register a user",
    responses(
        (status = 200, description = "Success", body = RegisteredUser),
        (status = 400, description = "Bad Request"),
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(server_state): State<Arc<ServerState>>,
    Json(form): Json<UserForm>,
) -> Result<Json<RegisteredUser>, ErrorServer> {
    let user = server_state
        .dashboard()
        .directory()
        .write()
        .await
        .create(form)?;

    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    request_body = UserForm,
    params(("id" = String, Path, description = "User id")),
    description = "Update a user",
    responses(
        (status = 200, description = "Success", body = RegisteredUser),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found"),
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(form): Json<UserForm>,
) -> Result<Json<RegisteredUser>, ErrorServer> {
    let user = server_state
        .dashboard()
        .directory()
        .write()
        .await
        .update(&id, form)?;

    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User id")),
    description = "Delete a user",
    responses(
        (status = 200, description = "Success", body = RegisteredUser),
        (status = 404, description = "Not Found"),
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<RegisteredUser>, ErrorServer> {
    let user = server_state
        .dashboard()
        .directory()
        .write()
        .await
        .delete(&id)?;

    Ok(Json(user))
}
