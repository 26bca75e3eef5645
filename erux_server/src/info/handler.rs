use axum::Json;

use crate::info::dto::Info;

#[utoipa::path(
    get,
    path = "/",
    description = "Service information",
    responses(
        (status = 200, description = "Success", body = Info),
    )
)]
pub async fn info() -> Json<Info> {
    Json(Info {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Access-control kiosk backend".to_string(),
    })
}
