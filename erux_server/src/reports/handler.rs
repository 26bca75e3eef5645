use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::{Local, Utc};
use erux_core::reports::{
    ReportSchedule, ScheduleRequest,
    dto::{Analytics, TabEntries},
    handler::{analytics, build_report, render_json, report_file_name, tab_entries},
};
use uuid::Uuid;

use crate::{error::ErrorServer, reports::dto::LogQuery, state::ServerState};

#[utoipa::path(
    get,
    path = "/reports/analytics",
    description = "Granted and denied counts, hourly activity and late arrivals",
    responses(
        (status = 200, description = "Success", body = Analytics),
    )
)]
#[axum::debug_handler]
pub async fn get_analytics(State(server_state): State<Arc<ServerState>>) -> Json<Analytics> {
    let snapshot = server_state.dashboard().snapshot().await;

    Json(analytics(&snapshot.log, &snapshot.users))
}

#[utoipa::path(
    get,
    path = "/reports/log",
    params(LogQuery),
    description = "Access log filtered by report tab",
    responses(
        (status = 200, description = "Success"),
    )
)]
#[axum::debug_handler]
pub async fn get_log(
    State(server_state): State<Arc<ServerState>>,
    Query(query): Query<LogQuery>,
) -> Json<TabEntries> {
    let snapshot = server_state.dashboard().snapshot().await;

    Json(tab_entries(
        query.tab.unwrap_or_default(),
        &snapshot.log,
        &snapshot.users,
        &snapshot.emergencies,
    ))
}

#[utoipa::path(
    get,
    path = "/reports/download",
    description = "Full access report as a JSON attachment",
    responses(
        (status = 200, description = "Success", content_type = "application/json"),
        (status = 500, description = "Internal Server Error"),
    )
)]
#[axum::debug_handler]
pub async fn download_report(
    State(server_state): State<Arc<ServerState>>,
) -> Result<impl IntoResponse, ErrorServer> {
    let snapshot = server_state.dashboard().snapshot().await;
    let report = build_report(
        &snapshot.log,
        &snapshot.users,
        &snapshot.emergencies,
        Utc::now(),
    );

    let body = render_json(&report).map_err(|e| ErrorServer {
        status: StatusCode::INTERNAL_SERVER_ERROR.into(),
        message: e.to_string(),
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_file_name(Local::now().date_naive())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

#[utoipa::path(
    get,
    path = "/reports/schedules",
    description = "Scheduled daily report deliveries",
    responses(
        (status = 200, description = "Success", body = [ReportSchedule]),
    )
)]
#[axum::debug_handler]
pub async fn list_schedules(
    State(server_state): State<Arc<ServerState>>,
) -> Json<Vec<ReportSchedule>> {
    Json(server_state.deliveries().list())
}

#[utoipa::path(
    post,
    path = "/reports/schedules",
    request_body = ScheduleRequest,
    description = "Schedule a daily report delivery",
    responses(
        (status = 200, description = "Success", body = ReportSchedule),
        (status = 400, description = "Bad Request"),
    )
)]
#[axum::debug_handler]
pub async fn create_schedule(
    State(server_state): State<Arc<ServerState>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ReportSchedule>, ErrorServer> {
    let schedule = server_state
        .deliveries()
        .register(
            server_state.scheduler(),
            server_state.dashboard().clone(),
            server_state.outbox_dir(),
            request,
        )
        .await?;

    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/reports/schedules/{id}",
    params(("id" = String, Path, description = "Schedule id")),
    description = "Cancel a scheduled delivery",
    responses(
        (status = 200, description = "Success", body = ReportSchedule),
        (status = 404, description = "Not Found"),
    )
)]
#[axum::debug_handler]
pub async fn delete_schedule(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportSchedule>, ErrorServer> {
    let schedule = server_state
        .deliveries()
        .cancel(server_state.scheduler(), id)
        .await?;

    Ok(Json(schedule))
}
