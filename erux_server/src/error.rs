use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use erux_core::{
    assistant::AssistantError, directory::DirectoryError, reports::ScheduleError,
};
use serde::Serialize;
use utoipa::{ToResponse, ToSchema};

#[derive(Debug, Serialize, ToResponse, ToSchema)]
pub struct ErrorServer {
    pub message: String,
    pub status: u16,
}

impl ErrorServer {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.into(),
        }
    }
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<DirectoryError> for ErrorServer {
    fn from(e: DirectoryError) -> Self {
        let status = match e {
            DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
            DirectoryError::EmptyName => StatusCode::BAD_REQUEST,
        };
        ErrorServer::new(status, e.to_string())
    }
}

impl From<ScheduleError> for ErrorServer {
    fn from(e: ScheduleError) -> Self {
        ErrorServer::new(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl From<AssistantError> for ErrorServer {
    fn from(e: AssistantError) -> Self {
        match e {
            AssistantError::MissingKey => ErrorServer::new(StatusCode::BAD_REQUEST, e.to_string()),
            AssistantError::UnknownProvider(_) => {
                ErrorServer::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            other => {
                log::error!("Assistant provider error: {}", other);
                ErrorServer::new(StatusCode::BAD_GATEWAY, "assistant provider unavailable")
            }
        }
    }
}

impl From<anyhow::Error> for ErrorServer {
    fn from(e: anyhow::Error) -> Self {
        ErrorServer::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}
