use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::Local;
use dashmap::DashMap;
use erux_core::{
    assistant::{
        ChatSession, LanguageModel,
        actions::describe_action,
        build_provider,
        dto::{AiAction, ChatMessage},
        prompt::build_system_instruction,
        session::NOT_INITIALIZED,
    },
    helpers::utils::format_day,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    assistant::dto::{
        ActionOutcome, ActionRequest, OpenSessionRequest, SendMessageRequest, SessionView,
    },
    error::ErrorServer,
    state::ServerState,
};

pub struct AssistantSession {
    chat: Mutex<ChatSession>,
    model: Arc<dyn LanguageModel>,
}

/// Open chat sessions. The provider key lives only inside the session's
/// model client.
#[derive(Clone, Default)]
pub struct AssistantSessions {
    sessions: Arc<DashMap<Uuid, Arc<AssistantSession>>>,
}

impl AssistantSessions {
    pub fn open(&self, model: Arc<dyn LanguageModel>) -> SessionView {
        let chat = ChatSession::new();
        let view = SessionView {
            id: chat.id(),
            messages: chat.messages().to_vec(),
        };

        self.sessions.insert(
            view.id,
            Arc::new(AssistantSession {
                chat: Mutex::new(chat),
                model,
            }),
        );

        log::info!("Assistant session {} opened", view.id);
        view
    }

    pub fn get(&self, id: &Uuid) -> Result<Arc<AssistantSession>, ErrorServer> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(ErrorServer::new(StatusCode::NOT_FOUND, NOT_INITIALIZED))
    }

    /// Drops the session together with its model client and key.
    pub fn close(&self, id: &Uuid) -> Result<(), ErrorServer> {
        self.sessions
            .remove(id)
            .ok_or(ErrorServer::new(StatusCode::NOT_FOUND, NOT_INITIALIZED))?;

        log::info!("Assistant session {} closed", id);
        Ok(())
    }
}

#[utoipa::path(
    post,
    path = "/assistant/sessions",
    request_body = OpenSessionRequest,
    description = "Open an assistant session with a provider API key",
    responses(
        (status = 200, description = "Success", body = SessionView),
        (status = 400, description = "Bad Request"),
    )
)]
#[axum::debug_handler]
pub async fn open_session(
    State(server_state): State<Arc<ServerState>>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<Json<SessionView>, ErrorServer> {
    if request.api_key.trim().is_empty() {
        return Err(ErrorServer::new(StatusCode::BAD_REQUEST, NOT_INITIALIZED));
    }

    let model = build_provider(server_state.provider(), &request.api_key)?;

    Ok(Json(server_state.sessions().open(model)))
}

#[utoipa::path(
    delete,
    path = "/assistant/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    description = "Close an assistant session and forget its API key",
    responses(
        (status = 204, description = "Closed"),
        (status = 404, description = "Not Found"),
    )
)]
#[axum::debug_handler]
pub async fn close_session(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorServer> {
    server_state.sessions().close(&id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/assistant/sessions/{id}/messages",
    params(("id" = String, Path, description = "Session id")),
    description = "Session transcript",
    responses(
        (status = 200, description = "Success", body = [ChatMessage]),
        (status = 404, description = "Not Found"),
    )
)]
#[axum::debug_handler]
pub async fn get_messages(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ErrorServer> {
    let session = server_state.sessions().get(&id)?;
    let messages = session.chat.lock().await.messages().to_vec();

    Ok(Json(messages))
}

#[utoipa::path(
    post,
    path = "/assistant/sessions/{id}/messages",
    params(("id" = String, Path, description = "Session id")),
    request_body = SendMessageRequest,
    description = "Send a message to the assistant and get its reply",
    responses(
        (status = 200, description = "Success", body = ChatMessage),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found"),
    )
)]
#[axum::debug_handler]
pub async fn send_message(
    State(server_state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatMessage>, ErrorServer> {
    let session = server_state.sessions().get(&id)?;

    let text = request.text.trim();
    if text.is_empty() {
        return Err(ErrorServer::new(
            StatusCode::BAD_REQUEST,
            "message must not be empty",
        ));
    }

    let snapshot = server_state.dashboard().snapshot().await;
    let instruction = build_system_instruction(
        &format_day(&Local::now()),
        &snapshot.users,
        &snapshot.log,
    );

    let mut chat = session.chat.lock().await;
    let reply = chat.ask(session.model.as_ref(), &instruction, text).await;

    Ok(Json(reply))
}

#[utoipa::path(
    post,
    path = "/assistant/actions",
    request_body = ActionRequest,
    description = "Carry out an action proposed by the assistant",
    responses(
        (status = 200, description = "Success", body = ActionOutcome),
        (status = 400, description = "Bad Request"),
    )
)]
#[axum::debug_handler]
pub async fn execute_action(
    State(server_state): State<Arc<ServerState>>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionOutcome>, ErrorServer> {
    log::info!("Executing assistant action: {}", describe_action(&request.action));

    let outcome = match request.action {
        AiAction::Navigate(target) => ActionOutcome::Navigate {
            target,
            screen: target.screen().to_string(),
        },
        AiAction::ScheduleReport(schedule_request) => {
            let schedule = server_state
                .deliveries()
                .register(
                    server_state.scheduler(),
                    server_state.dashboard().clone(),
                    server_state.outbox_dir(),
                    schedule_request,
                )
                .await?;

            ActionOutcome::ReportScheduled { schedule }
        }
    };

    Ok(Json(outcome))
}
