use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    access::handler::{access_log, detection},
    assistant::handler::{
        close_session, execute_action, get_messages, open_session, send_message,
    },
    docs::{dto::ApiDoc, handler::api_docs},
    emergencies::handler::{declare_emergency, list_emergencies},
    info::handler::info,
    reports::handler::{
        create_schedule, delete_schedule, download_report, get_analytics, get_log, list_schedules,
    },
    state::ServerState,
    users::handler::{create_user, delete_user, list_users, update_user},
};

pub fn router(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    let reports_router = Router::new()
        .route("/reports/analytics", get(get_analytics))
        .route("/reports/log", get(get_log))
        .route("/reports/download", get(download_report))
        .route("/reports/schedules", get(list_schedules).post(create_schedule))
        .route("/reports/schedules/{id}", delete(delete_schedule));

    let assistant_router = Router::new()
        .route("/assistant/sessions", post(open_session))
        .route("/assistant/sessions/{id}", delete(close_session))
        .route(
            "/assistant/sessions/{id}/messages",
            get(get_messages).post(send_message),
        )
        .route("/assistant/actions", post(execute_action));

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .merge(reports_router)
        .merge(assistant_router)
        .route("/", get(info))
        .route("/docs", get(api_docs))
        .route("/access-log", get(access_log))
        .route("/detection", get(detection))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route("/emergencies", get(list_emergencies).post(declare_emergency))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use erux_core::{
        assistant::{
            AssistantError, LanguageModel, ProviderSettings,
            dto::Turn,
            provider::ReplyStream,
            session::{GENERIC_FAILURE, NOT_INITIALIZED},
        },
        directory::UserDirectory,
        feed::MockEventGenerator,
    };
    use futures::{StreamExt, stream};
    use serde_json::{Value, json};
    use tokio_cron_scheduler::JobScheduler;
    use tower::ServiceExt;

    use crate::state::Dashboard;

    struct FixedReply(Option<&'static str>);

    #[async_trait]
    impl LanguageModel for FixedReply {
        async fn stream_reply(
            &self,
            _system_instruction: &str,
            _history: &[Turn],
        ) -> Result<ReplyStream, AssistantError> {
            match self.0 {
                Some(text) => {
                    Ok(stream::iter(vec![Ok::<_, AssistantError>(text.to_string())]).boxed())
                }
                None => Err(AssistantError::EmptyReply),
            }
        }
    }

    async fn test_state(outbox: &std::path::Path) -> Arc<ServerState> {
        let scheduler = JobScheduler::new().await.unwrap();
        let dashboard = Arc::new(Dashboard::new(
            UserDirectory::with_default_roster(),
            MockEventGenerator::seeded(99),
        ));

        Arc::new(ServerState::from((
            dashboard,
            scheduler,
            ProviderSettings::default(),
            outbox.to_path_buf(),
        )))
    }

    async fn call(
        state: &Arc<ServerState>,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[tokio::test]
    async fn test_info_and_docs() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;

        let (status, body) = call(&state, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "erux_server");

        let (status, body) = call(&state, "GET", "/docs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/reports/schedules"].is_object());
    }

    #[tokio::test]
    async fn test_user_crud() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;

        let (status, created) = call(
            &state,
            "POST",
            "/users",
            Some(json!({"name": "Marta Diaz", "dni": "99887766E", "uid": "E5F6G7H8"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["userLevel"], "Usuario");
        assert_eq!(created["schedule"], "Diurno (8:00-18:00)");
        assert_eq!(created["avatar"], "https://i.pravatar.cc/40?u=MartaDiaz");

        let (_, users) = call(&state, "GET", "/users", None).await;
        assert_eq!(users.as_array().unwrap().len(), 5);
        assert_eq!(users[0]["name"], "Marta Diaz");

        let id = created["id"].as_str().unwrap();
        let (status, updated) = call(
            &state,
            "PUT",
            &format!("/users/{}", id),
            Some(json!({"name": "Marta Díaz", "schedule": "Nocturno (22:00-06:00)"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id);
        assert_eq!(updated["schedule"], "Nocturno (22:00-06:00)");

        let (status, error) = call(
            &state,
            "PUT",
            &format!("/users/{}", id),
            Some(json!({"name": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["status"], 400);

        let (status, _) = call(&state, "DELETE", &format!("/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, error) = call(&state, "DELETE", &format!("/users/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(error["message"].as_str().unwrap().contains(id));
    }

    #[tokio::test]
    async fn test_feed_and_reports() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;
        for _ in 0..3 {
            state.dashboard().record_mock_event().await;
        }

        let (_, log) = call(&state, "GET", "/access-log", None).await;
        assert_eq!(log.as_array().unwrap().len(), 3);

        let (_, detection) = call(&state, "GET", "/detection", None).await;
        assert_eq!(detection["name"], log[0]["name"]);
        assert_eq!(detection["idle"], false);

        let (_, analytics) = call(&state, "GET", "/reports/analytics", None).await;
        assert_eq!(analytics["hourly"].as_array().unwrap().len(), 24);
        let granted = analytics["granted"].as_u64().unwrap();
        let denied = analytics["denied"].as_u64().unwrap();
        assert_eq!(granted + denied, 3);

        let (status, _) = call(&state, "POST", "/emergencies", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, all) = call(&state, "GET", "/reports/log", None).await;
        assert_eq!(all.as_array().unwrap().len(), 3);
        let (_, emergencies) = call(&state, "GET", "/reports/log?tab=emergency", None).await;
        assert_eq!(emergencies.as_array().unwrap().len(), 1);
        assert!(emergencies[0]["videoUrl"].is_string());
        let (_, late) = call(&state, "GET", "/reports/log?tab=late", None).await;
        assert!(late.as_array().unwrap().len() <= 3);
        let (status, _) = call(&state, "GET", "/reports/log?tab=cameras", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_report_is_an_attachment() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;
        state.dashboard().record_mock_event().await;

        let request = Request::builder()
            .uri("/reports/download")
            .body(Body::empty())
            .unwrap();
        let response = router(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"reporte_acceso_"));
        assert!(disposition.ends_with(".json\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let report: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report["summary"]["totalAccesses"], 1);
    }

    #[tokio::test]
    async fn test_report_schedules() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;

        let (status, schedule) = call(
            &state,
            "POST",
            "/reports/schedules",
            Some(json!({"email": "gerencia@miempresa.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(schedule["time"], "08:00");
        assert_eq!(schedule["format"], "pdf");
        assert_eq!(schedule["recipients"], json!(["gerencia@miempresa.com"]));

        let (status, team) = call(
            &state,
            "POST",
            "/reports/schedules",
            Some(json!({"email": "admin@empresa.com, seguridad@empresa.com", "format": "csv"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            team["recipients"],
            json!(["admin@empresa.com", "seguridad@empresa.com"])
        );

        let (status, _) = call(
            &state,
            "POST",
            "/reports/schedules",
            Some(json!({"email": "gerencia@miempresa.com", "time": "99:00"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, list) = call(&state, "GET", "/reports/schedules", None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);

        let id = schedule["id"].as_str().unwrap();
        let (status, _) = call(&state, "DELETE", &format!("/reports/schedules/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&state, "DELETE", &format!("/reports/schedules/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assistant_session_lifecycle() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;

        let (status, error) = call(
            &state,
            "POST",
            "/assistant/sessions",
            Some(json!({"apiKey": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], NOT_INITIALIZED);

        let (status, session) = call(
            &state,
            "POST",
            "/assistant/sessions",
            Some(json!({"apiKey": "AIza-test"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["messages"][0]["sender"], "ai");
        assert!(session["messages"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Hola, soy Centinela."));

        let (status, error) = call(
            &state,
            "POST",
            &format!("/assistant/sessions/{}/messages", uuid::Uuid::new_v4()),
            Some(json!({"text": "hola"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["message"], NOT_INITIALIZED);

        let session_id = session["id"].as_str().unwrap();
        let (status, _) = call(
            &state,
            "DELETE",
            &format!("/assistant/sessions/{}", session_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, error) = call(
            &state,
            "GET",
            &format!("/assistant/sessions/{}/messages", session_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["message"], NOT_INITIALIZED);

        let (status, error) = call(
            &state,
            "DELETE",
            &format!("/assistant/sessions/{}", session_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["message"], NOT_INITIALIZED);
    }

    #[tokio::test]
    async fn test_assistant_reply_with_action() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;

        let reply = "```json\n{\"response\": \"Te llevo a los reportes.\", \"action\": {\"type\": \"navigate\", \"payload\": \"open_reports\"}}\n```";
        let session = state.sessions().open(Arc::new(FixedReply(Some(reply))));

        let (status, message) = call(
            &state,
            "POST",
            &format!("/assistant/sessions/{}/messages", session.id),
            Some(json!({"text": "muéstrame los reportes"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message["text"], "Te llevo a los reportes.");
        assert_eq!(message["action"]["type"], "navigate");
        assert_eq!(message["action"]["payload"], "open_reports");

        let (_, transcript) = call(
            &state,
            "GET",
            &format!("/assistant/sessions/{}/messages", session.id),
            None,
        )
        .await;
        assert_eq!(transcript.as_array().unwrap().len(), 3);

        let (status, outcome) = call(
            &state,
            "POST",
            "/assistant/actions",
            Some(json!({"action": message["action"].clone()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["type"], "navigate");
        assert_eq!(outcome["screen"], "reports");
    }

    #[tokio::test]
    async fn test_assistant_failure_and_schedule_action() {
        let outbox = tempfile::tempdir().unwrap();
        let state = test_state(outbox.path()).await;
        let session = state.sessions().open(Arc::new(FixedReply(None)));

        let (status, message) = call(
            &state,
            "POST",
            &format!("/assistant/sessions/{}/messages", session.id),
            Some(json!({"text": "¿quién llegó tarde?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message["text"], GENERIC_FAILURE);

        let (status, outcome) = call(
            &state,
            "POST",
            "/assistant/actions",
            Some(json!({"action": {
                "type": "schedule_report",
                "payload": {"email": "gerencia@miempresa.com", "time": "08:00", "format": "csv"}
            }})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["type"], "report_scheduled");
        assert_eq!(outcome["schedule"]["format"], "csv");
        assert_eq!(state.deliveries().list().len(), 1);
    }
}
