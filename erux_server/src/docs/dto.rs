use crate::{access, assistant, emergencies, error::ErrorServer, info, reports, users};
use erux_core::{
    access::{AccessEvent, AccessStatus, EmergencyEvent},
    assistant::dto::{ChatMessage, NavigationTarget, Sender},
    directory::dto::{RegisteredUser, UserForm, UserLevel},
    reports::{
        ReportFormat, ReportSchedule, ScheduleRequest,
        dto::{AccessReport, Analytics, HourlyBucket, LogTab, ReportSummary},
    },
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        info::handler::info,
        access::handler::access_log,
        access::handler::detection,
        users::handler::list_users,
        users::handler::create_user,
        users::handler::update_user,
        users::handler::delete_user,
        emergencies::handler::declare_emergency,
        emergencies::handler::list_emergencies,
        reports::handler::get_analytics,
        reports::handler::get_log,
        reports::handler::download_report,
        reports::handler::list_schedules,
        reports::handler::create_schedule,
        reports::handler::delete_schedule,
        assistant::handler::open_session,
        assistant::handler::close_session,
        assistant::handler::get_messages,
        assistant::handler::send_message,
        assistant::handler::execute_action,
    ),
    components(schemas(
        info::dto::Info,
        access::dto::Detection,
        AccessEvent,
        AccessStatus,
        EmergencyEvent,
        RegisteredUser,
        UserForm,
        UserLevel,
        Analytics,
        HourlyBucket,
        LogTab,
        ReportSummary,
        AccessReport,
        ReportFormat,
        ReportSchedule,
        ScheduleRequest,
        ChatMessage,
        Sender,
        NavigationTarget,
        assistant::dto::OpenSessionRequest,
        assistant::dto::SessionView,
        assistant::dto::SendMessageRequest,
        assistant::dto::ActionRequest,
        assistant::dto::ActionOutcome,
        ErrorServer,
    ))
)]
pub struct ApiDoc;
