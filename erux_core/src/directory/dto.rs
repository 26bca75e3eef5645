use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::schedule::SchedulePolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserLevel {
    Administrador,
    #[default]
    Usuario,
    Visitante,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub name: String,
    pub dni: String,
    pub user_level: UserLevel,
    pub uid: String,
    #[schema(value_type = String)]
    pub schedule: SchedulePolicy,
    pub avatar: String,
}

/// Fields an operator fills in when registering or editing a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserForm {
    pub name: String,
    pub dni: String,
    pub user_level: UserLevel,
    pub uid: String,
    #[schema(value_type = String)]
    pub schedule: SchedulePolicy,
}
