use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Detection {
    /// Detected subject, or the idle placeholder.
    pub name: String,
    pub idle: bool,
}
