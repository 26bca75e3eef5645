use erux_core::reports::dto::LogTab;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    /// `all`, `late` or `emergency`. Defaults to `all`.
    pub tab: Option<LogTab>,
}
