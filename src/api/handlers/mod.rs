use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;

use crate::config::settings::AppConfig;

pub mod cards;
pub mod duels;
pub mod profiles;
pub mod rankings;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}

/// Query parameters shared by the ranking and history endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingParams {
    pub kind: Option<String>,
    pub judge_gender: Option<String>,
    /// Bypasses the results_available gate; used by the host screen.
    pub force: Option<bool>,
}
