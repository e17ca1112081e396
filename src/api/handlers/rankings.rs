use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, RankingParams};
use crate::api::models::{
    CardSummary, HistoryResponse, HistorySeries, RankingEntry, RankingResponse,
};
use crate::database;
use crate::domain::{CardKind, Gender};
use crate::services::ranking::{RankingFilter, RankingService};

fn parse_filter(params: &RankingParams) -> Result<RankingFilter, &'static str> {
    let kind = match params.kind.as_deref() {
        None => None,
        Some(value) => Some(CardKind::parse(value).ok_or("Kind must be 'image' or 'prompt'")?),
    };

    let judge_gender = match params.judge_gender.as_deref() {
        None => None,
        Some(value) => Some(Gender::parse(value).ok_or("Judge gender must be M, F or O")?),
    };

    Ok(RankingFilter { kind, judge_gender })
}

/// Looks up the profile and enforces the results_available gate unless the
/// host override flag is set.
fn check_results_access(
    conn: &mut database::DbConn,
    profile_id: i64,
    params: &RankingParams,
) -> Result<(), axum::response::Response> {
    match database::profiles::find_by_id(conn, profile_id) {
        Ok(Some(profile)) => {
            if profile.results_available || params.force.unwrap_or(false) {
                Ok(())
            } else {
                Err((StatusCode::FORBIDDEN, "Results are not available yet").into_response())
            }
        }
        Ok(None) => Err(StatusCode::NOT_FOUND.into_response()),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
            .into_response()),
    }
}

pub async fn get_rankings(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Query(params): Query<RankingParams>,
) -> impl IntoResponse {
    let filter = match parse_filter(&params) {
        Ok(filter) => filter,
        Err(msg) => return (StatusCode::BAD_REQUEST, msg).into_response(),
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    if let Err(response) = check_results_access(&mut conn, profile_id, &params) {
        return response;
    }

    let service = RankingService::new(state.config.clone());
    let ranked = match service.rankings(&mut conn, profile_id, &filter) {
        Ok(ranked) => ranked,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Ranking Error: {}", e))
                .into_response()
        }
    };

    let duel_count = database::duels::count_by_profile(&mut conn, profile_id).unwrap_or(0);

    let items: Vec<RankingEntry> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankingEntry {
            rank: i + 1,
            card: CardSummary::from(row.card),
            rating: row.rating.rating,
            wins: row.rating.wins,
            losses: row.rating.losses,
        })
        .collect();

    Json(RankingResponse { items, duel_count }).into_response()
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Query(params): Query<RankingParams>,
) -> impl IntoResponse {
    let filter = match parse_filter(&params) {
        Ok(filter) => filter,
        Err(msg) => return (StatusCode::BAD_REQUEST, msg).into_response(),
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    if let Err(response) = check_results_access(&mut conn, profile_id, &params) {
        return response;
    }

    let service = RankingService::new(state.config.clone());
    match service.history(&mut conn, profile_id, &filter) {
        Ok(series) => Json(HistoryResponse {
            series: series
                .into_iter()
                .map(|s| HistorySeries {
                    card_id: s.card_id,
                    points: s.points,
                })
                .collect(),
        })
        .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Ranking Error: {}", e))
            .into_response(),
    }
}
