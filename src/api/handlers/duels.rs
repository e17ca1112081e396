use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::api::models::{CardSummary, CreateDuelRequest, DuelPairResponse, DuelResponse};
use crate::database;
use crate::domain::CardKind;

#[derive(Deserialize)]
pub struct DuelPairParams {
    pub kind: String,
}

/// Serves two random cards to judge. Prompt pairs share one prompt, and the
/// prompt text rides along so the voting screen can show the question.
pub async fn get_duel_pair(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Query(params): Query<DuelPairParams>,
) -> impl IntoResponse {
    let Some(kind) = CardKind::parse(&params.kind) else {
        return (StatusCode::BAD_REQUEST, "Kind must be 'image' or 'prompt'").into_response();
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let pair = match database::cards::random_pair(&mut conn, profile_id, kind) {
        Ok(pair) => pair,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    };

    let Some((first, second)) = pair else {
        return (StatusCode::NOT_FOUND, "Not enough cards to rank").into_response();
    };

    let prompt_text = match first.prompt_id {
        Some(prompt_id) => match database::prompts::find_by_id(&mut conn, prompt_id) {
            Ok(prompt) => prompt.map(|p| p.text),
            Err(_) => None,
        },
        None => None,
    };

    Json(DuelPairResponse {
        first: CardSummary::from(first),
        second: CardSummary::from(second),
        prompt_text,
    })
    .into_response()
}

pub async fn create_duel(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Json(request): Json<CreateDuelRequest>,
) -> impl IntoResponse {
    if request.winner_id == request.loser_id {
        return (StatusCode::BAD_REQUEST, "A card cannot duel itself").into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    // Both cards must exist and belong to the profile being judged.
    for card_id in [request.winner_id, request.loser_id] {
        match database::cards::find_by_id(&mut conn, card_id) {
            Ok(Some(card)) if card.profile_id == profile_id => {}
            Ok(_) => {
                return (StatusCode::BAD_REQUEST, "Card does not belong to this profile")
                    .into_response()
            }
            Err(e) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                    .into_response()
            }
        }
    }

    if let Some(judge_id) = request.judge_id {
        match database::participants::find_by_id(&mut conn, judge_id) {
            Ok(Some(judge)) if judge.profile_id == profile_id => {}
            Ok(_) => {
                return (StatusCode::BAD_REQUEST, "Judge does not belong to this profile")
                    .into_response()
            }
            Err(e) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                    .into_response()
            }
        }
    }

    match database::duels::insert_duel(&mut conn, request.winner_id, request.loser_id, request.judge_id)
    {
        Ok(duel) => (
            StatusCode::CREATED,
            Json(DuelResponse {
                duel_id: duel.id,
                winner_id: duel.winner_id,
                loser_id: duel.loser_id,
                judge_id: duel.judge_id,
            }),
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
