use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{CardItem, CreateCardRequest, PromptResponse};
use crate::database;

pub async fn list_cards(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::cards::list_with_prompts(&mut conn, profile_id) {
        Ok(rows) => Json(rows.into_iter().map(CardItem::from).collect::<Vec<_>>()).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

/// Card submission. Image cards need an image path; prompt cards need a
/// text answer or an image, but not both.
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Json(request): Json<CreateCardRequest>,
) -> impl IntoResponse {
    let answer = request.answer.as_deref().filter(|a| !a.trim().is_empty());
    let image_path = request.image_path.as_deref().filter(|p| !p.trim().is_empty());

    if let Err(msg) = validate_card(request.prompt_id, answer, image_path) {
        return (StatusCode::BAD_REQUEST, msg).into_response();
    }

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::profiles::find_by_id(&mut conn, profile_id) {
        Ok(Some(_)) => {}
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response()
        }
    }

    if let Some(prompt_id) = request.prompt_id {
        match database::prompts::find_by_id(&mut conn, prompt_id) {
            Ok(Some(_)) => {}
            Ok(None) => return (StatusCode::BAD_REQUEST, "Unknown prompt").into_response(),
            Err(e) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                    .into_response()
            }
        }
    }

    match database::cards::insert_card(
        &mut conn,
        profile_id,
        request.uploader_id,
        request.prompt_id,
        answer,
        image_path,
    ) {
        Ok(card) => (StatusCode::CREATED, Json(crate::api::models::CardSummary::from(card)))
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

fn validate_card(
    prompt_id: Option<i64>,
    answer: Option<&str>,
    image_path: Option<&str>,
) -> Result<(), &'static str> {
    match prompt_id {
        None => {
            if image_path.is_none() {
                return Err("Image cards require an image");
            }
            if answer.is_some() {
                return Err("Image cards cannot carry a text answer");
            }
        }
        Some(_) => match (answer, image_path) {
            (None, None) => return Err("Provide a text answer or an image"),
            (Some(_), Some(_)) => return Err("Provide a text answer OR an image, not both"),
            _ => {}
        },
    }
    Ok(())
}

pub async fn list_prompts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::prompts::list_all(&mut conn) {
        Ok(prompts) => {
            Json(prompts.into_iter().map(PromptResponse::from).collect::<Vec<_>>()).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
