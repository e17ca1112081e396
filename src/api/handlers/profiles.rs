use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{
    CreateParticipantRequest, LoginRequest, ParticipantResponse, ProfileResponse,
    ResultsAvailabilityRequest,
};
use crate::database;
use crate::domain::Gender;

/// Shared-password login: the password is the only credential and maps to
/// exactly one profile.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::profiles::find_by_password(&mut conn, &request.password) {
        Ok(Some(profile)) => Json(ProfileResponse {
            profile_id: profile.id,
            name: profile.name,
            results_available: profile.results_available,
        })
        .into_response(),
        Ok(None) => (StatusCode::UNAUTHORIZED, "Invalid password").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::profiles::find_by_id(&mut conn, profile_id) {
        Ok(Some(profile)) => Json(ProfileResponse {
            profile_id: profile.id,
            name: profile.name,
            results_available: profile.results_available,
        })
        .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn set_results_availability(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Json(request): Json<ResultsAvailabilityRequest>,
) -> impl IntoResponse {
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

    match database::profiles::set_results_available(&mut conn, profile_id, request.available) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Json(request): Json<CreateParticipantRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Participant name is required").into_response();
    }

    let gender = match request.gender.as_deref() {
        None => Gender::O,
        Some(value) => match Gender::parse(value) {
            Some(g) => g,
            None => return (StatusCode::BAD_REQUEST, "Gender must be M, F or O").into_response(),
        },
    };

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

    match database::participants::upsert_participant(
        &mut conn,
        profile_id,
        request.name.trim(),
        gender,
    ) {
        Ok(participant) => Json(ParticipantResponse::from(participant)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
) -> impl IntoResponse {
    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::participants::list_by_profile(&mut conn, profile_id) {
        Ok(participants) => Json(
            participants
                .into_iter()
                .map(ParticipantResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
