use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    cards::{create_card, list_cards, list_prompts},
    duels::{create_duel, get_duel_pair},
    profiles::{get_profile, list_participants, login, register_participant, set_results_availability},
    rankings::{get_history, get_rankings},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/prompts", get(list_prompts))
        .route("/api/profile/:id", get(get_profile))
        .route("/api/profile/:id/results", post(set_results_availability))
        .route("/api/profile/:id/participants", get(list_participants).post(register_participant))
        .route("/api/profile/:id/cards", get(list_cards).post(create_card))
        .route("/api/profile/:id/duel-pair", get(get_duel_pair))
        .route("/api/profile/:id/duels", post(create_duel))
        .route("/api/profile/:id/rankings", get(get_rankings))
        .route("/api/profile/:id/history", get(get_history))
        .with_state(state)
}
