use serde::{Deserialize, Serialize};

use crate::database::models::CardWithPrompt;
use crate::domain::{Card, Participant, Prompt};
use crate::rating::HistoryPoint;

// --- Requests ---

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub uploader_id: Option<i64>,
    pub prompt_id: Option<i64>,
    pub answer: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDuelRequest {
    pub winner_id: i64,
    pub loser_id: i64,
    pub judge_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateParticipantRequest {
    pub name: String,
    pub gender: Option<String>,
}

#[derive(Deserialize)]
pub struct ResultsAvailabilityRequest {
    pub available: bool,
}

// --- Responses ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile_id: i64,
    pub name: String,
    pub results_available: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    pub card_id: i64,
    pub uploader_id: Option<i64>,
    pub uploader_name: Option<String>,
    pub prompt_id: Option<i64>,
    pub prompt_text: Option<String>,
    pub answer: Option<String>,
    pub image_path: Option<String>,
}

impl From<CardWithPrompt> for CardItem {
    fn from(row: CardWithPrompt) -> Self {
        Self {
            card_id: row.id,
            uploader_id: row.uploader_id,
            uploader_name: row.uploader_name,
            prompt_id: row.prompt_id,
            prompt_text: row.prompt_text,
            answer: row.answer,
            image_path: row.image_path,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub card_id: i64,
    pub prompt_id: Option<i64>,
    pub answer: Option<String>,
    pub image_path: Option<String>,
}

impl From<Card> for CardSummary {
    fn from(card: Card) -> Self {
        Self {
            card_id: card.id,
            prompt_id: card.prompt_id,
            answer: card.answer,
            image_path: card.image_path,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub rank: usize,
    pub card: CardSummary,
    pub rating: f64,
    pub wins: i32,
    pub losses: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub items: Vec<RankingEntry>,
    pub duel_count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySeries {
    pub card_id: i64,
    pub points: Vec<HistoryPoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub series: Vec<HistorySeries>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelPairResponse {
    pub first: CardSummary,
    pub second: CardSummary,
    pub prompt_text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelResponse {
    pub duel_id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub judge_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub participant_id: i64,
    pub name: String,
    pub gender: String,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            participant_id: p.id,
            name: p.name,
            gender: p.gender.as_str().to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub prompt_id: i64,
    pub text: String,
}

impl From<Prompt> for PromptResponse {
    fn from(p: Prompt) -> Self {
        Self {
            prompt_id: p.id,
            text: p.text,
        }
    }
}
