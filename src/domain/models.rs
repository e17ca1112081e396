use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A party/event. The password is the whole login scheme: everyone at the
/// party shares it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub password: String,
    pub results_available: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// A named attendee of a profile. Gender is only ever used as a judge
/// filter for ranking views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub profile_id: i64,
    pub name: String,
    pub gender: Gender,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    M,
    F,
    O,
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
            Gender::O => "O",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "M" => Some(Gender::M),
            "F" => Some(Gender::F),
            "O" => Some(Gender::O),
            _ => None,
        }
    }
}

/// A text question that prompt cards answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: i64,
    pub text: String,
    pub created_at: Option<NaiveDateTime>,
}

/// A submitted card. Image cards have no prompt; prompt cards carry a text
/// answer, an image, or both. The image path is opaque to this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub profile_id: i64,
    pub uploader_id: Option<i64>,
    pub prompt_id: Option<i64>,
    pub answer: Option<String>,
    pub image_path: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Image,
    Prompt,
}

impl CardKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(CardKind::Image),
            "prompt" => Some(CardKind::Prompt),
            _ => None,
        }
    }
}

/// One judged duel between two cards of the same profile. The judge may be
/// unknown (anonymous voting stations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duel {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub judge_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
}
