use chrono::NaiveDateTime;

// DTOs for joined queries

/// A duel joined with its judge's gender, so ranking views can filter by
/// judge attributes without extra lookups.
#[derive(Debug, Clone)]
pub struct DuelWithJudge {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub judge_id: Option<i64>,
    pub judge_gender: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// A card joined with its prompt text, for listing endpoints.
#[derive(Debug, Clone)]
pub struct CardWithPrompt {
    pub id: i64,
    pub profile_id: i64,
    pub uploader_id: Option<i64>,
    pub uploader_name: Option<String>,
    pub prompt_id: Option<i64>,
    pub prompt_text: Option<String>,
    pub answer: Option<String>,
    pub image_path: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
