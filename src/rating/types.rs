use serde::{Deserialize, Serialize};

pub type CardId = i64;
pub type JudgeId = i64;
pub type RatingValue = f64;

/// One judged duel: the winner beat the loser. The judge is optional;
/// anonymous duels always use the unweighted base K-factor.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub winner_id: CardId,
    pub loser_id: CardId,
    pub judge_id: Option<JudgeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRating {
    pub rating: RatingValue,
    pub wins: i32,
    pub losses: i32,
}

/// A point on a card's rating curve: its rating right after one processed
/// duel. Steps are 1-based and count processed duels only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub step: usize,
    pub rating: RatingValue,
}
