pub mod elo;
pub mod history;
pub mod types;
pub mod weighting;

pub use elo::calculate_ratings;
pub use history::project_history;
pub use types::{CardId, CardRating, Comparison, HistoryPoint, JudgeId, RatingValue};
pub use weighting::JudgeStats;
