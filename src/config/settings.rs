#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub initial_rating: f64,
    pub k_factor: f64,
    pub min_judge_weight: f64,
    pub max_judge_weight: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1200.0,
            k_factor: 32.0,
            // Clamp bounds on the vote-volume weight; they keep a judge with
            // very few votes from causing extreme single-duel swings.
            min_judge_weight: 0.5,
            max_judge_weight: 2.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
        }
    }
}

// Passed explicitly (Dependency Injection) rather than as a global.
