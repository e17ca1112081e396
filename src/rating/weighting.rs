use std::collections::HashMap;

use super::types::{Comparison, JudgeId};
use crate::config::settings::RatingSettings;

/// Per-judge vote counts used for vote-volume normalization: judges who vote
/// more get less weight per vote, approximating one-vote-per-judge fairness.
#[derive(Debug, Clone)]
pub struct JudgeStats {
    counts: HashMap<JudgeId, u32>,
    avg_votes: f64,
}

impl JudgeStats {
    /// Counts votes over the full comparison list, before any per-card
    /// skipping. Scanning only processed comparisons would change the
    /// numeric results.
    pub fn from_comparisons(comparisons: &[Comparison]) -> Self {
        let counts = count_judge_votes(comparisons);
        let avg_votes = average_votes(&counts);
        Self { counts, avg_votes }
    }

    pub fn avg_votes(&self) -> f64 {
        self.avg_votes
    }

    pub fn votes_for(&self, judge_id: JudgeId) -> u32 {
        self.counts.get(&judge_id).copied().unwrap_or(0)
    }

    /// Effective K-factor for one comparison. Anonymous comparisons use the
    /// base K unmodified; judged ones scale it by the clamped inverse of the
    /// judge's vote volume.
    pub fn effective_k(&self, judge_id: Option<JudgeId>, settings: &RatingSettings) -> f64 {
        let Some(jid) = judge_id else {
            return settings.k_factor;
        };

        let votes = self
            .counts
            .get(&jid)
            .copied()
            .map(f64::from)
            .unwrap_or(self.avg_votes);

        let weight = if votes > 0.0 { self.avg_votes / votes } else { 1.0 };
        let weight = weight.clamp(settings.min_judge_weight, settings.max_judge_weight);

        settings.k_factor * weight
    }
}

fn count_judge_votes(comparisons: &[Comparison]) -> HashMap<JudgeId, u32> {
    let mut counts = HashMap::new();
    for comparison in comparisons {
        if let Some(jid) = comparison.judge_id {
            *counts.entry(jid).or_insert(0) += 1;
        }
    }
    counts
}

fn average_votes(counts: &HashMap<JudgeId, u32>) -> f64 {
    if counts.is_empty() {
        return 1.0;
    }
    counts.values().map(|&c| f64::from(c)).sum::<f64>() / counts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(winner: i64, loser: i64, judge: Option<i64>) -> Comparison {
        Comparison {
            winner_id: winner,
            loser_id: loser,
            judge_id: judge,
        }
    }

    #[test]
    fn no_judges_defaults_average_to_one() {
        let stats = JudgeStats::from_comparisons(&[comparison(1, 2, None)]);
        assert_eq!(stats.avg_votes(), 1.0);
    }

    #[test]
    fn anonymous_comparison_uses_base_k() {
        let settings = RatingSettings::default();
        let stats = JudgeStats::from_comparisons(&[
            comparison(1, 2, Some(7)),
            comparison(2, 1, Some(7)),
        ]);
        assert_eq!(stats.effective_k(None, &settings), settings.k_factor);
    }

    #[test]
    fn weight_clamps_for_extreme_vote_counts() {
        let settings = RatingSettings::default();

        // J1 and J2 voted once each, J3 eight times: avg = 10/3.
        let mut comparisons = vec![comparison(1, 2, Some(1)), comparison(1, 2, Some(2))];
        comparisons.extend(std::iter::repeat_with(|| comparison(1, 2, Some(3))).take(8));

        let stats = JudgeStats::from_comparisons(&comparisons);
        assert!((stats.avg_votes() - 10.0 / 3.0).abs() < 1e-12);

        // J3's raw weight 0.417 clamps up to 0.5, J1's 3.33 clamps down to 2.5.
        assert_eq!(stats.effective_k(Some(3), &settings), 16.0);
        assert_eq!(stats.effective_k(Some(1), &settings), 80.0);
    }

    #[test]
    fn effective_k_stays_within_clamp_bounds() {
        let settings = RatingSettings::default();
        let mut comparisons = vec![comparison(1, 2, Some(1))];
        comparisons.extend(std::iter::repeat_with(|| comparison(1, 2, Some(2))).take(1000));

        let stats = JudgeStats::from_comparisons(&comparisons);
        for jid in [1, 2] {
            let k = stats.effective_k(Some(jid), &settings);
            assert!(k >= settings.k_factor * settings.min_judge_weight);
            assert!(k <= settings.k_factor * settings.max_judge_weight);
        }
    }

    #[test]
    fn unknown_judge_falls_back_to_average() {
        let settings = RatingSettings::default();
        let stats = JudgeStats::from_comparisons(&[
            comparison(1, 2, Some(1)),
            comparison(1, 2, Some(2)),
        ]);

        // avg/avg = 1.0, so the base K comes back out.
        assert_eq!(stats.effective_k(Some(99), &settings), settings.k_factor);
    }
}
