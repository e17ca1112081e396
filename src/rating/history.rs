use std::collections::HashMap;

use super::elo::apply_comparison;
use super::types::{CardId, Comparison, HistoryPoint, RatingValue};
use super::weighting::JudgeStats;
use crate::config::settings::RatingSettings;

/// Replays the duel stream and records each card's rating after every duel
/// it took part in, for charting rating evolution.
///
/// Same update rule and skip semantics as `calculate_ratings`; the two must
/// stay numerically identical, which is why both go through
/// `apply_comparison`. Steps count processed duels only, densely from 1.
/// Cards with no processed duels get an empty series; callers wanting a
/// start-of-series anchor prepend `{step: 0, rating: initial_rating}`
/// themselves.
pub fn project_history(
    card_ids: &[CardId],
    comparisons: &[Comparison],
    settings: &RatingSettings,
) -> HashMap<CardId, Vec<HistoryPoint>> {
    let mut ratings: HashMap<CardId, RatingValue> = card_ids
        .iter()
        .map(|&id| (id, settings.initial_rating))
        .collect();
    let mut history: HashMap<CardId, Vec<HistoryPoint>> =
        card_ids.iter().map(|&id| (id, Vec::new())).collect();

    let stats = JudgeStats::from_comparisons(comparisons);

    let mut step = 0;
    for comparison in comparisons {
        if !ratings.contains_key(&comparison.winner_id)
            || !ratings.contains_key(&comparison.loser_id)
        {
            continue;
        }
        step += 1;

        let effective_k = stats.effective_k(comparison.judge_id, settings);
        let winner_rating = ratings[&comparison.winner_id];
        let loser_rating = ratings[&comparison.loser_id];

        let (winner_new, loser_new) = apply_comparison(winner_rating, loser_rating, effective_k);

        ratings.insert(comparison.winner_id, winner_new);
        ratings.insert(comparison.loser_id, loser_new);

        if let Some(series) = history.get_mut(&comparison.winner_id) {
            series.push(HistoryPoint {
                step,
                rating: winner_new,
            });
        }
        if let Some(series) = history.get_mut(&comparison.loser_id) {
            series.push(HistoryPoint {
                step,
                rating: loser_new,
            });
        }
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::calculate_ratings;

    fn comparison(winner: i64, loser: i64, judge: Option<i64>) -> Comparison {
        Comparison {
            winner_id: winner,
            loser_id: loser,
            judge_id: judge,
        }
    }

    #[test]
    fn idle_cards_have_empty_series() {
        let settings = RatingSettings::default();
        let history = project_history(&[1, 2, 3], &[comparison(1, 2, None)], &settings);

        assert!(history[&3].is_empty());
        assert_eq!(history[&1].len(), 1);
        assert_eq!(history[&2].len(), 1);
    }

    #[test]
    fn first_duel_records_expected_ratings() {
        let settings = RatingSettings::default();
        let history = project_history(&[1, 2], &[comparison(1, 2, None)], &settings);

        assert_eq!(
            history[&1],
            vec![HistoryPoint {
                step: 1,
                rating: 1216.0
            }]
        );
        assert_eq!(
            history[&2],
            vec![HistoryPoint {
                step: 1,
                rating: 1184.0
            }]
        );
    }

    #[test]
    fn steps_skip_over_unknown_card_duels() {
        let settings = RatingSettings::default();
        let history = project_history(
            &[1, 2],
            &[
                comparison(1, 2, None),
                comparison(1, 99, None),
                comparison(2, 1, None),
            ],
            &settings,
        );

        // The middle duel is skipped; steps stay dense.
        let steps: Vec<usize> = history[&1].iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![1, 2]);
    }

    #[test]
    fn steps_are_strictly_increasing_per_card() {
        let settings = RatingSettings::default();
        let comparisons = vec![
            comparison(1, 2, Some(1)),
            comparison(2, 3, Some(1)),
            comparison(3, 1, Some(2)),
            comparison(1, 2, None),
        ];
        let history = project_history(&[1, 2, 3], &comparisons, &settings);

        for series in history.values() {
            for pair in series.windows(2) {
                assert!(pair[0].step < pair[1].step);
            }
        }
    }

    #[test]
    fn last_point_matches_calculator_result() {
        let settings = RatingSettings::default();
        let comparisons = vec![
            comparison(1, 2, Some(1)),
            comparison(2, 3, Some(2)),
            comparison(3, 1, Some(2)),
            comparison(1, 3, Some(3)),
            comparison(2, 1, None),
        ];
        let card_ids = [1, 2, 3];

        let final_ratings = calculate_ratings(&card_ids, &comparisons, &settings);
        let history = project_history(&card_ids, &comparisons, &settings);

        for id in card_ids {
            let last = history[&id].last().expect("card appears in duels");
            assert!((last.rating - final_ratings[&id].rating).abs() < 1e-9);
        }
    }
}
