use std::collections::HashMap;

use log::debug;

use super::types::{CardId, CardRating, Comparison, RatingValue};
use super::weighting::JudgeStats;
use crate::config::settings::RatingSettings;

/// Calculates Elo ratings for a set of cards from an ordered duel stream.
///
/// Every supplied card gets an entry, starting at the configured initial
/// rating with zero wins and losses. Duels referencing a card outside the
/// supplied set are skipped entirely, which lets callers compute rankings
/// over a filtered card subset against the full duel history.
///
/// The caller's ordering is authoritative; nothing is sorted here.
pub fn calculate_ratings(
    card_ids: &[CardId],
    comparisons: &[Comparison],
    settings: &RatingSettings,
) -> HashMap<CardId, CardRating> {
    debug!(
        "Calculating ratings for {} cards over {} duels",
        card_ids.len(),
        comparisons.len()
    );

    let mut ratings = initial_ratings(card_ids, settings);

    // Vote-volume stats come from the unfiltered stream, before skipping.
    let stats = JudgeStats::from_comparisons(comparisons);

    for comparison in comparisons {
        if !ratings.contains_key(&comparison.winner_id)
            || !ratings.contains_key(&comparison.loser_id)
        {
            continue;
        }

        let effective_k = stats.effective_k(comparison.judge_id, settings);
        let winner_rating = ratings[&comparison.winner_id].rating;
        let loser_rating = ratings[&comparison.loser_id].rating;

        let (winner_new, loser_new) = apply_comparison(winner_rating, loser_rating, effective_k);

        if let Some(winner) = ratings.get_mut(&comparison.winner_id) {
            winner.wins += 1;
            winner.rating = winner_new;
        }
        if let Some(loser) = ratings.get_mut(&comparison.loser_id) {
            loser.losses += 1;
            loser.rating = loser_new;
        }
    }

    ratings
}

fn initial_ratings(card_ids: &[CardId], settings: &RatingSettings) -> HashMap<CardId, CardRating> {
    card_ids
        .iter()
        .map(|&id| {
            (
                id,
                CardRating {
                    rating: settings.initial_rating,
                    wins: 0,
                    losses: 0,
                },
            )
        })
        .collect()
}

/// One Elo exchange. Both new ratings derive from the pre-update pair, so
/// the exchange is simultaneous rather than sequential.
pub(super) fn apply_comparison(
    winner_rating: RatingValue,
    loser_rating: RatingValue,
    effective_k: f64,
) -> (RatingValue, RatingValue) {
    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = expected_score(loser_rating, winner_rating);

    (
        winner_rating + effective_k * (1.0 - expected_winner),
        loser_rating + effective_k * (0.0 - expected_loser),
    )
}

/// Logistic expected score: probability that `own` beats `opponent`.
fn expected_score(own: RatingValue, opponent: RatingValue) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - own) / 400.0))
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
    fn empty_duel_list_yields_initial_state() {
        let settings = RatingSettings::default();
        let ratings = calculate_ratings(&[1, 2, 3], &[], &settings);

        assert_eq!(ratings.len(), 3);
        for id in [1, 2, 3] {
            let r = &ratings[&id];
            assert_eq!(r.rating, settings.initial_rating);
            assert_eq!(r.wins, 0);
            assert_eq!(r.losses, 0);
        }
    }

    #[test]
    fn single_even_duel_matches_hand_computation() {
        let settings = RatingSettings::default();
        let ratings = calculate_ratings(&[1, 2], &[comparison(1, 2, None)], &settings);

        // Equal ratings: expected = 0.5, so winner gains k/2 = 16.
        assert_eq!(ratings[&1].rating, 1216.0);
        assert_eq!(ratings[&2].rating, 1184.0);
        assert_eq!(ratings[&1].wins, 1);
        assert_eq!(ratings[&1].losses, 0);
        assert_eq!(ratings[&2].wins, 0);
        assert_eq!(ratings[&2].losses, 1);
    }

    #[test]
    fn duel_outside_card_set_is_a_noop() {
        let settings = RatingSettings::default();
        let ratings = calculate_ratings(
            &[1, 2],
            &[
                comparison(1, 99, None),
                comparison(99, 2, None),
                comparison(98, 99, None),
            ],
            &settings,
        );

        for id in [1, 2] {
            assert_eq!(ratings[&id].rating, settings.initial_rating);
            assert_eq!(ratings[&id].wins, 0);
            assert_eq!(ratings[&id].losses, 0);
        }
    }

    #[test]
    fn unweighted_exchange_is_zero_sum() {
        let settings = RatingSettings::default();
        let ratings = calculate_ratings(
            &[1, 2],
            &[
                comparison(1, 2, None),
                comparison(1, 2, None),
                comparison(2, 1, None),
            ],
            &settings,
        );

        let total = ratings[&1].rating + ratings[&2].rating;
        assert!((total - 2.0 * settings.initial_rating).abs() < 1e-9);
    }

    #[test]
    fn swapped_roles_mirror_the_deltas() {
        let k = 32.0;
        let (fav_new, under_new) = apply_comparison(1300.0, 1100.0, k);
        let (under_new2, fav_new2) = apply_comparison(1100.0, 1300.0, k);

        // Each exchange is zero-sum.
        assert!(((fav_new - 1300.0) + (under_new - 1100.0)).abs() < 1e-9);
        assert!(((under_new2 - 1100.0) + (fav_new2 - 1300.0)).abs() < 1e-9);

        // Expected scores sum to one, so the two orientations split k
        // between them: favorite's win gain plus underdog's win gain == k.
        let fav_gain = fav_new - 1300.0;
        let under_gain = under_new2 - 1100.0;
        assert!((fav_gain + under_gain - k).abs() < 1e-9);
    }

    #[test]
    fn update_uses_pre_update_ratings_for_both_sides() {
        let (w, l) = apply_comparison(1200.0, 1200.0, 32.0);
        // Sequential application would give the loser a different expected
        // score; simultaneous application keeps the exchange symmetric.
        assert_eq!(w, 1216.0);
        assert_eq!(l, 1184.0);
    }

    #[test]
    fn favorite_gains_less_than_underdog_would() {
        let k = 32.0;
        let (favorite_new, _) = apply_comparison(1400.0, 1000.0, k);
        let (underdog_new, _) = apply_comparison(1000.0, 1400.0, k);

        let favorite_gain = favorite_new - 1400.0;
        let underdog_gain = underdog_new - 1000.0;
        assert!(favorite_gain < underdog_gain);
        assert!(favorite_gain > 0.0);
    }

    #[test]
    fn prolific_judge_moves_ratings_less() {
        let settings = RatingSettings::default();

        // J2 votes nine times on unrelated cards to inflate their volume;
        // J1's single vote keeps the average below J2's count.
        let mut filler = vec![comparison(3, 4, Some(1))];
        filler.extend(std::iter::repeat_with(|| comparison(3, 4, Some(2))).take(9));
        filler.push(comparison(1, 2, Some(2)));

        let weighted = calculate_ratings(&[1, 2], &filler, &settings);
        let unweighted = calculate_ratings(&[1, 2], &[comparison(1, 2, None)], &settings);

        let weighted_gain = weighted[&1].rating - settings.initial_rating;
        let unweighted_gain = unweighted[&1].rating - settings.initial_rating;
        assert!(weighted_gain < unweighted_gain);
    }

    #[test]
    fn judge_counts_include_skipped_duels() {
        let settings = RatingSettings::default();

        // Two judges: J1 once, J2 three times, but two of J2's duels touch
        // cards outside the set. The pre-scan still counts them, so J2's
        // weight is avg/votes = 2/3 rather than 1.
        let comparisons = vec![
            comparison(1, 2, Some(1)),
            comparison(98, 99, Some(2)),
            comparison(98, 99, Some(2)),
            comparison(2, 1, Some(2)),
        ];
        let stats = JudgeStats::from_comparisons(&comparisons);
        assert_eq!(stats.votes_for(2), 3);
        assert_eq!(stats.avg_votes(), 2.0);
        assert!((stats.effective_k(Some(2), &settings) - 32.0 * (2.0 / 3.0)).abs() < 1e-12);

        // And the full run only counts the two processed duels.
        let ratings = calculate_ratings(&[1, 2], &comparisons, &settings);
        assert_eq!(ratings[&1].wins + ratings[&1].losses, 2);
    }
}
