use anyhow::Result;
use log::debug;

use crate::config::settings::AppConfig;
use crate::database::models::DuelWithJudge;
use crate::database::{self, DbConn};
use crate::domain::{Card, CardKind, Gender};
use crate::rating::{self, CardRating, Comparison, HistoryPoint};

/// Caller-side filters applied to the duel stream and card set before the
/// rating core runs. Restricting the card set exercises the core's
/// skip-unknown-card rule; restricting by judge gender drops duels up front.
#[derive(Debug, Clone, Default)]
pub struct RankingFilter {
    pub kind: Option<CardKind>,
    pub judge_gender: Option<Gender>,
}

#[derive(Debug, Clone)]
pub struct RankedCard {
    pub card: Card,
    pub rating: CardRating,
}

#[derive(Debug, Clone)]
pub struct CardHistory {
    pub card_id: i64,
    pub points: Vec<HistoryPoint>,
}

/// Glue between storage and the pure rating core: loads a profile's cards
/// and chronological duel stream, filters, computes, sorts.
pub struct RankingService {
    config: AppConfig,
}

impl RankingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn rankings(
        &self,
        conn: &mut DbConn,
        profile_id: i64,
        filter: &RankingFilter,
    ) -> Result<Vec<RankedCard>> {
        let (cards, comparisons) = self.load_inputs(conn, profile_id, filter)?;
        let card_ids: Vec<i64> = cards.iter().map(|c| c.id).collect();

        let mut ratings = rating::calculate_ratings(&card_ids, &comparisons, &self.config.rating);

        let mut ranked: Vec<RankedCard> = cards
            .into_iter()
            .map(|card| {
                let rating = ratings.remove(&card.id).unwrap_or(CardRating {
                    rating: self.config.rating.initial_rating,
                    wins: 0,
                    losses: 0,
                });
                RankedCard { card, rating }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.rating
                .rating
                .partial_cmp(&a.rating.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.rating.wins.cmp(&a.rating.wins))
                .then(a.card.id.cmp(&b.card.id))
        });

        Ok(ranked)
    }

    pub fn history(
        &self,
        conn: &mut DbConn,
        profile_id: i64,
        filter: &RankingFilter,
    ) -> Result<Vec<CardHistory>> {
        let (cards, comparisons) = self.load_inputs(conn, profile_id, filter)?;
        let card_ids: Vec<i64> = cards.iter().map(|c| c.id).collect();

        let mut series = rating::project_history(&card_ids, &comparisons, &self.config.rating);

        // The core leaves series unanchored; charts want a start-of-series
        // point at the initial rating.
        let anchor = HistoryPoint {
            step: 0,
            rating: self.config.rating.initial_rating,
        };

        Ok(card_ids
            .iter()
            .map(|&card_id| {
                let mut points = vec![anchor.clone()];
                points.extend(series.remove(&card_id).unwrap_or_default());
                CardHistory { card_id, points }
            })
            .collect())
    }

    fn load_inputs(
        &self,
        conn: &mut DbConn,
        profile_id: i64,
        filter: &RankingFilter,
    ) -> Result<(Vec<Card>, Vec<Comparison>)> {
        let cards = database::cards::list_by_profile(conn, profile_id, filter.kind)?;
        let duels = database::duels::list_by_profile(conn, profile_id)?;
        let comparisons = filter_duels(&duels, filter.judge_gender);

        debug!(
            "Profile {}: {} cards, {} of {} duels after judge filter",
            profile_id,
            cards.len(),
            comparisons.len(),
            duels.len()
        );

        Ok((cards, comparisons))
    }
}

/// Converts the duel rows into rating-core comparisons, keeping only duels
/// whose judge matches the requested gender (anonymous duels are dropped
/// when a gender filter is active, since their judge is unknown).
fn filter_duels(duels: &[DuelWithJudge], judge_gender: Option<Gender>) -> Vec<Comparison> {
    duels
        .iter()
        .filter(|duel| match judge_gender {
            None => true,
            Some(gender) => duel.judge_gender.as_deref() == Some(gender.as_str()),
        })
        .map(|duel| Comparison {
            winner_id: duel.winner_id,
            loser_id: duel.loser_id,
            judge_id: duel.judge_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{cards, connection, duels, participants, profiles, prompts, setup};

    fn seeded_conn() -> DbConn {
        let pool = connection::create_memory_pool().expect("memory pool");
        let mut conn = connection::get_connection(&pool).expect("connection");
        setup::reset_database(&mut conn).expect("schema");
        conn
    }

    fn service() -> RankingService {
        RankingService::new(AppConfig::new())
    }

    #[test]
    fn rankings_cover_cards_without_duels() {
        let mut conn = seeded_conn();
        let party = profiles::insert_profile(&mut conn, "Party", "aaaaaaaa").unwrap();
        let a = cards::insert_card(&mut conn, party.id, None, None, None, Some("a.jpg")).unwrap();
        let b = cards::insert_card(&mut conn, party.id, None, None, None, Some("b.jpg")).unwrap();
        let idle = cards::insert_card(&mut conn, party.id, None, None, None, Some("c.jpg")).unwrap();

        duels::insert_duel(&mut conn, a.id, b.id, None).unwrap();

        let ranked = service()
            .rankings(&mut conn, party.id, &RankingFilter::default())
            .unwrap();

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].card.id, a.id);
        assert_eq!(ranked[0].rating.rating, 1216.0);
        assert_eq!(ranked[2].card.id, b.id);

        let idle_row = ranked.iter().find(|r| r.card.id == idle.id).unwrap();
        assert_eq!(idle_row.rating.rating, 1200.0);
        assert_eq!(idle_row.rating.wins, 0);
    }

    #[test]
    fn judge_gender_filter_drops_other_and_anonymous_duels() {
        let mut conn = seeded_conn();
        let party = profiles::insert_profile(&mut conn, "Party", "bbbbbbbb").unwrap();
        let a = cards::insert_card(&mut conn, party.id, None, None, None, Some("a.jpg")).unwrap();
        let b = cards::insert_card(&mut conn, party.id, None, None, None, Some("b.jpg")).unwrap();

        let alice = participants::upsert_participant(&mut conn, party.id, "Alice", Gender::F).unwrap();
        let bob = participants::upsert_participant(&mut conn, party.id, "Bob", Gender::M).unwrap();

        duels::insert_duel(&mut conn, a.id, b.id, Some(alice.id)).unwrap();
        duels::insert_duel(&mut conn, b.id, a.id, Some(bob.id)).unwrap();
        duels::insert_duel(&mut conn, b.id, a.id, None).unwrap();

        let filter = RankingFilter {
            kind: None,
            judge_gender: Some(Gender::F),
        };
        let ranked = service().rankings(&mut conn, party.id, &filter).unwrap();

        // Only Alice's duel survives: a beats b once.
        let a_row = ranked.iter().find(|r| r.card.id == a.id).unwrap();
        assert_eq!(a_row.rating.wins, 1);
        assert_eq!(a_row.rating.losses, 0);
        let b_row = ranked.iter().find(|r| r.card.id == b.id).unwrap();
        assert_eq!(b_row.rating.losses, 1);
    }

    #[test]
    fn kind_filter_restricts_cards_but_keeps_judge_stats_global() {
        let mut conn = seeded_conn();
        let party = profiles::insert_profile(&mut conn, "Party", "cccccccc").unwrap();
        let prompt = prompts::insert_prompt(&mut conn, "Best excuse?").unwrap();

        let img_a = cards::insert_card(&mut conn, party.id, None, None, None, Some("a.jpg")).unwrap();
        let img_b = cards::insert_card(&mut conn, party.id, None, None, None, Some("b.jpg")).unwrap();
        let txt =
            cards::insert_card(&mut conn, party.id, None, Some(prompt.id), Some("Traffic"), None)
                .unwrap();

        duels::insert_duel(&mut conn, img_a.id, img_b.id, None).unwrap();
        duels::insert_duel(&mut conn, txt.id, img_a.id, None).unwrap();

        let filter = RankingFilter {
            kind: Some(CardKind::Image),
            judge_gender: None,
        };
        let ranked = service().rankings(&mut conn, party.id, &filter).unwrap();

        // The prompt card is outside the set, so its duel is skipped.
        assert_eq!(ranked.len(), 2);
        let a_row = ranked.iter().find(|r| r.card.id == img_a.id).unwrap();
        assert_eq!(a_row.rating.wins, 1);
        assert_eq!(a_row.rating.losses, 0);
    }

    #[test]
    fn history_series_start_at_the_anchor() {
        let mut conn = seeded_conn();
        let party = profiles::insert_profile(&mut conn, "Party", "dddddddd").unwrap();
        let a = cards::insert_card(&mut conn, party.id, None, None, None, Some("a.jpg")).unwrap();
        let b = cards::insert_card(&mut conn, party.id, None, None, None, Some("b.jpg")).unwrap();
        duels::insert_duel(&mut conn, a.id, b.id, None).unwrap();

        let history = service()
            .history(&mut conn, party.id, &RankingFilter::default())
            .unwrap();

        let a_series = history.iter().find(|h| h.card_id == a.id).unwrap();
        assert_eq!(a_series.points[0], HistoryPoint { step: 0, rating: 1200.0 });
        assert_eq!(a_series.points[1], HistoryPoint { step: 1, rating: 1216.0 });
    }
}
