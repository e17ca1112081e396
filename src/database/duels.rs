use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::DuelWithJudge;
use crate::domain::Duel;

pub fn insert_duel(
    conn: &mut DbConn,
    winner_id: i64,
    loser_id: i64,
    judge_id: Option<i64>,
) -> Result<Duel> {
    let sql = "INSERT INTO duels (winner_id, loser_id, judge_id) VALUES (?1, ?2, ?3) RETURNING id, winner_id, loser_id, judge_id, created_at";

    conn.query_row(sql, params![winner_id, loser_id, judge_id], parse_duel_row)
        .context("Failed to insert duel")
}

fn parse_duel_row(row: &rusqlite::Row) -> rusqlite::Result<Duel> {
    Ok(Duel {
        id: row.get(0)?,
        winner_id: row.get(1)?,
        loser_id: row.get(2)?,
        judge_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// A profile's full duel stream in chronological order, with judge gender
/// joined in. The rating core treats this order as authoritative, so the
/// ORDER BY matters; id breaks ties within one timestamp.
pub fn list_by_profile(conn: &mut DbConn, profile_id: i64) -> Result<Vec<DuelWithJudge>> {
    let sql = "
        SELECT d.id, d.winner_id, d.loser_id, d.judge_id, j.gender, d.created_at
        FROM duels d
        JOIN cards w ON d.winner_id = w.id
        LEFT JOIN participants j ON d.judge_id = j.id
        WHERE w.profile_id = ?1
        ORDER BY d.created_at, d.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![profile_id], |row| {
            Ok(DuelWithJudge {
                id: row.get(0)?,
                winner_id: row.get(1)?,
                loser_id: row.get(2)?,
                judge_id: row.get(3)?,
                judge_gender: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_by_profile(conn: &mut DbConn, profile_id: i64) -> Result<i64> {
    let sql = "SELECT COUNT(*) FROM duels d JOIN cards w ON d.winner_id = w.id WHERE w.profile_id = ?1";

    conn.query_row(sql, params![profile_id], |row| row.get(0))
        .context("Failed to count duels for profile")
}
