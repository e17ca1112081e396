use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::{Gender, Participant};

/// Participant names are unique per profile, so repeated sign-ins resolve
/// to the same row.
pub fn upsert_participant(
    conn: &mut DbConn,
    profile_id: i64,
    name: &str,
    gender: Gender,
) -> Result<Participant> {
    if let Some(existing) = find_by_name(conn, profile_id, name)? {
        return Ok(existing);
    }

    let sql = "INSERT INTO participants (profile_id, name, gender) VALUES (?1, ?2, ?3) RETURNING id, profile_id, name, gender, created_at";

    conn.query_row(sql, params![profile_id, name, gender.as_str()], parse_participant_row)
        .context("Failed to insert participant")
}

fn find_by_name(conn: &mut DbConn, profile_id: i64, name: &str) -> Result<Option<Participant>> {
    let sql = "SELECT id, profile_id, name, gender, created_at FROM participants WHERE profile_id = ?1 AND name = ?2";

    conn.query_row(sql, params![profile_id, name], parse_participant_row)
        .optional()
        .context("Failed to query participant by name")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Participant>> {
    let sql = "SELECT id, profile_id, name, gender, created_at FROM participants WHERE id = ?1";

    conn.query_row(sql, params![id], parse_participant_row)
        .optional()
        .context("Failed to query participant by id")
}

pub fn list_by_profile(conn: &mut DbConn, profile_id: i64) -> Result<Vec<Participant>> {
    let sql = "SELECT id, profile_id, name, gender, created_at FROM participants WHERE profile_id = ?1 ORDER BY name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![profile_id], parse_participant_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_participant_row(row: &rusqlite::Row) -> rusqlite::Result<Participant> {
    let gender: String = row.get(3)?;
    Ok(Participant {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        name: row.get(2)?,
        gender: Gender::parse(&gender).unwrap_or(Gender::O),
        created_at: row.get(4)?,
    })
}
