use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::Prompt;

pub fn insert_prompt(conn: &mut DbConn, text: &str) -> Result<Prompt> {
    let sql = "INSERT INTO prompts (text) VALUES (?1) RETURNING id, text, created_at";

    conn.query_row(sql, params![text], parse_prompt_row)
        .context("Failed to insert prompt")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Prompt>> {
    let sql = "SELECT id, text, created_at FROM prompts WHERE id = ?1";

    conn.query_row(sql, params![id], parse_prompt_row)
        .optional()
        .context("Failed to query prompt by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Prompt>> {
    let sql = "SELECT id, text, created_at FROM prompts ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_prompt_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_prompt_row(row: &rusqlite::Row) -> rusqlite::Result<Prompt> {
    Ok(Prompt {
        id: row.get(0)?,
        text: row.get(1)?,
        created_at: row.get(2)?,
    })
}
