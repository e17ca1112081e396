use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::CardWithPrompt;
use crate::domain::{Card, CardKind};

pub fn insert_card(
    conn: &mut DbConn,
    profile_id: i64,
    uploader_id: Option<i64>,
    prompt_id: Option<i64>,
    answer: Option<&str>,
    image_path: Option<&str>,
) -> Result<Card> {
    let sql = "INSERT INTO cards (profile_id, uploader_id, prompt_id, answer, image_path) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id, profile_id, uploader_id, prompt_id, answer, image_path, created_at";

    conn.query_row(
        sql,
        params![profile_id, uploader_id, prompt_id, answer, image_path],
        parse_card_row,
    )
    .context("Failed to insert card")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Card>> {
    let sql = "SELECT id, profile_id, uploader_id, prompt_id, answer, image_path, created_at FROM cards WHERE id = ?1";

    conn.query_row(sql, params![id], parse_card_row)
        .optional()
        .context("Failed to query card by id")
}

pub fn list_by_profile(
    conn: &mut DbConn,
    profile_id: i64,
    kind: Option<CardKind>,
) -> Result<Vec<Card>> {
    let sql = match kind {
        None => "SELECT id, profile_id, uploader_id, prompt_id, answer, image_path, created_at FROM cards WHERE profile_id = ?1",
        Some(CardKind::Image) => "SELECT id, profile_id, uploader_id, prompt_id, answer, image_path, created_at FROM cards WHERE profile_id = ?1 AND prompt_id IS NULL",
        Some(CardKind::Prompt) => "SELECT id, profile_id, uploader_id, prompt_id, answer, image_path, created_at FROM cards WHERE profile_id = ?1 AND prompt_id IS NOT NULL",
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![profile_id], parse_card_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_with_prompts(conn: &mut DbConn, profile_id: i64) -> Result<Vec<CardWithPrompt>> {
    let sql = "
        SELECT c.id, c.profile_id, c.uploader_id, u.name, c.prompt_id, p.text, c.answer, c.image_path, c.created_at
        FROM cards c
        LEFT JOIN participants u ON c.uploader_id = u.id
        LEFT JOIN prompts p ON c.prompt_id = p.id
        WHERE c.profile_id = ?1
        ORDER BY c.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![profile_id], |row| {
            Ok(CardWithPrompt {
                id: row.get(0)?,
                profile_id: row.get(1)?,
                uploader_id: row.get(2)?,
                uploader_name: row.get(3)?,
                prompt_id: row.get(4)?,
                prompt_text: row.get(5)?,
                answer: row.get(6)?,
                image_path: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Two distinct random cards to duel. Image pairs come from the whole image
/// pool; prompt pairs are drawn within one random prompt that has at least
/// two cards, so duels always compare answers to the same question.
pub fn random_pair(
    conn: &mut DbConn,
    profile_id: i64,
    kind: CardKind,
) -> Result<Option<(Card, Card)>> {
    let cards = match kind {
        CardKind::Image => random_image_pair(conn, profile_id)?,
        CardKind::Prompt => random_prompt_pair(conn, profile_id)?,
    };

    let mut iter = cards.into_iter();
    match (iter.next(), iter.next()) {
        (Some(first), Some(second)) => Ok(Some((first, second))),
        _ => Ok(None),
    }
}

fn random_image_pair(conn: &mut DbConn, profile_id: i64) -> Result<Vec<Card>> {
    let sql = "SELECT id, profile_id, uploader_id, prompt_id, answer, image_path, created_at FROM cards WHERE profile_id = ?1 AND prompt_id IS NULL ORDER BY RANDOM() LIMIT 2";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![profile_id], parse_card_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn random_prompt_pair(conn: &mut DbConn, profile_id: i64) -> Result<Vec<Card>> {
    let prompt_sql = "
        SELECT prompt_id FROM cards
        WHERE profile_id = ?1 AND prompt_id IS NOT NULL
        GROUP BY prompt_id HAVING COUNT(*) >= 2
        ORDER BY RANDOM() LIMIT 1
    ";

    let prompt_id: Option<i64> = conn
        .query_row(prompt_sql, params![profile_id], |row| row.get(0))
        .optional()
        .context("Failed to pick a random prompt")?;

    let Some(prompt_id) = prompt_id else {
        return Ok(Vec::new());
    };

    let sql = "SELECT id, profile_id, uploader_id, prompt_id, answer, image_path, created_at FROM cards WHERE profile_id = ?1 AND prompt_id = ?2 ORDER BY RANDOM() LIMIT 2";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![profile_id, prompt_id], parse_card_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_card_row(row: &rusqlite::Row) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        uploader_id: row.get(2)?,
        prompt_id: row.get(3)?,
        answer: row.get(4)?,
        image_path: row.get(5)?,
        created_at: row.get(6)?,
    })
}
