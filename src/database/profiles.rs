use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use crate::domain::Profile;

pub fn insert_profile(conn: &mut DbConn, name: &str, password: &str) -> Result<Profile> {
    let sql = "INSERT INTO profiles (name, password) VALUES (?1, ?2) RETURNING id, name, password, results_available, created_at";

    conn.query_row(sql, params![name, password], parse_profile_row)
        .context("Failed to insert profile")
}

/// 8 random lowercase letters, sourced from sqlite's randomblob. Matches
/// the auto-generated shared passwords handed out at parties.
pub fn generate_password(conn: &mut DbConn) -> Result<String> {
    let blob: Vec<u8> = conn
        .query_row("SELECT randomblob(8)", [], |row| row.get(0))
        .context("Failed to generate password bytes")?;

    Ok(blob.iter().map(|b| (b'a' + b % 26) as char).collect())
}

pub fn find_by_password(conn: &mut DbConn, password: &str) -> Result<Option<Profile>> {
    let sql = "SELECT id, name, password, results_available, created_at FROM profiles WHERE password = ?1";

    conn.query_row(sql, params![password], parse_profile_row)
        .optional()
        .context("Failed to query profile by password")
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Profile>> {
    let sql = "SELECT id, name, password, results_available, created_at FROM profiles WHERE id = ?1";

    conn.query_row(sql, params![id], parse_profile_row)
        .optional()
        .context("Failed to query profile by id")
}

pub fn set_results_available(conn: &mut DbConn, id: i64, available: bool) -> Result<()> {
    let sql = "UPDATE profiles SET results_available = ?1 WHERE id = ?2";

    conn.execute(sql, params![available, id])
        .context("Failed to update results_available")
        .map(|_| ())
}

fn parse_profile_row(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        name: row.get(1)?,
        password: row.get(2)?,
        results_available: row.get(3)?,
        created_at: row.get(4)?,
    })
}
