use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::{NewSession, Session};

const SESSION_COLUMNS: &str = "id, player_name, player_id, result, amount, game_type, date, created_at";

pub fn insert_session(conn: &mut DbConn, session: &NewSession) -> Result<Session> {
    let sql = format!(
        "INSERT INTO sessions (player_name, player_id, result, amount, game_type, date, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING {SESSION_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            session.player_name,
            session.player_id,
            session.result,
            session.amount,
            session.game_type,
            session.created_at,
        ],
        parse_session_row,
    )
    .context("Failed to insert session")
}

fn parse_session_row(row: &rusqlite::Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        player_name: row.get(1)?,
        player_id: row.get(2)?,
        result: row.get(3)?,
        amount: row.get(4)?,
        game_type: row.get(5)?,
        date: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// Newest first. Insertion order breaks ties between identical timestamps.
pub fn list_recent(conn: &mut DbConn, limit: usize) -> Result<Vec<Session>> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY created_at DESC, id DESC LIMIT ?1");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit as i64], parse_session_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list recent sessions")?;

    Ok(rows)
}
