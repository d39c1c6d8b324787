use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{ErrorCode, OptionalExtension, named_params};

use super::connection::DbConn;
use super::models::Player;
use crate::domain::StatsDelta;

const PLAYER_COLUMNS: &str = "id, name, total_winnings, games_played, wins, losses, biggest_win, total_won, total_lost, created_at, updated_at";

/// Folds one game into the named player's running totals, creating the
/// player on first sight.
///
/// The insert and the increment are a single statement, so two concurrent
/// submissions for the same name both land. A fold that would push a total
/// out of the integer range is refused by the table's CHECK constraint and
/// leaves the row untouched; see [`is_out_of_range`].
pub fn apply_game(
    conn: &mut DbConn,
    name: &str,
    delta: &StatsDelta,
    now: DateTime<Utc>,
) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, total_winnings, games_played, wins, losses, biggest_win, total_won, total_lost, created_at, updated_at)
         VALUES (:name, :total_winnings, 1, :wins, :losses, :biggest_win, :total_won, :total_lost, :now, :now)
         ON CONFLICT(name) DO UPDATE SET
             total_winnings = total_winnings + excluded.total_winnings,
             games_played = games_played + 1,
             wins = wins + excluded.wins,
             losses = losses + excluded.losses,
             biggest_win = MAX(biggest_win, excluded.biggest_win),
             total_won = total_won + excluded.total_won,
             total_lost = total_lost + excluded.total_lost,
             updated_at = excluded.updated_at
         RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        named_params! {
            ":name": name,
            ":total_winnings": delta.total_winnings,
            ":wins": delta.wins,
            ":losses": delta.losses,
            ":biggest_win": delta.biggest_win,
            ":total_won": delta.total_won,
            ":total_lost": delta.total_lost,
            ":now": now,
        },
        parse_player_row,
    )
    .with_context(|| format!("Failed to apply game to player '{name}'"))
}

/// True when `error` came from a fold the players table refused to store.
pub fn is_out_of_range(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(failure, _)) if failure.code == ErrorCode::ConstraintViolation
    )
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        total_winnings: row.get(2)?,
        games_played: row.get(3)?,
        wins: row.get(4)?,
        losses: row.get(5)?,
        biggest_win: row.get(6)?,
        total_won: row.get(7)?,
        total_lost: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

pub fn find_by_name(conn: &mut DbConn, name: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE name = ?1");

    conn.query_row(&sql, [name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list players")?;

    Ok(rows)
}
