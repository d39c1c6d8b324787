use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::LeaderboardEntry;

const ENTRY_COLUMNS: &str = "rank, player_id, name, total_winnings, games_played, wins, losses, biggest_win, total_won, total_lost, win_rate, avg_win, created_at, updated_at";

/// Swaps the stored snapshot for `entries` in one transaction.
pub fn replace_all(conn: &mut DbConn, entries: &[LeaderboardEntry]) -> Result<()> {
    let tx = conn
        .transaction()
        .context("Failed to begin leaderboard transaction")?;

    tx.execute("DELETE FROM leaderboard", [])
        .context("Failed to clear leaderboard")?;

    if !entries.is_empty() {
        let sql = format!(
            "INSERT INTO leaderboard ({ENTRY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        );
        let mut stmt = tx.prepare(&sql)?;
        for entry in entries {
            stmt.execute(params![
                entry.rank,
                entry.player_id,
                entry.name,
                entry.total_winnings,
                entry.games_played,
                entry.wins,
                entry.losses,
                entry.biggest_win,
                entry.total_won,
                entry.total_lost,
                entry.win_rate,
                entry.avg_win,
                entry.created_at,
                entry.updated_at,
            ])
            .with_context(|| format!("Failed to insert leaderboard entry for '{}'", entry.name))?;
        }
    }

    tx.commit().context("Failed to commit leaderboard")
}

fn parse_entry_row(row: &rusqlite::Row) -> rusqlite::Result<LeaderboardEntry> {
    Ok(LeaderboardEntry {
        rank: row.get(0)?,
        player_id: row.get(1)?,
        name: row.get(2)?,
        total_winnings: row.get(3)?,
        games_played: row.get(4)?,
        wins: row.get(5)?,
        losses: row.get(6)?,
        biggest_win: row.get(7)?,
        total_won: row.get(8)?,
        total_lost: row.get(9)?,
        win_rate: row.get(10)?,
        avg_win: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<LeaderboardEntry>> {
    list_top(conn, None)
}

pub fn list_top(conn: &mut DbConn, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>> {
    // SQLite treats a negative LIMIT as no limit.
    let limit = limit.map_or(-1, |l| l as i64);
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM leaderboard ORDER BY rank ASC LIMIT ?1");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit], parse_entry_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list leaderboard")?;

    Ok(rows)
}
