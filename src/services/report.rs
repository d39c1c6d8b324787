use anyhow::Result;
use colored::Colorize;

use crate::database::{self, DbConn, LeaderboardEntry};

/// Renders the stored leaderboard as a terminal table.
pub struct StandingsReport {
    limit: Option<usize>,
}

impl StandingsReport {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn render(&self, conn: &mut DbConn) -> Result<String> {
        let entries = database::leaderboard::list_top(conn, self.limit)?;
        Ok(render_entries(&entries))
    }
}

fn render_entries(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No standings yet. Record a game first.".dimmed().to_string();
    }

    let mut lines = vec![format!(
        "{:>4}  {:<20} {:>10} {:>6} {:>8} {:>9}",
        "Rank", "Player", "Winnings", "Games", "Win %", "Avg win"
    )
    .bold()
    .to_string()];

    for entry in entries {
        lines.push(format!(
            "{:>4}  {:<20} {} {:>6} {:>7.1}% {:>9.2}",
            entry.rank,
            entry.name,
            format_winnings(entry.total_winnings),
            entry.games_played,
            entry.win_rate,
            entry.avg_win
        ));
    }

    lines.join("\n")
}

fn format_winnings(amount: i64) -> String {
    let padded = format!("{amount:>+10}");
    match amount.signum() {
        1 => padded.green().to_string(),
        -1 => padded.red().to_string(),
        _ => padded,
    }
}
