use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::database::models::{LeaderboardEntry, Player};

/// Percentage of games won, 0 for a player with no games.
pub fn win_rate(wins: i64, games_played: i64) -> f64 {
    if games_played > 0 {
        wins as f64 / games_played as f64 * 100.0
    } else {
        0.0
    }
}

/// Mean amount per winning game, 0 for a player with no wins.
pub fn avg_win(total_won: i64, wins: i64) -> f64 {
    if wins > 0 {
        total_won as f64 / wins as f64
    } else {
        0.0
    }
}

/// Highest total winnings first; equal totals fall back to name ascending.
fn standing_order(a: &Player, b: &Player) -> Ordering {
    b.total_winnings
        .cmp(&a.total_winnings)
        .then_with(|| a.name.cmp(&b.name))
}

/// Ranks every player into a fresh leaderboard stamped with `computed_at`.
///
/// Ranks are positional (1..=N) even when totals tie.
pub fn rank_players(mut players: Vec<Player>, computed_at: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    players.sort_by(standing_order);

    players
        .into_iter()
        .enumerate()
        .map(|(idx, player)| to_entry(idx as i64 + 1, player, computed_at))
        .collect()
}

fn to_entry(rank: i64, player: Player, computed_at: DateTime<Utc>) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        player_id: player.id,
        win_rate: win_rate(player.wins, player.games_played),
        avg_win: avg_win(player.total_won, player.wins),
        name: player.name,
        total_winnings: player.total_winnings,
        games_played: player.games_played,
        wins: player.wins,
        losses: player.losses,
        biggest_win: player.biggest_win,
        total_won: player.total_won,
        total_lost: player.total_lost,
        created_at: player.created_at,
        updated_at: computed_at,
    }
}
