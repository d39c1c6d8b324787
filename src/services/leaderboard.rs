use anyhow::Result;
use chrono::Utc;
use log::{debug, info};

use crate::database::{self, DbConn, LeaderboardEntry};
use crate::ranking;

/// Rebuilds the persisted leaderboard from the full player table.
///
/// The snapshot is derived data: it is always recomputed from scratch and
/// swapped in whole, never patched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardService;

impl LeaderboardService {
    pub fn new() -> Self {
        Self
    }

    pub fn rebuild(&self, conn: &mut DbConn) -> Result<Vec<LeaderboardEntry>> {
        let players = database::players::list_all(conn)?;
        debug!("Ranking {} players", players.len());

        let entries = ranking::rank_players(players, Utc::now());
        database::leaderboard::replace_all(conn, &entries)?;

        info!("Leaderboard rebuilt with {} entries", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::GameResult;
    use crate::database::{create_memory_pool, get_connection, players, setup};
    use crate::domain::StatsDelta;

    fn conn() -> DbConn {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::initialize_schema(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_rebuild_on_empty_store() {
        let mut conn = conn();

        let entries = LeaderboardService::new().rebuild(&mut conn).unwrap();

        assert!(entries.is_empty());
        assert!(database::leaderboard::list_all(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn test_rebuild_persists_ranked_snapshot() {
        let mut conn = conn();
        let now = Utc::now();
        players::apply_game(&mut conn, "Alice", &StatsDelta::new(GameResult::Win, 100), now).unwrap();
        players::apply_game(&mut conn, "Alice", &StatsDelta::new(GameResult::Loss, 40), now).unwrap();
        players::apply_game(&mut conn, "Bob", &StatsDelta::new(GameResult::Win, 200), now).unwrap();

        LeaderboardService::new().rebuild(&mut conn).unwrap();
        let stored = database::leaderboard::list_all(&mut conn).unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!((stored[0].name.as_str(), stored[0].rank), ("Bob", 1));
        assert_eq!((stored[1].name.as_str(), stored[1].rank), ("Alice", 2));
        assert_eq!(stored[1].total_winnings, 60);
        assert_eq!(stored[1].win_rate, 50.0);
        assert_eq!(stored[1].avg_win, 100.0);
    }

    #[test]
    fn test_rebuild_twice_is_stable() {
        let mut conn = conn();
        let now = Utc::now();
        for (name, amount) in [("Alice", 30), ("Bob", 30), ("Carol", 10)] {
            players::apply_game(&mut conn, name, &StatsDelta::new(GameResult::Win, amount), now).unwrap();
        }

        let service = LeaderboardService::new();
        let first = service.rebuild(&mut conn).unwrap();
        let second = service.rebuild(&mut conn).unwrap();

        let project = |entries: &[LeaderboardEntry]| {
            entries
                .iter()
                .map(|e| (e.rank, e.name.clone(), e.win_rate, e.avg_win))
                .collect::<Vec<_>>()
        };
        assert_eq!(project(&first), project(&second));
    }
}
