use chrono::Utc;
use log::{error, info};

use crate::database::{self, DbConn, NewSession, Player, Session};
use crate::domain::GameSubmission;
use crate::errors::GameError;
use crate::services::leaderboard::LeaderboardService;

/// Result of the best-effort leaderboard refresh that follows a recorded game.
#[derive(Debug)]
pub enum LeaderboardOutcome {
    Refreshed { entries: usize },
    Failed(GameError),
}

impl LeaderboardOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, LeaderboardOutcome::Refreshed { .. })
    }
}

/// A committed game. `leaderboard` reports the follow-up refresh separately
/// and never turns a recorded game into a failure.
#[derive(Debug)]
pub struct RecordedGame {
    pub player: Player,
    pub session: Session,
    pub leaderboard: LeaderboardOutcome,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameRecordingService {
    leaderboard: LeaderboardService,
}

impl GameRecordingService {
    pub fn new(leaderboard: LeaderboardService) -> Self {
        Self { leaderboard }
    }

    /// Folds the submission into the player's totals, appends the session,
    /// then refreshes the leaderboard.
    ///
    /// Player and session writes are separate statements: if the session
    /// insert fails the player update stays committed. A fold the store
    /// refuses as out of range writes nothing and comes back as a
    /// validation error.
    pub fn record(&self, conn: &mut DbConn, submission: &GameSubmission) -> Result<RecordedGame, GameError> {
        let now = Utc::now();

        let player = database::players::apply_game(conn, &submission.player_name, &submission.delta(), now)
            .map_err(|e| {
                if database::players::is_out_of_range(&e) {
                    GameError::validation(format!(
                        "Recording this game would push {}'s totals out of range",
                        submission.player_name
                    ))
                } else {
                    GameError::from(e)
                }
            })?;

        let session = database::sessions::insert_session(
            conn,
            &NewSession {
                player_name: &player.name,
                player_id: player.id,
                result: submission.result,
                amount: submission.game_amount(),
                game_type: &submission.game_type,
                created_at: now,
            },
        )?;

        info!(
            "Recorded {} of {} for {} ({}), total winnings now {}",
            submission.result, submission.amount, player.name, submission.game_type, player.total_winnings
        );

        let leaderboard = self.refresh_leaderboard(conn);

        Ok(RecordedGame {
            player,
            session,
            leaderboard,
        })
    }

    fn refresh_leaderboard(&self, conn: &mut DbConn) -> LeaderboardOutcome {
        match self.leaderboard.rebuild(conn) {
            Ok(entries) => LeaderboardOutcome::Refreshed { entries: entries.len() },
            Err(e) => {
                let failure = GameError::Materialization(e);
                error!("{:#}", failure);
                LeaderboardOutcome::Failed(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::GameResult;
    use crate::database::{create_memory_pool, get_connection, leaderboard, players, sessions, setup};

    fn conn() -> DbConn {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::initialize_schema(&mut conn).unwrap();
        conn
    }

    fn submission(name: &str, result: &str, amount: i64) -> GameSubmission {
        GameSubmission::parse(
            Some(name.to_string()),
            Some(result.to_string()),
            Some(amount),
            Some("holdem".to_string()),
        )
        .unwrap()
    }

    fn assert_balanced(player: &Player) {
        assert_eq!(player.wins + player.losses, player.games_played);
        assert_eq!(player.total_winnings, player.total_won - player.total_lost);
    }

    #[test]
    fn test_first_win_on_fresh_store() {
        let mut conn = conn();
        let service = GameRecordingService::default();

        let recorded = service.record(&mut conn, &submission("Alice", "win", 100)).unwrap();

        let alice = players::find_by_name(&mut conn, "Alice").unwrap().unwrap();
        assert_eq!(alice.total_winnings, 100);
        assert_eq!(alice.games_played, 1);
        assert_eq!(alice.wins, 1);
        assert_eq!(alice.total_won, 100);
        assert_eq!(alice.biggest_win, 100);
        assert_eq!(recorded.player, alice);

        let logged = sessions::list_recent(&mut conn, 50).unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].amount, 100);
        assert_eq!(logged[0].player_id, alice.id);
        assert_eq!(logged[0].player_name, "Alice");
        assert_eq!(logged[0].game_type, "holdem");

        assert!(recorded.leaderboard.is_refreshed());
        let board = leaderboard::list_all(&mut conn).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].win_rate, 100.0);
        assert_eq!(board[0].avg_win, 100.0);
    }

    #[test]
    fn test_loss_after_win() {
        let mut conn = conn();
        let service = GameRecordingService::default();

        service.record(&mut conn, &submission("Alice", "win", 100)).unwrap();
        let recorded = service.record(&mut conn, &submission("Alice", "loss", 40)).unwrap();

        let alice = recorded.player;
        assert_eq!(alice.total_winnings, 60);
        assert_eq!(alice.games_played, 2);
        assert_eq!(alice.losses, 1);
        assert_eq!(alice.total_lost, 40);
        assert_eq!(alice.biggest_win, 100);
        assert_eq!(recorded.session.amount, -40);

        let board = leaderboard::list_all(&mut conn).unwrap();
        assert_eq!(board[0].win_rate, 50.0);
    }

    #[test]
    fn test_two_players_ranked_by_winnings() {
        let mut conn = conn();
        let service = GameRecordingService::default();

        service.record(&mut conn, &submission("Alice", "win", 100)).unwrap();
        service.record(&mut conn, &submission("Alice", "loss", 40)).unwrap();
        service.record(&mut conn, &submission("Bob", "win", 200)).unwrap();

        let board = leaderboard::list_all(&mut conn).unwrap();
        let order: Vec<(&str, i64, i64)> = board
            .iter()
            .map(|e| (e.name.as_str(), e.rank, e.total_winnings))
            .collect();
        assert_eq!(order, vec![("Bob", 1, 200), ("Alice", 2, 60)]);
    }

    #[test]
    fn test_invariants_hold_after_every_submission() {
        let mut conn = conn();
        let service = GameRecordingService::default();
        let games = [
            ("win", 50),
            ("loss", 20),
            ("win", 120),
            ("loss", 300),
            ("win", 10),
            ("win", 90),
            ("loss", 5),
        ];

        let mut max_win = 0;
        let mut last_biggest = 0;
        for (result, amount) in games {
            let player = service
                .record(&mut conn, &submission("Dana", result, amount))
                .unwrap()
                .player;

            if result == "win" {
                max_win = max_win.max(amount);
            }
            assert_balanced(&player);
            assert!(player.biggest_win >= last_biggest);
            assert_eq!(player.biggest_win, max_win);
            last_biggest = player.biggest_win;
        }

        let dana = players::find_by_name(&mut conn, "Dana").unwrap().unwrap();
        assert_eq!(dana.games_played, games.len() as i64);
        assert_eq!(dana.total_winnings, 50 - 20 + 120 - 300 + 10 + 90 - 5);
        let logged = sessions::list_recent(&mut conn, 50).unwrap();
        assert_eq!(logged.iter().filter(|s| s.player_id == dana.id).count(), games.len());
    }

    #[test]
    fn test_out_of_range_totals_rejected_without_breaking_store() {
        let mut conn = conn();
        let service = GameRecordingService::default();
        let huge = GameSubmission {
            player_name: "Alice".to_string(),
            result: GameResult::Win,
            amount: 5_000_000_000_000_000_000,
            game_type: "holdem".to_string(),
        };

        service.record(&mut conn, &huge).unwrap();
        let second = service.record(&mut conn, &huge);
        assert!(matches!(second, Err(GameError::Validation(_))));

        let everyone = players::list_all(&mut conn).unwrap();
        assert_eq!(everyone.len(), 1);
        assert_eq!(everyone[0].games_played, 1);
        assert_balanced(&everyone[0]);
        assert_eq!(sessions::list_recent(&mut conn, 50).unwrap().len(), 1);

        let bob = service.record(&mut conn, &submission("Bob", "win", 10)).unwrap();
        assert!(bob.leaderboard.is_refreshed());
        let board = leaderboard::list_all(&mut conn).unwrap();
        let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_leaderboard_failure_does_not_fail_recording() {
        let mut conn = conn();
        conn.execute("DROP TABLE leaderboard", []).unwrap();

        let recorded = GameRecordingService::default()
            .record(&mut conn, &submission("Alice", "win", 100))
            .unwrap();

        assert!(matches!(
            recorded.leaderboard,
            LeaderboardOutcome::Failed(GameError::Materialization(_))
        ));
        assert_eq!(players::find_by_name(&mut conn, "Alice").unwrap().unwrap().total_winnings, 100);
        assert_eq!(sessions::list_recent(&mut conn, 50).unwrap().len(), 1);
    }

    #[test]
    fn test_store_failure_surfaces_as_store_unavailable() {
        let mut conn = conn();
        conn.execute("DROP TABLE sessions", []).unwrap();

        let result = GameRecordingService::default().record(&mut conn, &submission("Alice", "win", 100));

        assert!(matches!(result, Err(GameError::StoreUnavailable(_))));
    }
}
