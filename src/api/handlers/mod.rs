use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::settings::AppConfig;
use crate::services::{GameRecordingService, LeaderboardService};

pub mod games;
pub mod health;
pub mod leaderboard;
pub mod players;
pub mod sessions;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
    pub recorder: GameRecordingService,
}

impl AppState {
    pub fn new(pool: Pool<SqliteConnectionManager>, config: AppConfig) -> Self {
        Self {
            pool,
            config,
            recorder: GameRecordingService::new(LeaderboardService::new()),
        }
    }
}
