pub mod leaderboard;
pub mod recording;
pub mod report;
pub mod server;

pub use leaderboard::LeaderboardService;
pub use recording::{GameRecordingService, LeaderboardOutcome, RecordedGame};
pub use report::StandingsReport;
pub use server::ServerService;
