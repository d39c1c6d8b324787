pub mod standings;

pub use standings::{avg_win, rank_players, win_rate};
