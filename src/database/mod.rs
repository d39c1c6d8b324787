pub mod connection;
pub mod leaderboard;
pub mod models;
pub mod players;
pub mod sessions;
pub mod setup;

pub use connection::{DbConn, DbPool, create_memory_pool, create_pool, get_connection};
pub use models::*;
