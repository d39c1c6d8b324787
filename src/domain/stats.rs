use crate::database::models::GameResult;

/// Per-game change to a player's running totals.
///
/// `amount` is always the positive stake won or lost; the signed delta
/// applied to `total_winnings` is derived from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsDelta {
    pub total_winnings: i64,
    pub wins: i64,
    pub losses: i64,
    pub biggest_win: i64,
    pub total_won: i64,
    pub total_lost: i64,
}

impl StatsDelta {
    pub fn new(result: GameResult, amount: i64) -> Self {
        match result {
            GameResult::Win => Self {
                total_winnings: amount,
                wins: 1,
                losses: 0,
                biggest_win: amount,
                total_won: amount,
                total_lost: 0,
            },
            GameResult::Loss => Self {
                total_winnings: -amount,
                wins: 0,
                losses: 1,
                biggest_win: 0,
                total_won: 0,
                total_lost: amount,
            },
        }
    }
}

pub fn signed_amount(result: GameResult, amount: i64) -> i64 {
    match result {
        GameResult::Win => amount,
        GameResult::Loss => -amount,
    }
}
