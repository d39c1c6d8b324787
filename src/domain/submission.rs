use crate::database::models::GameResult;
use crate::errors::GameError;

use super::stats::{StatsDelta, signed_amount};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const WHOLE_AMOUNT_MESSAGE: &str = "Amount must be a whole number";

/// Largest amount a single game may move (one trillion chips).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// A game result that has passed presence checks and is ready to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSubmission {
    pub player_name: String,
    pub result: GameResult,
    pub amount: i64,
    pub game_type: String,
}

impl GameSubmission {
    pub fn parse(
        player_name: Option<String>,
        result: Option<String>,
        amount: Option<i64>,
        game_type: Option<String>,
    ) -> Result<Self, GameError> {
        let (Some(player_name), Some(result), Some(amount), Some(game_type)) =
            (present(player_name), present(result), amount, present(game_type))
        else {
            return Err(GameError::validation(MISSING_FIELDS_MESSAGE));
        };

        if amount == 0 {
            return Err(GameError::validation(MISSING_FIELDS_MESSAGE));
        }
        if amount < 0 {
            return Err(GameError::validation(
                "Amount must be positive; the result decides whether it is won or lost",
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(GameError::validation(format!(
                "Amount must not exceed {MAX_AMOUNT}"
            )));
        }

        let result = result
            .parse::<GameResult>()
            .map_err(|_| GameError::validation("Result must be 'win' or 'loss'"))?;

        Ok(Self {
            player_name,
            result,
            amount,
            game_type,
        })
    }

    pub fn game_amount(&self) -> i64 {
        signed_amount(self.result, self.amount)
    }

    pub fn delta(&self) -> StatsDelta {
        StatsDelta::new(self.result, self.amount)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(
        name: Option<&str>,
        result: Option<&str>,
        amount: Option<i64>,
        game_type: Option<&str>,
    ) -> Result<GameSubmission, GameError> {
        GameSubmission::parse(
            name.map(String::from),
            result.map(String::from),
            amount,
            game_type.map(String::from),
        )
    }

    fn assert_rejected(outcome: Result<GameSubmission, GameError>, message: &str) {
        match outcome {
            Err(GameError::Validation(actual)) => assert_eq!(actual, message),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_win() {
        let submission = parse(Some("Alice"), Some("win"), Some(100), Some("holdem")).unwrap();
        assert_eq!(submission.result, GameResult::Win);
        assert_eq!(submission.game_amount(), 100);
    }

    #[test]
    fn test_loss_amount_is_negated() {
        let submission = parse(Some("Alice"), Some("loss"), Some(40), Some("holdem")).unwrap();
        assert_eq!(submission.game_amount(), -40);
        assert_eq!(submission.delta().total_lost, 40);
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert_rejected(parse(None, Some("win"), Some(1), Some("holdem")), MISSING_FIELDS_MESSAGE);
        assert_rejected(parse(Some("Alice"), None, Some(1), Some("holdem")), MISSING_FIELDS_MESSAGE);
        assert_rejected(parse(Some("Alice"), Some("win"), None, Some("holdem")), MISSING_FIELDS_MESSAGE);
        assert_rejected(parse(Some("Alice"), Some("win"), Some(1), None), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn test_blank_strings_and_zero_amount_count_as_missing() {
        assert_rejected(parse(Some("  "), Some("win"), Some(1), Some("holdem")), MISSING_FIELDS_MESSAGE);
        assert_rejected(parse(Some("Alice"), Some("win"), Some(1), Some("")), MISSING_FIELDS_MESSAGE);
        assert_rejected(parse(Some("Alice"), Some("win"), Some(0), Some("holdem")), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn test_unknown_result_rejected() {
        assert_rejected(
            parse(Some("Alice"), Some("draw"), Some(10), Some("holdem")),
            "Result must be 'win' or 'loss'",
        );
        assert_rejected(
            parse(Some("Alice"), Some("WIN"), Some(10), Some("holdem")),
            "Result must be 'win' or 'loss'",
        );
    }

    #[test]
    fn test_amount_above_limit_rejected() {
        assert!(parse(Some("Alice"), Some("win"), Some(MAX_AMOUNT), Some("holdem")).is_ok());
        assert_rejected(
            parse(Some("Alice"), Some("win"), Some(MAX_AMOUNT + 1), Some("holdem")),
            "Amount must not exceed 1000000000000",
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(matches!(
            parse(Some("Alice"), Some("loss"), Some(-40), Some("holdem")),
            Err(GameError::Validation(_))
        ));
    }
}
