use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{GameSubmission, WHOLE_AMOUNT_MESSAGE};
use crate::errors::GameError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub player_name: Option<String>,
    pub result: Option<String>,
    /// Kept loose so a non-integer amount gets a validation message rather
    /// than a body rejection.
    pub amount: Option<Value>,
    pub game_type: Option<String>,
}

impl TryFrom<GameRequest> for GameSubmission {
    type Error = GameError;

    fn try_from(request: GameRequest) -> Result<Self, Self::Error> {
        let amount = whole_amount(request.amount)?;
        GameSubmission::parse(request.player_name, request.result, amount, request.game_type)
    }
}

/// Accepts JSON integers and integral floats such as `100.0`. Values beyond
/// the i64 range saturate so the amount cap reports them.
fn whole_amount(amount: Option<Value>) -> Result<Option<i64>, GameError> {
    let number = match amount {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number,
        Some(_) => return Err(GameError::validation(WHOLE_AMOUNT_MESSAGE)),
    };

    if let Some(whole) = number.as_i64() {
        return Ok(Some(whole));
    }
    if let Some(big) = number.as_u64() {
        return Ok(Some(i64::try_from(big).unwrap_or(i64::MAX)));
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 => Ok(Some(float as i64)),
        _ => Err(GameError::validation(WHOLE_AMOUNT_MESSAGE)),
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}
