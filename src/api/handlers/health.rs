pub const LIVENESS_MESSAGE: &str = "Poker ledger API is running";

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}
