pub mod stats;
pub mod submission;

pub use stats::StatsDelta;
pub use submission::{GameSubmission, WHOLE_AMOUNT_MESSAGE};
