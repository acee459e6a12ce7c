pub mod answer_store;
pub mod countdown;
pub mod deadline;

pub use answer_store::{AnswerStore, SyncStatus};
pub use countdown::Countdown;
pub use deadline::{Deadline, DeadlineSource, RemainingTracker};
