mod stopwatch;
mod ticker;

pub use stopwatch::{StudyTimer, TimerStatus};
pub use ticker::Ticker;
