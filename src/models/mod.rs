mod note;
mod plan;
mod session;
mod stats;
mod subject;
mod types;

pub use note::{Note, SESSION_NOTE_TITLE};
pub use plan::{DailyPlan, PlanProgress, PlanRow};
pub use session::{NewSession, Session};
pub use stats::{DailyStat, SubjectSeconds, SubjectStat};
pub use subject::{DEFAULT_COLOR, SUBJECT_COLORS, Subject, parse_hex_color};
pub use types::{DurationSecs, NoteId, PlanId, SessionId, SubjectId, Timestamp};
