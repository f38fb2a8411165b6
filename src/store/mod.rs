mod notes;
mod plans;
mod sessions;
mod subjects;

pub use notes::NoteStore;
pub use plans::PlanStore;
pub use sessions::SessionStore;
pub use subjects::SubjectStore;
