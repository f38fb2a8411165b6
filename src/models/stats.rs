use chrono::NaiveDate;
use ratatui::style::Color;

use super::{SubjectId, parse_hex_color};

/// Time studied per subject over a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectStat {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub subject_color: String,
    pub total_minutes: i64,
    pub session_count: i64,
}

impl SubjectStat {
    pub fn display_color(&self) -> Color {
        parse_hex_color(&self.subject_color)
    }
}

/// Time studied on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub total_minutes: i64,
}

/// Raw per-subject seconds as returned by the aggregate query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSeconds {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub subject_color: String,
    pub total_seconds: i64,
    pub session_count: i64,
}
