use chrono::NaiveDate;
use ratatui::style::Color;
use serde::Serialize;

use super::{PlanId, SubjectId, parse_hex_color};

/// A per-day, per-subject target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPlan {
    pub id: PlanId,
    pub date: NaiveDate,
    pub subject_id: SubjectId,
    pub target_minutes: i64,
}

/// A plan joined with its subject's display fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub plan: DailyPlan,
    pub subject_name: String,
    pub subject_color: String,
}

impl PlanRow {
    pub fn with_actual(self, actual_minutes: i64) -> PlanProgress {
        PlanProgress {
            plan: self.plan,
            subject_name: self.subject_name,
            subject_color: self.subject_color,
            actual_minutes,
        }
    }
}

/// A plan joined with its subject and the minutes actually studied that day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanProgress {
    pub plan: DailyPlan,
    pub subject_name: String,
    pub subject_color: String,
    pub actual_minutes: i64,
}

impl PlanProgress {
    pub fn is_complete(&self) -> bool {
        self.actual_minutes >= self.plan.target_minutes
    }

    /// Fraction of the target reached, capped at 1.0; zero targets report 0.0
    pub fn progress(&self) -> f64 {
        if self.plan.target_minutes <= 0 {
            return 0.0;
        }
        (self.actual_minutes as f64 / self.plan.target_minutes as f64).min(1.0)
    }

    pub fn display_color(&self) -> Color {
        parse_hex_color(&self.subject_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(target: i64, actual: i64) -> PlanProgress {
        PlanProgress {
            plan: DailyPlan {
                id: PlanId::new(1),
                date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
                subject_id: SubjectId::new(1),
                target_minutes: target,
            },
            subject_name: "Math".to_string(),
            subject_color: "#4A90D9".to_string(),
            actual_minutes: actual,
        }
    }

    #[test]
    fn test_progress_fraction_partial() {
        let p = progress(60, 2);
        assert!((p.progress() - 2.0 / 60.0).abs() < 1e-9);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_progress_caps_at_one() {
        let p = progress(30, 45);
        assert_eq!(p.progress(), 1.0);
        assert!(p.is_complete());
    }

    #[test]
    fn test_zero_target_has_no_progress() {
        let p = progress(0, 10);
        assert_eq!(p.progress(), 0.0);
    }
}
