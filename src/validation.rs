use crate::models::{Subject, SubjectId};

/// Validation result with error message
pub type ValidationResult<T = ()> = Result<T, &'static str>;

/// Validate a subject name for creation
///
/// Returns Ok(()) if valid, or Err with a message explaining why it's invalid.
pub fn validate_new_subject_name(name: &str, existing: &[Subject]) -> ValidationResult {
    let name = name.trim();
    if name.is_empty() {
        return Err("Enter a subject name");
    }
    if existing.iter().any(|s| s.name.eq_ignore_ascii_case(name)) {
        return Err("Subject already exists");
    }
    Ok(())
}

/// Validate a subject name for update
///
/// Same as creation but the subject may keep its own name.
pub fn validate_update_subject_name(
    name: &str,
    existing: &[Subject],
    current: SubjectId,
) -> ValidationResult {
    let name = name.trim();
    if name.is_empty() {
        return Err("Enter a subject name");
    }
    if existing
        .iter()
        .any(|s| s.id != current && s.name.eq_ignore_ascii_case(name))
    {
        return Err("Subject already exists");
    }
    Ok(())
}

/// Parse a plan target in whole minutes; must be positive
pub fn parse_target_minutes(input: &str) -> ValidationResult<i64> {
    match input.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err("Enter a valid target"),
    }
}

/// A note needs a title or some content
pub fn validate_note(title: &str, content: &str) -> ValidationResult {
    if title.trim().is_empty() && content.trim().is_empty() {
        return Err("Write something before saving");
    }
    Ok(())
}

/// The timer and plan editor need a subject to work with
pub fn require_subject(selected: Option<SubjectId>) -> ValidationResult<SubjectId> {
    selected.ok_or("Select a subject")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Timestamp;

    fn make_subjects() -> Vec<Subject> {
        vec![
            Subject {
                id: SubjectId::new(1),
                name: "Math".to_string(),
                color: "#4A90D9".to_string(),
                created_at: Timestamp::new(0),
            },
            Subject {
                id: SubjectId::new(2),
                name: "Physics".to_string(),
                color: "#E74C3C".to_string(),
                created_at: Timestamp::new(0),
            },
        ]
    }

    #[test]
    fn test_validate_new_subject_name_empty() {
        let subjects = make_subjects();
        assert_eq!(
            validate_new_subject_name("", &subjects),
            Err("Enter a subject name")
        );
        assert_eq!(
            validate_new_subject_name(" \t", &subjects),
            Err("Enter a subject name")
        );
    }

    #[test]
    fn test_validate_new_subject_name_duplicate() {
        let subjects = make_subjects();
        assert_eq!(
            validate_new_subject_name("math", &subjects),
            Err("Subject already exists")
        );
        assert_eq!(validate_new_subject_name("History", &subjects), Ok(()));
    }

    #[test]
    fn test_validate_update_subject_keeps_own_name() {
        let subjects = make_subjects();
        assert_eq!(
            validate_update_subject_name("Math", &subjects, SubjectId::new(1)),
            Ok(())
        );
        assert_eq!(
            validate_update_subject_name("Physics", &subjects, SubjectId::new(1)),
            Err("Subject already exists")
        );
    }

    #[test]
    fn test_parse_target_minutes() {
        assert_eq!(parse_target_minutes("60"), Ok(60));
        assert_eq!(parse_target_minutes(" 15 "), Ok(15));
        assert_eq!(parse_target_minutes("0"), Err("Enter a valid target"));
        assert_eq!(parse_target_minutes("-5"), Err("Enter a valid target"));
        assert_eq!(parse_target_minutes("abc"), Err("Enter a valid target"));
        assert_eq!(parse_target_minutes(""), Err("Enter a valid target"));
    }

    #[test]
    fn test_validate_note() {
        assert_eq!(validate_note("", "   "), Err("Write something before saving"));
        assert_eq!(validate_note("Title", ""), Ok(()));
        assert_eq!(validate_note("", "body"), Ok(()));
    }

    #[test]
    fn test_require_subject() {
        assert_eq!(require_subject(None), Err("Select a subject"));
        assert_eq!(require_subject(Some(SubjectId::new(3))), Ok(SubjectId::new(3)));
    }
}
