use crate::models::{DEFAULT_COLOR, Note, NoteId, SUBJECT_COLORS, Subject, SubjectId};

/// What a form creates or edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    NewSubject,
    EditSubject(SubjectId),
    NewPlan,
    NewNote,
    EditNote(NoteId),
    TimerNote,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::NewSubject => " New Subject ",
            FormKind::EditSubject(_) => " Edit Subject ",
            FormKind::NewPlan => " Plan Today ",
            FormKind::NewNote => " New Note ",
            FormKind::EditNote(_) => " Edit Note ",
            FormKind::TimerNote => " Session Note ",
        }
    }
}

/// What the left/right keys cycle through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    None,
    Color,
    Subject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A modal text form with optional picker row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Chosen palette color (subject forms)
    pub color: String,
    /// Index into the subject list (plan form)
    pub subject_index: usize,
    pub error: Option<&'static str>,
}

impl Form {
    fn with_fields(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
            color: DEFAULT_COLOR.to_string(),
            subject_index: 0,
            error: None,
        }
    }

    pub fn new_subject() -> Self {
        Self::with_fields(FormKind::NewSubject, vec![FormField::new("Name", "")])
    }

    pub fn edit_subject(subject: &Subject) -> Self {
        let mut form = Self::with_fields(
            FormKind::EditSubject(subject.id),
            vec![FormField::new("Name", subject.name.clone())],
        );
        form.color = subject.color.clone();
        form
    }

    pub fn new_plan(subject_index: usize) -> Self {
        let mut form = Self::with_fields(
            FormKind::NewPlan,
            vec![FormField::new("Target (minutes)", "")],
        );
        form.subject_index = subject_index;
        form
    }

    pub fn new_note() -> Self {
        Self::with_fields(
            FormKind::NewNote,
            vec![FormField::new("Title", ""), FormField::new("Content", "")],
        )
    }

    pub fn edit_note(note: &Note) -> Self {
        Self::with_fields(
            FormKind::EditNote(note.id),
            vec![
                FormField::new("Title", note.title.clone()),
                FormField::new("Content", note.content.clone()),
            ],
        )
    }

    pub fn timer_note(current: &str) -> Self {
        Self::with_fields(FormKind::TimerNote, vec![FormField::new("Note", current)])
    }

    pub fn picker(&self) -> Picker {
        match self.kind {
            FormKind::NewSubject | FormKind::EditSubject(_) => Picker::Color,
            FormKind::NewPlan => Picker::Subject,
            _ => Picker::None,
        }
    }

    /// Trimmed value of the field at `index`
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.trim())
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Cycle the picker; `subject_count` bounds the subject picker
    pub fn cycle(&mut self, forward: bool, subject_count: usize) {
        match self.picker() {
            Picker::Color => {
                let len = SUBJECT_COLORS.len();
                let current = SUBJECT_COLORS
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(&self.color))
                    .unwrap_or(0);
                let next = if forward {
                    (current + 1) % len
                } else {
                    (current + len - 1) % len
                };
                self.color = SUBJECT_COLORS[next].to_string();
            }
            Picker::Subject if subject_count > 0 => {
                self.subject_index = if forward {
                    (self.subject_index + 1) % subject_count
                } else {
                    (self.subject_index + subject_count - 1) % subject_count
                };
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = Form::new_note();
        form.push_char('a');
        form.next_field();
        form.push_char('b');
        form.push_char('c');
        form.pop_char();
        assert_eq!(form.value(0), "a");
        assert_eq!(form.value(1), "b");

        form.next_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_typing_clears_error() {
        let mut form = Form::new_subject();
        form.error = Some("Enter a subject name");
        form.push_char('M');
        assert_eq!(form.error, None);
    }

    #[test]
    fn test_color_picker_wraps_both_ways() {
        let mut form = Form::new_subject();
        form.cycle(false, 0);
        assert_eq!(form.color, SUBJECT_COLORS[SUBJECT_COLORS.len() - 1]);
        form.cycle(true, 0);
        assert_eq!(form.color, SUBJECT_COLORS[0]);
    }

    #[test]
    fn test_subject_picker_bounded_by_count() {
        let mut form = Form::new_plan(0);
        form.cycle(true, 3);
        form.cycle(true, 3);
        form.cycle(true, 3);
        assert_eq!(form.subject_index, 0);
        form.cycle(false, 3);
        assert_eq!(form.subject_index, 2);
        form.cycle(true, 0);
        assert_eq!(form.subject_index, 2);
    }

    #[test]
    fn test_note_forms_have_no_picker() {
        assert_eq!(Form::new_note().picker(), Picker::None);
        assert_eq!(Form::timer_note("x").picker(), Picker::None);
        assert_eq!(Form::timer_note("x").value(0), "x");
    }
}
