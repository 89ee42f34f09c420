use crate::model::{ActivityType, Difficulty, Task, Weekday};
use crate::ops::task_ops::TaskForm;

use super::line_edit::LineEdit;

/// Which flow the dialog belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Add,
    Edit { id: i64 },
}

/// Dialog fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Day,
    StartTime,
    EndTime,
    Difficulty,
    Activity,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Day,
        FormField::StartTime,
        FormField::EndTime,
        FormField::Difficulty,
        FormField::Activity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Título da Tarefa",
            FormField::Day => "Dia da Semana",
            FormField::StartTime => "Horário de Início",
            FormField::EndTime => "Horário de Término",
            FormField::Difficulty => "Dificuldade",
            FormField::Activity => "Tipo de Atividade",
        }
    }

    pub fn is_picker(self) -> bool {
        matches!(
            self,
            FormField::Day | FormField::Difficulty | FormField::Activity
        )
    }

    fn position(self) -> usize {
        FormField::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or(0)
    }
}

/// An open add/edit form
#[derive(Debug, Clone)]
pub struct Dialog {
    pub kind: DialogKind,
    pub focus: FormField,
    pub title: LineEdit,
    pub day: Option<Weekday>,
    pub start_time: LineEdit,
    pub end_time: LineEdit,
    pub difficulty: Option<Difficulty>,
    pub activity_type: Option<ActivityType>,
    /// Why the last confirm was refused; cleared on the next edit
    pub error: Option<String>,
}

impl Dialog {
    pub fn add() -> Self {
        Dialog::from_form(DialogKind::Add, &TaskForm::default())
    }

    /// Edit form pre-populated from `task`
    pub fn edit(task: &Task) -> Self {
        let form = TaskForm::from_draft(&task.to_draft());
        Dialog::from_form(DialogKind::Edit { id: task.id }, &form)
    }

    fn from_form(kind: DialogKind, form: &TaskForm) -> Self {
        Dialog {
            kind,
            focus: FormField::Title,
            title: LineEdit::with_text(&form.title),
            day: form.day,
            start_time: LineEdit::with_text(&form.start_time),
            end_time: LineEdit::with_text(&form.end_time),
            difficulty: form.difficulty,
            activity_type: form.activity_type,
            error: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.kind {
            DialogKind::Add => "Adicionar Tarefa",
            DialogKind::Edit { .. } => "Editar Tarefa",
        }
    }

    pub fn to_form(&self) -> TaskForm {
        TaskForm {
            title: self.title.as_str().to_string(),
            day: self.day,
            start_time: self.start_time.as_str().to_string(),
            end_time: self.end_time.as_str().to_string(),
            difficulty: self.difficulty,
            activity_type: self.activity_type,
        }
    }

    pub fn focus_next(&mut self) {
        let i = (self.focus.position() + 1) % FormField::ALL.len();
        self.focus = FormField::ALL[i];
    }

    pub fn focus_prev(&mut self) {
        let n = FormField::ALL.len();
        let i = (self.focus.position() + n - 1) % n;
        self.focus = FormField::ALL[i];
    }

    /// The text buffer under focus, if the focused field is free text
    pub fn focused_text(&mut self) -> Option<&mut LineEdit> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::StartTime => Some(&mut self.start_time),
            FormField::EndTime => Some(&mut self.end_time),
            _ => None,
        }
    }

    /// Step the focused picker through unset and each option
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Day => self.day = cycle_option(self.day, &Weekday::ALL, forward),
            FormField::Difficulty => {
                self.difficulty = cycle_option(self.difficulty, &Difficulty::ALL, forward)
            }
            FormField::Activity => {
                self.activity_type = cycle_option(self.activity_type, &ActivityType::ALL, forward)
            }
            _ => {}
        }
    }

    /// Reset the focused picker to unset
    pub fn clear_picker(&mut self) {
        match self.focus {
            FormField::Day => self.day = None,
            FormField::Difficulty => self.difficulty = None,
            FormField::Activity => self.activity_type = None,
            _ => {}
        }
    }

    /// Display text of a field's current value
    pub fn value_text(&self, field: FormField) -> &str {
        match field {
            FormField::Title => self.title.as_str(),
            FormField::Day => self.day.map_or("", Weekday::label),
            FormField::StartTime => self.start_time.as_str(),
            FormField::EndTime => self.end_time.as_str(),
            FormField::Difficulty => self.difficulty.map_or("", Difficulty::label),
            FormField::Activity => self.activity_type.map_or("", ActivityType::label),
        }
    }
}

/// `None` sits before the first option and after the last
fn cycle_option<T: Copy + PartialEq>(current: Option<T>, all: &[T], forward: bool) -> Option<T> {
    let n = all.len() + 1;
    let pos = current
        .and_then(|c| all.iter().position(|x| *x == c))
        .map_or(0, |i| i + 1);
    let next = if forward { (pos + 1) % n } else { (pos + n - 1) % n };
    if next == 0 { None } else { Some(all[next - 1]) }
}
