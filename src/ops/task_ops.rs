use tracing::info;

use crate::io::store::{Store, StoreError};
use crate::model::{ActivityType, Difficulty, Status, TaskDraft, UnknownOption, Weekday};

/// Input that can't be turned into a task
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error(transparent)]
    UnknownOption(#[from] UnknownOption),
}

/// Everything a task operation can fail with
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("could not save: {0}")]
    Persistence(#[from] StoreError),
}

impl TaskError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }
}

/// Raw form input, as typed into the dialog or passed on the command line.
/// Picker values are already typed; free-text fields are untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub day: Option<Weekday>,
    pub start_time: String,
    pub end_time: String,
    pub difficulty: Option<Difficulty>,
    pub activity_type: Option<ActivityType>,
}

impl TaskForm {
    /// Pre-populate from an existing task's editable fields
    pub fn from_draft(draft: &TaskDraft) -> Self {
        TaskForm {
            title: draft.name.clone(),
            day: draft.day,
            start_time: draft.start_time.clone().unwrap_or_default(),
            end_time: draft.end_time.clone().unwrap_or_default(),
            difficulty: draft.difficulty,
            activity_type: draft.activity_type,
        }
    }

    /// Trim text fields and reject a blank title. Blank times become unset.
    pub fn validate(&self) -> Result<TaskDraft, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(TaskDraft {
            name: title.to_string(),
            day: self.day,
            start_time: non_blank(&self.start_time),
            end_time: non_blank(&self.end_time),
            difficulty: self.difficulty,
            activity_type: self.activity_type,
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Parse an optional picker argument, accepting labels or English names
pub fn parse_option<T>(value: Option<&str>) -> Result<Option<T>, ValidationError>
where
    T: std::str::FromStr<Err = UnknownOption>,
{
    value
        .map(str::parse::<T>)
        .transpose()
        .map_err(ValidationError::from)
}

/// Insert from the quick-add field. A blank name is ignored and yields `None`.
pub fn quick_add(store: &Store, name: &str) -> Result<Option<i64>, TaskError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    let id = store.insert_quick(name)?;
    info!(id, name, "quick-added task");
    Ok(Some(id))
}

/// Insert from the add dialog
pub fn add_task(store: &Store, form: &TaskForm) -> Result<i64, TaskError> {
    let draft = form.validate()?;
    let id = store.insert(&draft)?;
    info!(id, name = %draft.name, day_num = draft.day_num(), "added task");
    Ok(id)
}

/// Apply the edit dialog to an existing task
pub fn edit_task(store: &Store, id: i64, form: &TaskForm) -> Result<(), TaskError> {
    let draft = form.validate()?;
    store.update(id, &draft)?;
    info!(id, name = %draft.name, day_num = draft.day_num(), "edited task");
    Ok(())
}

/// Checkbox path: the only way status changes
pub fn set_status(store: &Store, id: i64, status: Status) -> Result<(), TaskError> {
    store.set_status(id, status)?;
    info!(id, status = status.as_str(), "changed status");
    Ok(())
}

pub fn delete_task(store: &Store, id: i64) -> Result<(), TaskError> {
    store.delete(id)?;
    info!(id, "deleted task");
    Ok(())
}
