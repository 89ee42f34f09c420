use serde::Serialize;

use crate::io::store::{Store, StoreError};
use crate::model::{Filter, Task, day_num_for};

/// Structured result from `wt check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub checked: usize,
    pub mismatches: Vec<DayNumMismatch>,
    /// Ids whose `day_num` was rewritten (only with --fix)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixed: Vec<i64>,
}

/// A row whose stored sort key disagrees with its day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayNumMismatch {
    pub id: i64,
    pub name: String,
    pub day: Option<String>,
    pub stored: Option<u8>,
    pub expected: u8,
}

/// Is `stored` an acceptable `day_num` for this task? Quick-added rows
/// (no day) may have no sort key at all.
fn day_num_ok(task: &Task) -> bool {
    match (task.day, task.day_num) {
        (None, None) => true,
        (day, Some(n)) => n == day_num_for(day),
        (Some(_), None) => false,
    }
}

/// Find every task whose `day_num` doesn't match `day_num_for(day)`.
///
/// Read-only; see `check_store` for the fixing variant.
pub fn check_day_nums(tasks: &[Task]) -> Vec<DayNumMismatch> {
    tasks
        .iter()
        .filter(|t| !day_num_ok(t))
        .map(|t| DayNumMismatch {
            id: t.id,
            name: t.name.clone(),
            day: t.day.map(|d| d.label().to_string()),
            stored: t.day_num,
            expected: day_num_for(t.day),
        })
        .collect()
}

/// Check every row in the store, optionally rewriting bad `day_num`s
pub fn check_store(store: &Store, fix: bool) -> Result<CheckResult, StoreError> {
    let tasks = store.list(Filter::All)?;
    let mismatches = check_day_nums(&tasks);
    let mut fixed = Vec::new();
    if fix {
        for m in &mismatches {
            store.set_day_num(m.id, m.expected)?;
            tracing::info!(id = m.id, from = ?m.stored, to = m.expected, "fixed day_num");
            fixed.push(m.id);
        }
    }
    Ok(CheckResult {
        valid: mismatches.is_empty() || fixed.len() == mismatches.len(),
        checked: tasks.len(),
        mismatches,
        fixed,
    })
}
