use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, warn};

use crate::model::{ActivityType, Difficulty, Filter, Status, Task, TaskDraft, Weekday};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not open database {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error("could not create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("task not found: {0}")]
    NotFound(i64),
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT,
    status          TEXT,
    day             TEXT,
    day_num         INTEGER,
    start_time      TEXT,
    end_time        TEXT,
    difficulty      TEXT,
    activity_type   TEXT
)";

const SELECT_TASKS: &str = "SELECT id, name, status, day, day_num, start_time, end_time, difficulty, activity_type FROM tasks";
const ORDER_BY: &str = "ORDER BY day_num, start_time";

/// Handle to the SQLite task database. Every call opens its own
/// connection, runs one statement and commits it.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open the database at `path`, creating the file, its directory and the
    /// `tasks` table if they don't exist yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let store = Store {
            path: path.to_path_buf(),
        };
        store.connect()?.execute(SCHEMA, [])?;
        debug!(path = %path.display(), "store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path).map_err(|e| StoreError::Open {
            path: self.path.clone(),
            source: e,
        })
    }

    /// All tasks matching `filter`, ordered by `(day_num, start_time)`
    pub fn list(&self, filter: Filter) -> Result<Vec<Task>, StoreError> {
        let conn = self.connect()?;
        // NULL or unknown statuses read as incomplete, so they belong to that tab
        let condition = match filter {
            Filter::All => "",
            Filter::Incomplete => "WHERE status IS NOT 'complete'",
            Filter::Complete => "WHERE status = 'complete'",
        };
        let mut stmt = conn.prepare(&format!("{SELECT_TASKS} {condition} {ORDER_BY}"))?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(?filter, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let conn = self.connect()?;
        let task = conn
            .query_row(
                &format!("{SELECT_TASKS} WHERE id = ?1"),
                params![id],
                task_from_row,
            )
            .optional()?;
        Ok(task)
    }

    /// Insert a task with only a name. Every other column stays NULL.
    pub fn insert_quick(&self, name: &str) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO tasks (name, status) VALUES (?1, ?2)",
            params![name, Status::Incomplete.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a fully described task. Status always starts incomplete and
    /// `day_num` is derived from the day.
    pub fn insert(&self, draft: &TaskDraft) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO tasks (name, status, day, day_num, start_time, end_time, difficulty, activity_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.name,
                Status::Incomplete.as_str(),
                draft.day.map(Weekday::label),
                draft.day_num(),
                draft.start_time,
                draft.end_time,
                draft.difficulty.map(Difficulty::label),
                draft.activity_type.map(ActivityType::label),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Overwrite every editable field of a task. Status is left alone.
    pub fn update(&self, id: i64, draft: &TaskDraft) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE tasks SET name = ?1, day = ?2, day_num = ?3, start_time = ?4, end_time = ?5,
             difficulty = ?6, activity_type = ?7 WHERE id = ?8",
            params![
                draft.name,
                draft.day.map(Weekday::label),
                draft.day_num(),
                draft.start_time,
                draft.end_time,
                draft.difficulty.map(Difficulty::label),
                draft.activity_type.map(ActivityType::label),
                id,
            ],
        )?;
        expect_one(changed, id)
    }

    pub fn set_status(&self, id: i64, status: Status) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        expect_one(changed, id)
    }

    /// Rewrite the stored sort key of one row
    pub fn set_day_num(&self, id: i64, day_num: u8) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE tasks SET day_num = ?1 WHERE id = ?2",
            params![day_num, id],
        )?;
        expect_one(changed, id)
    }

    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        expect_one(changed, id)
    }
}

fn expect_one(changed: usize, id: i64) -> Result<(), StoreError> {
    if changed == 0 {
        Err(StoreError::NotFound(id))
    } else {
        Ok(())
    }
}

/// Build a task from a row in `SELECT_TASKS` column order. Unknown labels
/// read back as unset rather than failing the whole query.
fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    let day: Option<String> = row.get(3)?;
    let difficulty: Option<String> = row.get(7)?;
    let activity_type: Option<String> = row.get(8)?;

    Ok(Task {
        id,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        status: Status::from_stored(row.get::<_, Option<String>>(2)?.as_deref()),
        day: lenient(id, "day", day, Weekday::from_label),
        day_num: row
            .get::<_, Option<i64>>(4)?
            .and_then(|n| u8::try_from(n).ok()),
        start_time: row.get(5)?,
        end_time: row.get(6)?,
        difficulty: lenient(id, "difficulty", difficulty, Difficulty::from_label),
        activity_type: lenient(id, "activity_type", activity_type, ActivityType::from_label),
    })
}

fn lenient<T>(id: i64, column: &str, value: Option<String>, parse: fn(&str) -> Option<T>) -> Option<T> {
    let value = value?;
    if value.is_empty() {
        return None;
    }
    let parsed = parse(&value);
    if parsed.is_none() {
        warn!(id, column, value = %value, "unrecognized stored value, treating as unset");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Store) {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(&tmp.path().join("tasks.db")).unwrap();
        (tmp, store)
    }

    fn draft(name: &str, day: Option<Weekday>, start: &str) -> TaskDraft {
        TaskDraft {
            name: name.into(),
            day,
            start_time: Some(start.into()),
            end_time: Some("23:00".into()),
            difficulty: Some(Difficulty::Medium),
            activity_type: Some(ActivityType::Work),
        }
    }

    #[test]
    fn open_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/tasks.db");
        let store = Store::open(&path).unwrap();
        store.insert_quick("keep me").unwrap();
        let again = Store::open(&path).unwrap();
        assert_eq!(again.list(Filter::All).unwrap().len(), 1);
    }

    #[test]
    fn quick_insert_leaves_fields_null() {
        let (_tmp, store) = temp_store();
        let id = store.insert_quick("Buy milk").unwrap();
        let task = store.get(id).unwrap().unwrap();
        assert_eq!(task, Task::quick(id, "Buy milk"));
    }

    #[test]
    fn insert_derives_day_num_and_forces_incomplete() {
        let (_tmp, store) = temp_store();
        let id = store
            .insert(&draft("Gym", Some(Weekday::Friday), "18:00"))
            .unwrap();
        let task = store.get(id).unwrap().unwrap();
        assert_eq!(task.day, Some(Weekday::Friday));
        assert_eq!(task.day_num, Some(5));
        assert_eq!(task.status, Status::Incomplete);
        assert_eq!(task.difficulty, Some(Difficulty::Medium));
        assert_eq!(task.activity_type, Some(ActivityType::Work));
    }

    #[test]
    fn insert_without_day_stores_day_num_one() {
        let (_tmp, store) = temp_store();
        let id = store.insert(&draft("Floating", None, "")).unwrap();
        let task = store.get(id).unwrap().unwrap();
        assert_eq!(task.day, None);
        assert_eq!(task.day_num, Some(1));
    }

    #[test]
    fn ids_are_monotonic() {
        let (_tmp, store) = temp_store();
        let a = store.insert_quick("a").unwrap();
        let b = store.insert_quick("b").unwrap();
        store.delete(b).unwrap();
        let c = store.insert_quick("c").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn list_orders_by_day_num_then_start_time() {
        let (_tmp, store) = temp_store();
        store
            .insert(&draft("nine", Some(Weekday::Tuesday), "9:00"))
            .unwrap();
        store
            .insert(&draft("ten", Some(Weekday::Tuesday), "10:00"))
            .unwrap();
        store
            .insert(&draft("mon", Some(Weekday::Monday), "12:00"))
            .unwrap();
        let names: Vec<String> = store
            .list(Filter::All)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        // string order: "10:00" < "9:00"
        assert_eq!(names, vec!["mon", "ten", "nine"]);
    }

    #[test]
    fn list_filters_by_status() {
        let (_tmp, store) = temp_store();
        let a = store.insert_quick("a").unwrap();
        store.insert_quick("b").unwrap();
        store.set_status(a, Status::Complete).unwrap();

        let complete = store.list(Filter::Complete).unwrap();
        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].id, a);

        let incomplete = store.list(Filter::Incomplete).unwrap();
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].name, "b");

        assert_eq!(store.list(Filter::All).unwrap().len(), 2);
    }

    #[test]
    fn null_or_unknown_status_lists_as_incomplete() {
        let (_tmp, store) = temp_store();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute("INSERT INTO tasks (name) VALUES ('legacy')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO tasks (name, status) VALUES ('odd', 'done?')",
            [],
        )
        .unwrap();
        let done = store.insert_quick("done").unwrap();
        store.set_status(done, Status::Complete).unwrap();

        let names = |filter| -> Vec<String> {
            let mut names: Vec<String> = store
                .list(filter)
                .unwrap()
                .into_iter()
                .map(|t| t.name)
                .collect();
            names.sort();
            names
        };
        assert_eq!(names(Filter::Incomplete), vec!["legacy", "odd"]);
        assert_eq!(names(Filter::Complete), vec!["done"]);
        assert_eq!(names(Filter::All).len(), 3);

        for task in store.list(Filter::Incomplete).unwrap() {
            assert_eq!(task.status, Status::Incomplete);
        }
    }

    #[test]
    fn update_rewrites_fields_but_not_status() {
        let (_tmp, store) = temp_store();
        let id = store
            .insert(&draft("Old", Some(Weekday::Monday), "08:00"))
            .unwrap();
        store.set_status(id, Status::Complete).unwrap();

        let mut new = draft("New", Some(Weekday::Sunday), "20:00");
        new.difficulty = None;
        store.update(id, &new).unwrap();

        let task = store.get(id).unwrap().unwrap();
        assert_eq!(task.name, "New");
        assert_eq!(task.day, Some(Weekday::Sunday));
        assert_eq!(task.day_num, Some(7));
        assert_eq!(task.difficulty, None);
        assert_eq!(task.status, Status::Complete);
    }

    #[test]
    fn missing_rows_are_not_found() {
        let (_tmp, store) = temp_store();
        assert!(matches!(store.delete(42), Err(StoreError::NotFound(42))));
        assert!(matches!(
            store.set_status(42, Status::Complete),
            Err(StoreError::NotFound(42))
        ));
        assert!(matches!(
            store.update(42, &TaskDraft::default()),
            Err(StoreError::NotFound(42))
        ));
        assert_eq!(store.get(42).unwrap(), None);
    }

    #[test]
    fn delete_is_permanent() {
        let (_tmp, store) = temp_store();
        let id = store.insert_quick("gone").unwrap();
        store.delete(id).unwrap();
        for filter in Filter::ALL {
            assert!(store.list(filter).unwrap().is_empty());
        }
    }

    #[test]
    fn unknown_labels_read_as_unset() {
        let (_tmp, store) = temp_store();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO tasks (name, status, day, day_num, difficulty, activity_type)
             VALUES ('odd', 'weird', 'Funday', 3, '', 'Sleep')",
            [],
        )
        .unwrap();
        let tasks = store.list(Filter::All).unwrap();
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.status, Status::Incomplete);
        assert_eq!(task.day, None);
        assert_eq!(task.day_num, Some(3));
        assert_eq!(task.difficulty, None);
        assert_eq!(task.activity_type, None);
    }

    #[test]
    fn opens_existing_database_with_stored_labels() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("database.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute(SCHEMA, []).unwrap();
            conn.execute(
                "INSERT INTO tasks (name, status, day, day_num, start_time, end_time, difficulty, activity_type)
                 VALUES ('Estudar', 'complete', 'Quarta-feira', 3, '14:00', '15:00', 'Difícil', 'Estudo')",
                [],
            )
            .unwrap();
        }
        let store = Store::open(&path).unwrap();
        let task = store.list(Filter::Complete).unwrap().remove(0);
        assert_eq!(task.day, Some(Weekday::Wednesday));
        assert_eq!(task.difficulty, Some(Difficulty::Hard));
        assert_eq!(task.activity_type, Some(ActivityType::Study));
    }
}
