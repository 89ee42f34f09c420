use serde::Serialize;

use crate::model::{ActivityType, Difficulty, Task, Weekday};
use crate::ops::grouping::DayGroup;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// A task as the database stores it, labels included
#[derive(Serialize)]
pub struct TaskJson {
    pub id: i64,
    pub name: String,
    pub status: &'static str,
    pub day: Option<&'static str>,
    pub day_num: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub difficulty: Option<&'static str>,
    pub activity_type: Option<&'static str>,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: i64,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        name: task.name.clone(),
        status: task.status.as_str(),
        day: task.day.map(Weekday::label),
        day_num: task.day_num,
        start_time: task.start_time.clone(),
        end_time: task.end_time.clone(),
        difficulty: task.difficulty.map(Difficulty::label),
        activity_type: task.activity_type.map(ActivityType::label),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Format a task as a single line: `[x] #12 Name  09:00-10:00  Fácil  Estudo`
pub fn format_task_line(task: &Task) -> String {
    let check = if task.status.is_complete() { 'x' } else { ' ' };
    let mut line = format!("[{}] #{} {}", check, task.id, task.name);

    let time = match (task.start_time.as_deref(), task.end_time.as_deref()) {
        (Some(s), Some(e)) => format!("{}-{}", s, e),
        (Some(s), None) => s.to_string(),
        (None, Some(e)) => format!("-{}", e),
        (None, None) => String::new(),
    };
    let details = [
        time.as_str(),
        task.difficulty.map_or("", Difficulty::label),
        task.activity_type.map_or("", ActivityType::label),
    ];
    for d in details.iter().filter(|d| !d.is_empty()) {
        line.push_str("  ");
        line.push_str(d);
    }
    line
}

/// Day headers with their tasks indented below, blank line between days
pub fn format_grouped_listing(groups: &[DayGroup<'_>]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(group.label().to_string());
        for task in &group.tasks {
            lines.push(format!("  {}", format_task_line(task)));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, TimeOrder};
    use crate::ops::grouping::group_by_day;
    use pretty_assertions::assert_eq;

    #[test]
    fn task_line_skips_blank_details() {
        let mut task = Task::quick(3, "Buy milk");
        assert_eq!(format_task_line(&task), "[ ] #3 Buy milk");

        task.status = Status::Complete;
        task.start_time = Some("09:00".into());
        task.end_time = Some("10:00".into());
        task.activity_type = Some(ActivityType::Study);
        assert_eq!(
            format_task_line(&task),
            "[x] #3 Buy milk  09:00-10:00  Estudo"
        );
    }

    #[test]
    fn listing_groups_days() {
        let mut mon = Task::quick(1, "Standup");
        mon.day = Some(Weekday::Monday);
        let loose = Task::quick(2, "Call mom");
        let tasks = vec![loose, mon];
        let lines = format_grouped_listing(&group_by_day(&tasks, TimeOrder::Lexical));
        assert_eq!(
            lines,
            vec![
                "Segunda-feira",
                "  [ ] #1 Standup",
                "",
                "Sem dia",
                "  [ ] #2 Call mom",
            ]
        );
    }

    #[test]
    fn json_uses_stored_labels() {
        let mut task = Task::quick(5, "Gym");
        task.day = Some(Weekday::Saturday);
        task.day_num = Some(6);
        task.difficulty = Some(Difficulty::Hard);
        let value = serde_json::to_value(task_to_json(&task)).unwrap();
        assert_eq!(value["status"], "incomplete");
        assert_eq!(value["day"], "Sábado");
        assert_eq!(value["day_num"], 6);
        assert_eq!(value["difficulty"], "Difícil");
        assert!(value["activity_type"].is_null());
    }
}
