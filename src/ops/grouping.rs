use std::cmp::Ordering;

use chrono::NaiveTime;

use crate::model::{Task, TimeOrder, Weekday};

/// Header text for tasks that have no day
pub const UNSCHEDULED_LABEL: &str = "Sem dia";

/// Tasks of one weekday, sorted by start time. `day == None` collects
/// quick-added tasks and always comes last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub day: Option<Weekday>,
    pub tasks: Vec<&'a Task>,
}

impl DayGroup<'_> {
    pub fn label(&self) -> &'static str {
        self.day.map_or(UNSCHEDULED_LABEL, Weekday::label)
    }
}

/// One line of the rendered list: a day header, or a task with its
/// position in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRow<'a> {
    Header(Option<Weekday>),
    Task { index: usize, task: &'a Task },
}

/// Bucket tasks by weekday in Monday..Sunday order, then unscheduled.
/// Empty buckets are omitted. Sorting within a bucket is stable.
pub fn group_by_day(tasks: &[Task], order: TimeOrder) -> Vec<DayGroup<'_>> {
    let mut buckets: Vec<Vec<&Task>> = vec![Vec::new(); Weekday::ALL.len() + 1];
    for task in tasks {
        let slot = task
            .day
            .map_or(Weekday::ALL.len(), |d| d.ordinal() as usize - 1);
        buckets[slot].push(task);
    }

    let days = Weekday::ALL.iter().copied().map(Some).chain([None]);
    days.zip(buckets)
        .filter(|(_, tasks)| !tasks.is_empty())
        .map(|(day, mut tasks)| {
            tasks.sort_by(|a, b| compare_start(a, b, order));
            DayGroup { day, tasks }
        })
        .collect()
}

/// Tasks in the order they are displayed, headers excluded
pub fn display_order(groups: &[DayGroup<'_>]) -> Vec<i64> {
    groups
        .iter()
        .flat_map(|g| g.tasks.iter().map(|t| t.id))
        .collect()
}

/// Header then tasks for each group
pub fn build_rows<'a>(groups: &[DayGroup<'a>]) -> Vec<ListRow<'a>> {
    let mut rows = Vec::new();
    let mut index = 0;
    for group in groups {
        rows.push(ListRow::Header(group.day));
        for task in &group.tasks {
            rows.push(ListRow::Task { index, task });
            index += 1;
        }
    }
    rows
}

fn compare_start(a: &Task, b: &Task, order: TimeOrder) -> Ordering {
    match order {
        TimeOrder::Lexical => a.start_time_str().cmp(b.start_time_str()),
        TimeOrder::Clock => clock_key(a.start_time_str()).cmp(&clock_key(b.start_time_str())),
    }
}

/// Missing times first, then parsed times of day, then anything unparseable
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum ClockKey<'a> {
    Missing,
    Time(NaiveTime),
    Unparsed(&'a str),
}

const TIME_FORMATS: [&str; 3] = ["%H:%M", "%H:%M:%S", "%Hh%M"];

fn clock_key(s: &str) -> ClockKey<'_> {
    let t = s.trim();
    if t.is_empty() {
        return ClockKey::Missing;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(t, fmt).ok())
        .map_or(ClockKey::Unparsed(t), ClockKey::Time)
}
