use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion state of a task, stored as `"incomplete"` / `"complete"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Incomplete,
    Complete,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Incomplete => "incomplete",
            Status::Complete => "complete",
        }
    }

    /// Read a stored status. Anything other than `complete` counts as incomplete.
    pub fn from_stored(s: Option<&str>) -> Status {
        match s {
            Some("complete") => Status::Complete,
            _ => Status::Incomplete,
        }
    }

    pub fn is_complete(self) -> bool {
        self == Status::Complete
    }

    pub fn toggled(self) -> Status {
        match self {
            Status::Incomplete => Status::Complete,
            Status::Complete => Status::Incomplete,
        }
    }
}

/// Labels are the strings written to the `day` column. Keep them stable:
/// existing databases are keyed on them.
const WEEKDAY_LABELS: [&str; 7] = [
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
    "Domingo",
];

const WEEKDAY_ALIASES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Day of the week a task is scheduled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in display order
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Canonical ordinal, Monday = 1 through Sunday = 7
    pub fn ordinal(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn label(self) -> &'static str {
        WEEKDAY_LABELS[self.index()]
    }

    /// Match a stored label exactly
    pub fn from_label(s: &str) -> Option<Weekday> {
        WEEKDAY_LABELS
            .iter()
            .position(|l| *l == s)
            .map(|i| Weekday::ALL[i])
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The one mapping from a weekday to the `day_num` sort key.
/// Unset days sort as Monday.
pub fn day_num_for(day: Option<Weekday>) -> u8 {
    day.map_or(1, Weekday::ordinal)
}

const DIFFICULTY_LABELS: [&str; 3] = ["Fácil", "Médio", "Difícil"];
const DIFFICULTY_ALIASES: [&str; 3] = ["easy", "medium", "hard"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        DIFFICULTY_LABELS[self as usize]
    }

    pub fn from_label(s: &str) -> Option<Difficulty> {
        DIFFICULTY_LABELS
            .iter()
            .position(|l| *l == s)
            .map(|i| Difficulty::ALL[i])
    }
}

const ACTIVITY_LABELS: [&str; 3] = ["Estudo", "Trabalho", "Lazer"];
const ACTIVITY_ALIASES: [&str; 3] = ["study", "work", "leisure"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Study,
    Work,
    Leisure,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] =
        [ActivityType::Study, ActivityType::Work, ActivityType::Leisure];

    pub fn label(self) -> &'static str {
        ACTIVITY_LABELS[self as usize]
    }

    pub fn from_label(s: &str) -> Option<ActivityType> {
        ACTIVITY_LABELS
            .iter()
            .position(|l| *l == s)
            .map(|i| ActivityType::ALL[i])
    }
}

/// Case-insensitive lookup against both the stored labels and the English aliases
fn lookup(input: &str, labels: &[&str], aliases: &[&str]) -> Option<usize> {
    let needle = input.trim().to_lowercase();
    labels
        .iter()
        .position(|l| l.to_lowercase() == needle)
        .or_else(|| aliases.iter().position(|a| *a == needle))
}

/// Error for a picker value that names no known option
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Weekday {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s, &WEEKDAY_LABELS, &WEEKDAY_ALIASES)
            .map(|i| Weekday::ALL[i])
            .ok_or_else(|| UnknownOption {
                kind: "weekday",
                value: s.to_string(),
            })
    }
}

impl FromStr for Difficulty {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s, &DIFFICULTY_LABELS, &DIFFICULTY_ALIASES)
            .map(|i| Difficulty::ALL[i])
            .ok_or_else(|| UnknownOption {
                kind: "difficulty",
                value: s.to_string(),
            })
    }
}

impl FromStr for ActivityType {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s, &ACTIVITY_LABELS, &ACTIVITY_ALIASES)
            .map(|i| ActivityType::ALL[i])
            .ok_or_else(|| UnknownOption {
                kind: "activity type",
                value: s.to_string(),
            })
    }
}

/// One row of the `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub day: Option<Weekday>,
    /// Stored sort key. Normally `day_num_for(day)`, but read back as-is so
    /// drift can be detected.
    pub day_num: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub activity_type: Option<ActivityType>,
}

impl Task {
    /// A task as produced by the quick-add field: name and status only
    pub fn quick(id: i64, name: impl Into<String>) -> Self {
        Task {
            id,
            name: name.into(),
            status: Status::Incomplete,
            day: None,
            day_num: None,
            start_time: None,
            end_time: None,
            difficulty: None,
            activity_type: None,
        }
    }

    pub fn start_time_str(&self) -> &str {
        self.start_time.as_deref().unwrap_or("")
    }

    pub fn end_time_str(&self) -> &str {
        self.end_time.as_deref().unwrap_or("")
    }

    /// The editable fields of this task, for pre-populating the edit dialog
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            day: self.day,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            difficulty: self.difficulty,
            activity_type: self.activity_type,
        }
    }
}

/// Every field the add/edit dialog writes. Status and `day_num` are not
/// here: status only changes through the checkbox, `day_num` is derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub day: Option<Weekday>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub activity_type: Option<ActivityType>,
}

impl TaskDraft {
    pub fn day_num(&self) -> u8 {
        day_num_for(self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_run_monday_to_sunday() {
        let nums: Vec<u8> = Weekday::ALL.iter().map(|d| d.ordinal()).collect();
        assert_eq!(nums, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn day_num_defaults_to_monday() {
        assert_eq!(day_num_for(None), 1);
        assert_eq!(day_num_for(Some(Weekday::Sunday)), 7);
        assert_eq!(day_num_for(Some(Weekday::Wednesday)), 3);
    }

    #[test]
    fn labels_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_label(day.label()), Some(day));
        }
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_label(d.label()), Some(d));
        }
        for a in ActivityType::ALL {
            assert_eq!(ActivityType::from_label(a.label()), Some(a));
        }
    }

    #[test]
    fn from_label_is_exact() {
        assert_eq!(Weekday::from_label("segunda-feira"), None);
        assert_eq!(Weekday::from_label("Monday"), None);
    }

    #[test]
    fn parse_accepts_labels_and_aliases() {
        assert_eq!("Sábado".parse::<Weekday>(), Ok(Weekday::Saturday));
        assert_eq!("sábado".parse::<Weekday>(), Ok(Weekday::Saturday));
        assert_eq!("friday".parse::<Weekday>(), Ok(Weekday::Friday));
        assert_eq!(" Tuesday ".parse::<Weekday>(), Ok(Weekday::Tuesday));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Médio".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("lazer".parse::<ActivityType>(), Ok(ActivityType::Leisure));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "someday".parse::<Weekday>().unwrap_err();
        assert_eq!(err.kind, "weekday");
        assert_eq!(err.to_string(), "unknown weekday: someday");
        assert!("trivial".parse::<Difficulty>().is_err());
    }

    #[test]
    fn status_from_stored_is_lenient() {
        assert_eq!(Status::from_stored(Some("complete")), Status::Complete);
        assert_eq!(Status::from_stored(Some("incomplete")), Status::Incomplete);
        assert_eq!(Status::from_stored(None), Status::Incomplete);
        assert_eq!(Status::from_stored(Some("done")), Status::Incomplete);
    }

    #[test]
    fn status_toggle() {
        assert_eq!(Status::Incomplete.toggled(), Status::Complete);
        assert_eq!(Status::Complete.toggled(), Status::Incomplete);
    }

    #[test]
    fn draft_from_task_keeps_fields() {
        let mut task = Task::quick(4, "Read");
        task.day = Some(Weekday::Thursday);
        task.start_time = Some("08:00".into());
        task.difficulty = Some(Difficulty::Easy);
        let draft = task.to_draft();
        assert_eq!(draft.name, "Read");
        assert_eq!(draft.day, Some(Weekday::Thursday));
        assert_eq!(draft.day_num(), 4);
        assert_eq!(draft.start_time.as_deref(), Some("08:00"));
        assert_eq!(draft.end_time, None);
    }
}
