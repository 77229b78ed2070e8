use std::cmp::Ordering;
use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Done,
}

impl Status {
    pub fn is_done(self) -> bool {
        self == Self::Done
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Done,
            Self::Done => Self::Pending,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub subject: String,
    pub topic: String,
    pub action: String,
    pub status: Status,
    /// Keys this tool does not know about, carried through load/save untouched.
    #[serde(flatten)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(flatten)]
    pub extensions: serde_json::Map<String, serde_json::Value>,
}

impl DayRecord {
    /// The `(date, focus)` pair shown in day headers. Either field may be
    /// absent in a hand-edited file; that only becomes an error here.
    pub fn heading(&self, day_id: &str) -> Result<(&str, &str)> {
        let date = self
            .date
            .as_deref()
            .ok_or_else(|| StudyError::MissingField(day_id.to_string(), "date"))?;
        let focus = self
            .focus
            .as_deref()
            .ok_or_else(|| StudyError::MissingField(day_id.to_string(), "focus"))?;
        Ok((date, focus))
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: i64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// The whole persisted roadmap: day id -> day record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RoadmapDocument {
    days: BTreeMap<String, DayRecord>,
}

impl RoadmapDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn contains_day(&self, day_id: &str) -> bool {
        self.days.contains_key(day_id)
    }

    pub fn day(&self, day_id: &str) -> Option<&DayRecord> {
        self.days.get(day_id)
    }

    pub fn day_mut(&mut self, day_id: &str) -> Option<&mut DayRecord> {
        self.days.get_mut(day_id)
    }

    pub fn insert(&mut self, day_id: impl Into<String>, day: DayRecord) -> Option<DayRecord> {
        self.days.insert(day_id.into(), day)
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &DayRecord)> {
        self.days.iter().map(|(id, day)| (id.as_str(), day))
    }

    /// Day ids in display order (see [`compare_day_ids`]).
    pub fn sorted_day_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.days.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| compare_day_ids(a, b));
        ids
    }

    /// Set one task's status. Returns whether the stored value changed.
    pub fn set_task_status(&mut self, day_id: &str, task_id: i64, status: Status) -> Result<bool> {
        let day = self
            .days
            .get_mut(day_id)
            .ok_or_else(|| StudyError::DayNotFound(day_id.to_string()))?;
        let task = day
            .task_mut(task_id)
            .ok_or_else(|| StudyError::TaskNotFound(day_id.to_string(), task_id))?;
        let changed = task.status != status;
        task.status = status;
        Ok(changed)
    }
}

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Total order over day ids.
///
/// All-digit ids sort first, by integer value; `"01"` and `"1"` are equal in
/// value and fall back to byte order. Every other id sorts after them in byte
/// order. Values are compared as digit strings so arbitrarily long ids never
/// overflow.
pub fn compare_day_ids(a: &str, b: &str) -> Ordering {
    match (is_numeric_id(a), is_numeric_id(b)) {
        (true, true) => {
            let a_digits = a.trim_start_matches('0');
            let b_digits = b.trim_start_matches('0');
            a_digits
                .len()
                .cmp(&b_digits.len())
                .then_with(|| a_digits.cmp(b_digits))
                .then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}
