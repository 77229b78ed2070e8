use serde::Serialize;

use crate::model::{DayRecord, RoadmapDocument};

/// Completed vs. total task counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Whole percent done, rounded down. `None` when there is nothing to do.
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        Some((self.completed * 100 / self.total) as u8)
    }

    /// Fraction done in `0.0..=1.0`; an empty set counts as zero.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }

    fn add(self, other: Self) -> Self {
        Self {
            completed: self.completed + other.completed,
            total: self.total + other.total,
        }
    }
}

pub fn of_day(day: &DayRecord) -> Progress {
    Progress {
        completed: day.tasks.iter().filter(|t| t.status.is_done()).count(),
        total: day.tasks.len(),
    }
}

pub fn overall(doc: &RoadmapDocument) -> Progress {
    doc.days()
        .map(|(_, day)| of_day(day))
        .fold(Progress::default(), Progress::add)
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(flatten)]
    pub progress: Progress,
}

/// Overall and per-day progress, days in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    #[serde(flatten)]
    pub overall: Progress,
    pub percent: Option<u8>,
    pub days: Vec<DaySummary>,
}

impl ProgressReport {
    pub fn build(doc: &RoadmapDocument) -> Self {
        let overall = overall(doc);
        let days = doc
            .sorted_day_ids()
            .into_iter()
            .filter_map(|id| doc.day(id).map(|day| (id, day)))
            .map(|(id, day)| DaySummary {
                id: id.to_string(),
                date: day.date.clone(),
                focus: day.focus.clone(),
                progress: of_day(day),
            })
            .collect();
        Self {
            overall,
            percent: overall.percent(),
            days,
        }
    }
}
