use crate::error::{Result, StudyError};
use crate::model::Status;
use crate::output::{self, Format};
use crate::store::RoadmapStore;

/// Set one task's status and write the whole roadmap back.
pub fn run(
    store: &RoadmapStore,
    day_id: &str,
    task_id: i64,
    status: Status,
    format: Format,
) -> Result<()> {
    let mut doc = store.load();
    doc.set_task_status(day_id, task_id, status)?;
    store.save(&doc)?;

    let task = doc
        .day(day_id)
        .and_then(|day| day.task(task_id))
        .ok_or_else(|| StudyError::TaskNotFound(day_id.to_string(), task_id))?;
    output::print_task(day_id, task, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ONE_TASK: &str = r#"{"1": {"date":"Mon","focus":"Arrays","tasks":[{"id":1,"subject":"DSA","topic":"Two Sum","action":"Solve it","status":"pending"}]}}"#;

    #[test]
    fn mark_updates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roadmap.json");
        fs::write(&path, ONE_TASK).unwrap();
        let store = RoadmapStore::new(&path);

        run(&store, "1", 1, Status::Done, Format::Json).unwrap();
        assert_eq!(store.load().day("1").unwrap().tasks[0].status, Status::Done);
    }

    #[test]
    fn mark_unknown_day_fails_without_writing() {
        let dir = tempdir().unwrap();
        let store = RoadmapStore::new(dir.path().join("roadmap.json"));

        let err = run(&store, "3", 1, Status::Done, Format::Json).unwrap_err();
        assert!(matches!(err, StudyError::DayNotFound(_)));
        assert!(!store.path().exists());
    }
}
