use clap::ValueEnum;
use colored::Colorize;

use crate::error::Result;
use crate::model::{Status, Task};
use crate::progress::{Progress, ProgressReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
}

pub const DEFAULT_SUBJECT_ICON: &str = "⚪";
pub const COMPLETE_GLYPH: &str = "✅";

/// Glyph shown next to a subject. Unlisted subjects get [`DEFAULT_SUBJECT_ICON`].
pub fn subject_icon(subject: &str) -> &'static str {
    match subject {
        "DSA" => "🔴",
        "ML Theory" => "🔵",
        "ML Math" => "🟢",
        "Project" => "🟣",
        "Tools" => "🟠",
        _ => DEFAULT_SUBJECT_ICON,
    }
}

/// `✅` for a finished day, `(done/total)` otherwise.
pub fn completion_indicator(progress: Progress) -> String {
    if progress.is_complete() {
        COMPLETE_GLYPH.to_string()
    } else {
        format!("({}/{})", progress.completed, progress.total)
    }
}

/// Short label for the terminal task table.
pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Done => "DONE",
        Status::Pending => "TODO",
    }
}

/// Badge text on the dashboard.
pub fn status_badge(status: Status) -> &'static str {
    match status {
        Status::Done => "COMPLETED",
        Status::Pending => "PENDING",
    }
}

pub fn print_report(report: &ProgressReport, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(report)?),
        Format::Pretty => {
            match report.percent {
                Some(percent) => println!(
                    "Total progress: {}% ({}/{})",
                    percent.to_string().bold(),
                    report.overall.completed,
                    report.overall.total
                ),
                None => println!("{}", "No tasks found.".yellow()),
            }
            for day in &report.days {
                println!(
                    "[{}] {} - {} {}",
                    day.id.cyan().bold(),
                    day.date.as_deref().unwrap_or("-"),
                    day.focus.as_deref().unwrap_or("-"),
                    completion_indicator(day.progress)
                );
            }
        }
    }
    Ok(())
}

pub fn print_task(day_id: &str, task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty => {
            let label = match task.status {
                Status::Done => status_label(task.status).green(),
                Status::Pending => status_label(task.status).red(),
            };
            println!(
                "[{}/{}] {} {} {}: {}",
                day_id,
                task.id,
                label,
                subject_icon(&task.subject),
                task.subject,
                task.topic
            );
        }
    }
    Ok(())
}
