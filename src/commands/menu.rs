use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use crossterm::ExecutableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};

use crate::build_info;
use crate::error::{Result, StudyError};
use crate::model::{DayRecord, RoadmapDocument, Status};
use crate::output::{completion_indicator, status_label, subject_icon};
use crate::progress;
use crate::store::{RoadmapRepository, RoadmapStore};

const RULE_WIDTH: usize = 85;

#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub clear_screen: bool,
    pub sync_pause: Duration,
    pub save_pause: Duration,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            clear_screen: true,
            sync_pause: Duration::from_secs(1),
            save_pause: Duration::from_millis(500),
        }
    }
}

/// How the day view was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayExit {
    Back,
    /// Input ran out; unwind all the way to process exit.
    Quit,
}

/// The interactive terminal menu: a main menu listing days and a per-day
/// task table. Input and output are injected so the loop can run headless.
pub struct Menu<'s, R, W> {
    store: &'s dyn RoadmapRepository,
    input: R,
    out: W,
    config: MenuConfig,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(store: &'s dyn RoadmapRepository, input: R, out: W, config: MenuConfig) -> Self {
        Self {
            store,
            input,
            out,
            config,
        }
    }

    /// Main menu loop. Returns when the user quits, input ends, or the
    /// roadmap turns out to be empty.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let mut doc = self.store.load();
            self.clear()?;
            writeln!(
                self.out,
                "{} {}",
                "🎓 STUDY OS (Active)".bold(),
                build_info::version_label().dimmed()
            )?;

            let day_ids: Vec<String> = doc
                .sorted_day_ids()
                .into_iter()
                .map(str::to_string)
                .collect();

            if day_ids.is_empty() {
                writeln!(self.out, "\n{}", "Roadmap is empty!".yellow())?;
                return Ok(());
            }

            writeln!(self.out, "\n{}", "--- AVAILABLE SPRINTS ---".magenta())?;
            for id in &day_ids {
                let Some(day) = doc.day(id) else { continue };
                let (date, focus) = day.heading(id)?;
                let indicator = completion_indicator(progress::of_day(day));
                writeln!(self.out, "[{id}] {date} - {focus} {indicator}")?;
            }

            writeln!(self.out, "\n[S] Manual Sync (Save)  [Q] Quit")?;
            let Some(choice) = self.prompt("\nEnter Day ID to Work On: ")? else {
                return Ok(());
            };
            let choice = choice.trim();

            if choice.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            if choice.eq_ignore_ascii_case("s") {
                self.store.save(&doc)?;
                writeln!(self.out, "Progress Synced.")?;
                self.pause(self.config.sync_pause);
                continue;
            }
            if doc.contains_day(choice) && self.day_view(choice, &mut doc)? == DayExit::Quit {
                return Ok(());
            }
        }
    }

    fn day_view(&mut self, day_id: &str, doc: &mut RoadmapDocument) -> Result<DayExit> {
        loop {
            self.clear()?;
            let day = doc
                .day(day_id)
                .ok_or_else(|| StudyError::DayNotFound(day_id.to_string()))?;
            self.render_day(day_id, day)?;

            let Some(cmd) = self.prompt("\nChoice: ")? else {
                return Ok(DayExit::Quit);
            };

            match cmd.trim() {
                "1" => {
                    let Some(raw) = self.prompt("Enter Task ID: ")? else {
                        return Ok(DayExit::Quit);
                    };
                    let Ok(task_id) = raw.trim().parse::<i64>() else {
                        continue;
                    };
                    if doc.set_task_status(day_id, task_id, Status::Done).is_ok() {
                        self.store.save(doc)?;
                        writeln!(self.out, "{}", "Progress Saved!".green())?;
                        self.pause(self.config.save_pause);
                    }
                }
                "2" => {
                    let Some(raw) = self.prompt("Enter Task ID: ")? else {
                        return Ok(DayExit::Quit);
                    };
                    let Ok(task_id) = raw.trim().parse::<i64>() else {
                        continue;
                    };
                    let action = doc
                        .day(day_id)
                        .and_then(|day| day.task(task_id))
                        .map(|task| task.action.clone());
                    if let Some(action) = action {
                        writeln!(self.out, "\n{}", "--- TASK DETAILS ---".blue())?;
                        writeln!(self.out, "Action: {}", action.bold())?;
                        if self.prompt("\nPress Enter to return...")?.is_none() {
                            return Ok(DayExit::Quit);
                        }
                    }
                }
                "3" => return Ok(DayExit::Back),
                _ => {}
            }
        }
    }

    fn render_day(&mut self, day_id: &str, day: &DayRecord) -> Result<()> {
        let (date, focus) = day.heading(day_id)?;
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(self.out, "\n{}", format!("📅 {date}: {focus}").magenta())?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "{:<6} {:<10} {:<12} TASK", "ID", "STATUS", "SUBJECT")?;
        writeln!(self.out, "{rule}")?;

        for task in &day.tasks {
            let cell = format!("{:<10}", status_label(task.status));
            let cell = if task.status.is_done() {
                cell.green()
            } else {
                cell.red()
            };
            writeln!(
                self.out,
                "{:<6} {} {} {:<10} {}",
                task.id,
                cell,
                subject_icon(&task.subject),
                task.subject,
                task.topic
            )?;
        }

        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "\n[1] Mark Task Done  [2] View Details  [3] Back to Menu")?;
        Ok(())
    }

    /// Print `text`, then read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn clear(&mut self) -> Result<()> {
        if self.config.clear_screen {
            self.out
                .execute(Clear(ClearType::All))?
                .execute(MoveTo(0, 0))?;
        }
        Ok(())
    }

    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// Run the menu against the real terminal.
pub fn run(store: &RoadmapStore) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(store, stdin.lock(), stdout.lock(), MenuConfig::default()).run()
}
