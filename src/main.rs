use std::path::PathBuf;

use clap::{Parser, Subcommand};
use studyos::commands::web::DEFAULT_ADDR;
use studyos::model::Status;
use studyos::output::Format;
use studyos::store::{DEFAULT_ROADMAP_FILE, RoadmapStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "studyos",
    version,
    about = "Track progress through a day-by-day study roadmap"
)]
struct Cli {
    /// Roadmap JSON file shared by the menu and the dashboard
    #[arg(long, global = true, default_value = DEFAULT_ROADMAP_FILE)]
    file: PathBuf,
    /// Output format for non-interactive commands
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal menu (the default)
    Menu,
    /// Serve the web dashboard
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: String,
    },
    /// Print overall and per-day progress
    Status,
    /// Set a task's status without opening the menu
    Mark {
        /// Day ID
        day: String,
        /// Task ID within the day
        task: i64,
        /// New status
        #[arg(long, value_enum, default_value = "done")]
        status: Status,
    },
}

fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> studyos::error::Result<()> {
    let store = RoadmapStore::new(cli.file);
    let command = cli.command.unwrap_or(Commands::Menu);

    match command {
        Commands::Serve { .. } => init_tracing("info"),
        _ => init_tracing("warn"),
    }

    match command {
        Commands::Menu => studyos::commands::menu::run(&store),
        Commands::Serve { addr } => studyos::commands::web::run(store, &addr),
        Commands::Status => studyos::commands::status::run(&store, cli.format),
        Commands::Mark { day, task, status } => {
            studyos::commands::mark::run(&store, &day, task, status, cli.format)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let format = cli.format;
    if let Err(e) = run(cli) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            Format::Pretty => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["studyos"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, PathBuf::from("roadmap.json"));
        assert_eq!(cli.format, Format::Pretty);
    }

    #[test]
    fn mark_parses_ids() {
        let cli = Cli::try_parse_from([
            "studyos", "--file", "plan.json", "mark", "3", "2", "--status", "pending",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("plan.json"));
        match cli.command {
            Some(Commands::Mark { day, task, status }) => {
                assert_eq!(day, "3");
                assert_eq!(task, 2);
                assert_eq!(status, Status::Pending);
            }
            _ => panic!("expected mark"),
        }
    }
}
