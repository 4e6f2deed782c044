use clap::Parser;
use markban::core::config::{self, CliOverrides};
use markban::core::Board;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "markban", about = "Kanban board in a markdown file")]
struct Args {
    /// Board file to open (created on first save)
    file: Option<PathBuf>,

    /// Reject lines that are neither a column heading nor a task
    #[arg(long)]
    strict: bool,

    /// Use this config file instead of ~/.markban/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn init_logging() {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    // Log next to the config, not into the directory holding the board
    let Some(dir) = config::markban_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    if let Ok(log_file) = File::create(dir.join("markban.log")) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path, false),
        None => config::load_config(),
    };
    let file_config = match loaded {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("markban: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cli = CliOverrides {
        board_file: args.file,
        strict: args.strict,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!(
        "markban starting on {} ({:?})",
        resolved.board_file.display(),
        resolved.parse_policy
    );

    // A board that fails to parse must not be replaced by an empty one
    let board = match Board::load(&resolved.board_file, &resolved.load_options()) {
        Ok(board) => board,
        Err(e) => {
            log::error!("Failed to load {}: {}", resolved.board_file.display(), e);
            eprintln!("markban: {}: {e}", resolved.board_file.display());
            return ExitCode::FAILURE;
        }
    };

    match markban::tui::run(board) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("TUI error: {}", e);
            eprintln!("markban: {e}");
            ExitCode::FAILURE
        }
    }
}
