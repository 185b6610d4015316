//! `taskslip` — task list manager with thermal receipt printing.
//!
//! Runs the text menu on the terminal. Configuration via CLI flags,
//! environment variables, or config file (`~/.config/taskslip/config.toml`).
//!
//! ```bash
//! # Tasks in the current directory, printer found by USB id
//! cargo run --bin taskslip
//!
//! # Explicit data directory and printer node
//! cargo run --bin taskslip -- --data-dir ~/tarefas --device /dev/usb/lp0
//!
//! # Try it without a printer
//! cargo run --bin taskslip -- --dry-run --log-level debug
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use taskslip::app::TaskApp;
use taskslip::config::{AppConfig, CliArgs};
use taskslip::menu::Menu;
use taskslip::printer::PrinterDevice;
use taskslip::printer::memory::MemoryPrinter;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::from_cli(&cli)
        }
    };

    // Logs go to a file; the terminal belongs to the menu.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(
        tasks = %config.tasks_path().display(),
        last_print = %config.last_print_path().display(),
        dry_run = config.dry_run,
        "taskslip starting"
    );

    let result = if config.dry_run {
        let printer = MemoryPrinter::new();
        let result = run_menu(&config, printer.clone());
        for (n, job) in printer.jobs().iter().enumerate() {
            tracing::info!(job = n + 1, bytes = job.len(), data = ?job, "dry-run receipt");
        }
        result
    } else {
        run_menu(&config, config.printer.to_device())
    };

    tracing::info!("taskslip exiting");
    result
}

/// Runs the console menu against the given printer device.
fn run_menu<D: PrinterDevice>(config: &AppConfig, device: D) -> io::Result<()> {
    let app = TaskApp::from_config(config, device);
    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout());
    menu.run(&app)
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskslip.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
