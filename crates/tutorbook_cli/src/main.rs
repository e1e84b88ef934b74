//! Interactive tutoring scheduler.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the database.
//! - Hand stdin/stdout to the text menu.

mod cli;
mod menu;

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use tutorbook_core::db::open_db;
use tutorbook_core::{default_log_level, init_logging, SchedulerOptions};

fn main() {
    if let Err(error) = run() {
        eprintln!("tutorbook error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, absolute(log_dir)?).context("failed to initialize logging")?;
    }

    let mut conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let options = SchedulerOptions {
        require_existing_references: cli.strict_references,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::Menu::new(&mut conn, options, stdin.lock(), stdout.lock()).run()
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}
