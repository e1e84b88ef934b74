use clap::Parser;
use std::path::PathBuf;

/// Command-line configuration for the `tutorbook` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tutorbook",
    version,
    about = "Tutoring scheduler - book classes without double-booking teachers"
)]
pub struct Cli {
    /// SQLite database file (created when missing)
    #[arg(long, env = "TUTORBOOK_DB", default_value = "school.db")]
    pub db: PathBuf,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "TUTORBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (logging is off when unset)
    #[arg(long, env = "TUTORBOOK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Reject bookings whose student or teacher does not exist
    #[arg(long)]
    pub strict_references: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn clap_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "tutorbook",
            "--db",
            "/tmp/tutor.db",
            "--log-level",
            "warn",
            "--log-dir",
            "/tmp/logs",
            "--strict-references",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/tutor.db"));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert!(cli.strict_references);
    }
}
