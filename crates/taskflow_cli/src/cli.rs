//! Command-line flags and their resolution against defaults and environment.

use clap::Parser;
use std::env;
use std::io;
use std::path::PathBuf;
use taskflow_core::{default_log_level, SessionConfig};

pub const ENV_LOG_LEVEL: &str = "TASKFLOW_LOG_LEVEL";

#[derive(Debug, Parser)]
#[command(
    name = "taskflow",
    version,
    about = "Personal task-tracking assistant: to-dos, deadlines and events in a flat file"
)]
pub struct Cli {
    /// Directory holding tasks.txt and archive.txt (default: ./data).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (default: <data-dir>/logs).
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print one JSON response per input line instead of plain text.
    #[arg(long)]
    pub json: bool,

    /// Skip the greeting and reminders.
    #[arg(long)]
    pub no_banner: bool,
}

impl Cli {
    /// Defaults, then `TASKFLOW_*` environment, then flags.
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::from_env();
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        config
    }

    pub fn log_level(&self) -> String {
        self.log_level
            .clone()
            .or_else(|| env::var(ENV_LOG_LEVEL).ok())
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string())
    }

    /// Absolute log directory; relative paths resolve against the working dir.
    pub fn log_dir(&self, config: &SessionConfig) -> io::Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| config.data_dir.join("logs"));
        if dir.is_absolute() {
            return Ok(dir);
        }
        Ok(env::current_dir()?.join(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn data_dir_flag_overrides_config() {
        let cli = Cli::parse_from(["taskflow", "--data-dir", "/srv/tasks", "--json"]);
        let config = cli.session_config();
        assert_eq!(config.tasks_path(), PathBuf::from("/srv/tasks/tasks.txt"));
        assert!(cli.json);
    }

    #[test]
    fn explicit_log_level_wins() {
        let cli = Cli::parse_from(["taskflow", "--log-level", "warn"]);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn relative_log_dir_becomes_absolute() {
        let cli = Cli::parse_from(["taskflow", "--log-dir", "logs"]);
        let dir = cli.log_dir(&cli.session_config()).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("logs"));
    }
}
