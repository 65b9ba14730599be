//! CLI diagnostic entry point.
//!
//! # Responsibility
//! - Verify `fineflow_core` linkage and print its version.
//! - Summarize a storage database: entry count, days logged, growth stage,
//!   mood and garden weather for a period.
//!
//! # Invariants
//! - Output is `key=value` lines only; entry text is never printed.
//! - Exit code is non-zero on bad flags or an unopenable database.

use clap::Parser;
use fineflow_core::{AnalysisPeriod, EntryStore, JournalService, LogLevel, SqliteMedium};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

/// Fine Flow diagnostics: core version and a journal summary.
#[derive(Debug, Parser)]
#[command(name = "fineflow_cli")]
#[command(version)]
#[command(about = "Print fineflow_core health and a journal summary")]
struct Cli {
    /// Storage database to summarize
    #[arg(long)]
    db: Option<PathBuf>,

    /// Window used for the weather readout (today|week|month|year)
    #[arg(long, default_value = "week")]
    period: AnalysisPeriod,

    /// Log level (trace|debug|info|warn|error); only used with --log-dir
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .map_or_else(fineflow_core::default_log_level, LogLevel::as_str);
        fineflow_core::init_logging(level, log_dir).map_err(|err| err.to_string())?;
    }

    println!("fineflow_core ping={}", fineflow_core::ping());
    println!("fineflow_core version={}", fineflow_core::core_version());

    let Some(db) = cli.db.as_deref() else {
        return Ok(());
    };
    let medium = SqliteMedium::open(db).map_err(|err| err.to_string())?;
    let store = EntryStore::new(medium);
    let journal = JournalService::new(&store);
    let period = cli.period;
    let stats = journal.stats();

    println!("entries={}", stats.total_entries);
    println!("days_logged={}", stats.days_logged);
    println!("current_streak={}", stats.current_streak);
    println!("growth_stage={}", journal.growth_stage());
    println!("mood={}", journal.analyze_mood());
    println!("period={period}");
    println!("weather={}", journal.analyze_weather(period));

    info!("event=cli_summary module=cli status=ok period={period}");
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use fineflow_core::{AnalysisPeriod, LogLevel};
    use std::path::PathBuf;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "fineflow_cli",
            "--db",
            "/tmp/ff.db",
            "--period",
            "Month",
            "--log-level",
            "debug",
            "--log-dir",
            "/tmp/logs",
        ])
        .expect("flags should parse");

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/ff.db")));
        assert_eq!(cli.period, AnalysisPeriod::Month);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn period_defaults_to_week() {
        let cli = Cli::try_parse_from(["fineflow_cli"]).expect("no flags should parse");
        assert_eq!(cli.period, AnalysisPeriod::Week);
        assert_eq!(cli.db, None);
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn rejects_unknown_flag_and_missing_value() {
        assert!(Cli::try_parse_from(["fineflow_cli", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["fineflow_cli", "--db"]).is_err());
    }

    #[test]
    fn rejects_unknown_period_and_level() {
        assert!(Cli::try_parse_from(["fineflow_cli", "--period", "decade"]).is_err());
        assert!(Cli::try_parse_from(["fineflow_cli", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
