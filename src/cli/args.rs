use clap::{ArgAction, Parser};
use anyhow::Result;
use std::path::PathBuf;
use log::debug;

/// Ephemeral toast notification store driver
///
/// Replays a scenario of toast operations against an in-memory store and
/// prints every state the store publishes.
#[derive(Parser, Debug)]
#[command(name = "toastd")]
#[command(version)]
pub struct Args {
    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,

    // ============ STORE SETTINGS ============

    /// Maximum number of toasts visible at once
    #[arg(short = 'l', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Delay between dismissing a toast and removing it, in milliseconds
    #[arg(short = 'd', long = "remove-delay-ms", value_name = "MS")]
    pub remove_delay_ms: Option<u64>,

    // ============ SCENARIO ============

    /// Snapshot output format: text or json
    #[arg(short = 'o', long = "output", value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Disable coloured snapshot output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Read scenario steps from a file, one per line (may be repeated)
    #[arg(short = 's', long = "script", value_name = "FILE", action = ArgAction::Append)]
    pub script: Vec<PathBuf>,

    /// Scenario steps: notify=TITLE[|DESC], destructive=TITLE[|DESC],
    /// update=ID=TITLE[|DESC], dismiss=ID, close=ID, dismiss-all, wait=MS
    #[arg(value_name = "STEP")]
    pub steps: Vec<String>,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    match args.log_format.to_lowercase().as_str() {
        "text" | "json" => {},
        _ => return Err(anyhow::anyhow!(
            "Invalid log format '{}'. Valid options: text, json", args.log_format
        )),
    }

    match args.output.to_lowercase().as_str() {
        "text" | "json" => {},
        _ => return Err(anyhow::anyhow!(
            "Invalid output format '{}'. Valid options: text, json", args.output
        )),
    }

    if let Some(ref level) = args.log_file_level {
        crate::logging::parse_log_level(level)?;
    }

    if args.log_file_level.is_some() && args.log_file.is_none() {
        return Err(anyhow::anyhow!(
            "--log-file-level requires --log-file to be specified"
        ));
    }

    if args.limit == Some(0) {
        return Err(anyhow::anyhow!("--limit must be at least 1"));
    }

    if args.steps.is_empty() && args.script.is_empty() {
        return Err(anyhow::anyhow!(
            "Nothing to do: pass scenario steps or --script FILE"
        ));
    }

    debug!("CLI arguments validated successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("toastd").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_steps_and_settings() {
        let args = parse(&["--limit", "3", "-d", "250", "notify=Saved", "dismiss=1", "wait=300"]);

        assert_eq!(args.limit, Some(3));
        assert_eq!(args.remove_delay_ms, Some(250));
        assert_eq!(args.steps, vec!["notify=Saved", "dismiss=1", "wait=300"]);
        assert_eq!(args.output, "text");
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_conflicting_log_flags() {
        let args = parse(&["--verbose", "--quiet", "notify=A"]);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_invalid_formats() {
        assert!(validate_args(&parse(&["--log-format", "xml", "notify=A"])).is_err());
        assert!(validate_args(&parse(&["--output", "yaml", "notify=A"])).is_err());
    }

    #[test]
    fn test_log_file_level_requires_file() {
        let args = parse(&["--log-file-level", "debug", "notify=A"]);
        assert!(validate_args(&args).is_err());

        let args = parse(&["--log-file", "/tmp/toastd.log", "--log-file-level", "debug", "notify=A"]);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_zero_limit_and_empty_scenario() {
        assert!(validate_args(&parse(&["--limit", "0", "notify=A"])).is_err());
        assert!(validate_args(&parse(&[])).is_err());
        assert!(validate_args(&parse(&["--script", "steps.txt"])).is_ok());
    }
}
