//! Application initialization and configuration

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use std::str::FromStr;
use crate::{cli, config, display, logging};
use crate::notifications::ToastConfig;

pub fn load_configuration(args: &cli::Args) -> Result<config::ConfigManager> {
    let mut manager = match &args.config_file {
        Some(config_file) => config::ConfigManager::load_from_file(config_file.clone())?,
        None => config::ConfigManager::load()?,
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

/// Resolve logging settings: command line first, then the config file
pub fn configure_logging(args: &cli::Args, config: &config::ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config.get_log_level("base", "console-level")
            .unwrap_or_else(|e| {
                debug!("Invalid console-level in config, using default: {}", e);
                None
            })
            .unwrap_or(LevelFilter::Warn)
    };

    let format = if args.log_format != "text" {
        logging::LogFormat::from_str(&args.log_format).map_err(|e| anyhow::anyhow!(e))?
    } else {
        config.get_value("base", "log-format")
            .and_then(|format_str| logging::LogFormat::from_str(format_str).ok())
            .unwrap_or(logging::LogFormat::Text)
    };

    let log_file_path = args.log_file.clone()
        .or_else(|| config.get_path("base", "log-file"));

    let file_log_level = match &args.log_file_level {
        Some(level_str) => Some(logging::parse_log_level(level_str)?),
        None => config.get_log_level("base", "file-log-level").unwrap_or(None),
    };

    let (destination, file_level) = match log_file_path {
        Some(file_path) => {
            let level = file_log_level.unwrap_or(console_level);
            (logging::LogDestination::Both(file_path), Some(level))
        }
        None => (logging::LogDestination::Console, None),
    };

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Resolve store settings: config file `[toast]` section, overridden by flags
pub fn resolve_toast_config(args: &cli::Args, config: &config::ConfigManager) -> Result<ToastConfig> {
    let mut toast_config = config.get_toast_config()?;

    if let Some(limit) = args.limit {
        toast_config.limit = limit;
    }
    if let Some(remove_delay_ms) = args.remove_delay_ms {
        toast_config.remove_delay_ms = remove_delay_ms;
    }

    toast_config.validate()
        .context("Toast configuration validation failed")?;
    debug!("Toast store settings: {:?}", toast_config);
    Ok(toast_config)
}

pub fn resolve_output_format(args: &cli::Args) -> Result<display::OutputFormat> {
    display::OutputFormat::from_str(&args.output).map_err(|e| anyhow::anyhow!(e))
}
