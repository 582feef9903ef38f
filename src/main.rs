use anyhow::Result;
use std::process;
use log::{error, info};

use toastd::{app, cli, logging};

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Application panicked: {:?}", panic_info);
        eprintln!("Panic: {:?}", panic_info);
        process::exit(101);
    }));

    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::args::parse_args();

    cli::args::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    if let Some(path) = config_manager.config_file_path() {
        info!("Using configuration file: {}", path.display());
    }

    let toast_config = app::resolve_toast_config(&args, &config_manager)?;
    let output = app::resolve_output_format(&args)?;

    if args.no_color {
        colored::control::set_override(false);
    }

    let steps = app::collect_steps(&args)?;

    // Current-thread runtime: the store's timers and the scenario share one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(app::run_scenario(toast_config, steps, output))?;

    if report.steps_ignored > 0 {
        info!("{} of {} steps had no effect", report.steps_ignored, report.steps_run);
    }

    Ok(())
}
