//! Application orchestration module

pub mod initialization;
pub mod execution;

pub use initialization::{
    load_configuration,
    configure_logging,
    resolve_toast_config,
    resolve_output_format,
};
pub use execution::{
    collect_steps,
    run_steps,
    run_scenario,
    ScenarioReport,
};
