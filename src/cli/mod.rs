//! CLI module containing argument parsing and scenario steps

pub mod args;
pub mod steps;

pub use args::{parse_args, validate_args, Args};
pub use steps::{load_script, parse_script, Step};
