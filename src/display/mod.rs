//! Display module rendering published toast state for the terminal
//!
//! The scenario driver registers a [`SnapshotPrinter`] with the store; it is
//! the render surface of the CLI.

pub mod render;

pub use render::{OutputFormat, SnapshotPrinter};
