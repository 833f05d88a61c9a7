// Module declarations
pub mod analyses;
pub mod analysis;
pub mod charts;
pub mod cli;
pub mod cli_context;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod loader;
pub mod logging;
pub mod models;
pub mod registry;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use analysis::{Analysis, ArgInfo, ArgInfoBuilder, RunContext};
pub use charts::{Chart, ChartRenderer, RecordingRenderer, TerminalRenderer};
pub use cli::dispatch;
pub use cli_context::CliContext;
pub use config::Config;
pub use error::{LensError, LensResult};
pub use loader::DataLoader;
pub use models::*;
pub use registry::FeatureRegistry;
