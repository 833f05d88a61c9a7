//! The contract every analysis implements.
//!
//! An analysis is identified by a positive `feature_id`, declares its own
//! command-line options, and does all of its work inside `run`. Identity and
//! argument metadata are available without running anything, which is what
//! lets the registry print a full catalog for `--list-features`.

pub mod args;

use std::io::Write;

use clap::Command;

pub use args::{ArgInfo, ArgInfoBuilder};

use crate::charts::ChartRenderer;
use crate::config::Config;
use crate::error::LensResult;
use crate::loader::DataLoader;
use crate::models::Issue;

pub trait Analysis {
    /// Unique id, used as the `--feature` selector.
    fn feature_id(&self) -> u32;

    fn name(&self) -> &'static str;

    /// One-line summary for listings.
    fn description(&self) -> &'static str;

    /// Add this analysis's options to the execution-phase parser.
    fn declare_arguments(&self, command: Command) -> Command;

    /// The same options as (flags, help) pairs, without building a parser.
    fn list_arguments(&self) -> Vec<ArgInfo>;

    /// Load, filter, aggregate and render.
    ///
    /// Returns `LensError::EmptyResult` when the filtered data leaves nothing
    /// to show.
    fn run(&self, ctx: &mut RunContext<'_>) -> LensResult<()>;
}

/// Everything an analysis may touch while running. The config already has
/// command-line values merged in.
pub struct RunContext<'a> {
    pub config: &'a Config,
    pub loader: &'a DataLoader,
    pub renderer: &'a mut dyn ChartRenderer,
    pub out: &'a mut dyn Write,
}

impl<'a> RunContext<'a> {
    pub fn issues(&self) -> LensResult<&'a [Issue]> {
        self.loader.get_issues(self.config)
    }
}
