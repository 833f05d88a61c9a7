use std::io::Write;

use crate::charts::ChartRenderer;
use crate::config::Config;
use crate::loader::DataLoader;

/// What the dispatcher needs from the outside world: the shared loader,
/// a place to draw charts and a place to print.
pub struct CliContext<'a> {
    pub loader: &'a DataLoader,
    pub renderer: &'a mut dyn ChartRenderer,
    pub out: &'a mut dyn Write,
    base_config: Option<Config>,
}

impl<'a> CliContext<'a> {
    /// Config is loaded from disk and the environment on each run.
    pub fn new(loader: &'a DataLoader, renderer: &'a mut dyn ChartRenderer, out: &'a mut dyn Write) -> Self {
        Self {
            loader,
            renderer,
            out,
            base_config: None,
        }
    }

    /// Use `config` instead of loading one; command-line values are still
    /// merged on top.
    pub fn with_config(mut self, config: Config) -> Self {
        self.base_config = Some(config);
        self
    }

    pub fn base_config(&self) -> Option<&Config> {
        self.base_config.as_ref()
    }
}
