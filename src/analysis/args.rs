use std::fmt;

use crate::error::{LensError, LensResult};

/// Flags and help text of one analysis option, as shown by `--list-features`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgInfo {
    pub flags: String,
    pub help: String,
}

impl ArgInfo {
    pub fn builder() -> ArgInfoBuilder {
        ArgInfoBuilder::new()
    }
}

impl fmt::Display for ArgInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.flags, self.help)
    }
}

#[derive(Debug, Default)]
pub struct ArgInfoBuilder {
    flags: Option<String>,
    help: Option<String>,
}

impl ArgInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn build(self) -> LensResult<ArgInfo> {
        let flags = self
            .flags
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| LensError::InvalidArgInfo("flags must be set before building".to_string()))?;
        let help = self
            .help
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| {
                LensError::InvalidArgInfo(format!("help text must be set for '{}'", flags))
            })?;
        Ok(ArgInfo { flags, help })
    }
}
