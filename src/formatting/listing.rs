use std::io::{self, Write};

use colored::*;

use crate::registry::FeatureRegistry;

/// Print every registered analysis with its options, lowest id first.
pub fn write_feature_listing(out: &mut dyn Write, registry: &FeatureRegistry) -> io::Result<()> {
    writeln!(out, "{}", "Available Features:".bold())?;

    for analysis in registry.iter() {
        writeln!(
            out,
            "  {}: {}: {}",
            analysis.feature_id().to_string().bright_cyan(),
            analysis.name().bold(),
            analysis.description()
        )?;

        for arg in analysis.list_arguments() {
            writeln!(out, "      {:<24} {}", arg.flags.yellow(), arg.help.dimmed())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Run one with: issue-lens --feature <ID> [options]")?;
    Ok(())
}
