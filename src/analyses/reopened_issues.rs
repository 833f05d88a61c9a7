use std::collections::HashMap;

use clap::Command;

use super::{count_arg, rank, top_info};
use crate::analysis::{Analysis, ArgInfo, RunContext};
use crate::charts::{BarChartData, Chart};
use crate::constants::EVENT_REOPENED;
use crate::error::{LensError, LensResult};
use crate::formatting::write_ranked_table;
use crate::models::Issue;

const FEATURE_ID: u32 = 3;
const DEFAULT_LABELS: u64 = 10;

/// Which labels sit on the issues that keep getting reopened.
pub struct ReopenedIssuesAnalysis {
    labels_arg: ArgInfo,
}

impl ReopenedIssuesAnalysis {
    pub fn new() -> LensResult<Self> {
        Ok(Self {
            labels_arg: top_info("--labels <N>", "labels", DEFAULT_LABELS)?,
        })
    }
}

impl Analysis for ReopenedIssuesAnalysis {
    fn feature_id(&self) -> u32 {
        FEATURE_ID
    }

    fn name(&self) -> &'static str {
        "reopened-issues"
    }

    fn description(&self) -> &'static str {
        "Identifies which issue labels are associated with issues being reopened the most"
    }

    fn declare_arguments(&self, command: Command) -> Command {
        command.arg(count_arg("labels", &self.labels_arg))
    }

    fn list_arguments(&self) -> Vec<ArgInfo> {
        vec![self.labels_arg.clone()]
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> LensResult<()> {
        let limit = ctx.config.get_count_or("labels", DEFAULT_LABELS) as usize;
        let issues = ctx.issues()?;

        if !issues.iter().any(|issue| issue.count_events(EVENT_REOPENED) > 0) {
            return Err(LensError::EmptyResult("No reopened issues found.".to_string()));
        }

        let counts = reopen_counts(issues);
        if counts.is_empty() {
            return Err(LensError::EmptyResult(
                "Reopened issues were found, but none of them carry labels.".to_string(),
            ));
        }

        let shown: Vec<(String, u64)> = counts.into_iter().take(limit).collect();
        write_ranked_table(
            ctx.out,
            "Labels associated with the most reopened issues:",
            "Label",
            "Reopens",
            &shown,
        )?;

        ctx.renderer.render(&Chart::Bar(BarChartData {
            title: "Issue Labels vs. Reopen Counts".to_string(),
            x_label: "Label".to_string(),
            y_label: "Number of Reopens".to_string(),
            bars: shown,
        }))
    }
}

/// Reopen events summed per label over every reopened issue, ranked.
/// Unlabelled issues contribute nothing.
pub fn reopen_counts(issues: &[Issue]) -> Vec<(String, u64)> {
    let mut totals: HashMap<String, u64> = HashMap::new();

    for issue in issues {
        let reopens = issue.count_events(EVENT_REOPENED) as u64;
        if reopens == 0 {
            continue;
        }
        for label in &issue.labels {
            *totals.entry(label.clone()).or_insert(0) += reopens;
        }
    }

    rank(totals)
}
