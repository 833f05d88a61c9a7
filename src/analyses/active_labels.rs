use std::collections::HashMap;

use clap::Command;

use super::{count_arg, label_filter_info, rank, text_arg, top_info};
use crate::analysis::{Analysis, ArgInfo, RunContext};
use crate::charts::{BarChartData, Chart};
use crate::error::{LensError, LensResult};
use crate::formatting::write_ranked_table;
use crate::models::Issue;

const FEATURE_ID: u32 = 1;
const DEFAULT_TOP: u64 = 10;

/// Labels ranked by how much discussion their issues attract.
pub struct ActiveLabelsAnalysis {
    label_arg: ArgInfo,
    top_arg: ArgInfo,
}

impl ActiveLabelsAnalysis {
    pub fn new() -> LensResult<Self> {
        Ok(Self {
            label_arg: label_filter_info("Only report activity on this label")?,
            top_arg: top_info("--top, -t <N>", "labels", DEFAULT_TOP)?,
        })
    }
}

impl Analysis for ActiveLabelsAnalysis {
    fn feature_id(&self) -> u32 {
        FEATURE_ID
    }

    fn name(&self) -> &'static str {
        "active-labels"
    }

    fn description(&self) -> &'static str {
        "Identifies labels associated with the most active discussions"
    }

    fn declare_arguments(&self, command: Command) -> Command {
        command
            .arg(text_arg("label", "LABEL", &self.label_arg))
            .arg(count_arg("top", &self.top_arg).short('t'))
    }

    fn list_arguments(&self) -> Vec<ArgInfo> {
        vec![self.label_arg.clone(), self.top_arg.clone()]
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> LensResult<()> {
        let label = ctx.config.get_string("label");
        let top = ctx.config.get_count_or("top", DEFAULT_TOP) as usize;
        let issues = ctx.issues()?;

        if let Some(label) = &label {
            writeln!(ctx.out, "\n{}\n", occurrence_summary(issues, label))?;
        }

        let activity = label_activity(issues, label.as_deref());
        if activity.is_empty() {
            return Err(LensError::EmptyResult(match &label {
                Some(label) => format!("No issues carry the label '{}'.", label),
                None => "No labelled issues found.".to_string(),
            }));
        }

        let shown: Vec<(String, u64)> = activity.into_iter().take(top).collect();
        write_ranked_table(ctx.out, "Most active labels:", "Label", "Comments", &shown)?;

        let title = match &label {
            Some(label) => format!("Activity on the '{}' label", label),
            None => format!("Top {} Most Active Labels", top),
        };
        ctx.renderer.render(&Chart::Bar(BarChartData {
            title,
            x_label: "Label".to_string(),
            y_label: "Number of Comments".to_string(),
            bars: shown,
        }))
    }
}

/// Sum of `commented` events per label, ranked. With a filter only that
/// label is kept.
pub fn label_activity(issues: &[Issue], label_filter: Option<&str>) -> Vec<(String, u64)> {
    let mut totals: HashMap<String, u64> = HashMap::new();

    for issue in issues {
        let comments = issue.events.iter().filter(|event| event.is_comment()).count() as u64;
        for label in &issue.labels {
            if label_filter.is_some_and(|wanted| wanted != label.as_str()) {
                continue;
            }
            *totals.entry(label.clone()).or_insert(0) += comments;
        }
    }

    rank(totals)
}

pub fn occurrence_summary(issues: &[Issue], label: &str) -> String {
    let total: usize = issues.iter().map(|issue| issue.label_count(label)).sum();
    format!(
        "The label '{}' occurred {} times across {} issues.",
        label,
        total,
        issues.len()
    )
}
