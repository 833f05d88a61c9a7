use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use clap::Command;

use super::{count_arg, rank, text_arg, top_info, user_filter_info};
use crate::analysis::{Analysis, ArgInfo, RunContext};
use crate::charts::{Chart, LineChartData, LineSeries};
use crate::error::{LensError, LensResult};
use crate::formatting::write_ranked_table;
use crate::models::Issue;

const FEATURE_ID: u32 = 2;
const DEFAULT_TOP: u64 = 5;

/// Monthly event counts for one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorActivity {
    pub author: String,
    pub total: u64,
    /// (first day of month, events), months ascending
    pub months: Vec<(NaiveDate, u64)>,
}

/// How active each contributor has been, month by month.
pub struct ContributorActivityAnalysis {
    user_arg: ArgInfo,
    top_arg: ArgInfo,
}

impl ContributorActivityAnalysis {
    pub fn new() -> LensResult<Self> {
        Ok(Self {
            user_arg: user_filter_info("Only chart the activity of this contributor")?,
            top_arg: top_info("--top, -t <N>", "contributors", DEFAULT_TOP)?,
        })
    }
}

impl Analysis for ContributorActivityAnalysis {
    fn feature_id(&self) -> u32 {
        FEATURE_ID
    }

    fn name(&self) -> &'static str {
        "contributor-activity"
    }

    fn description(&self) -> &'static str {
        "Analyzes contributor activity (comments, events) over time"
    }

    fn declare_arguments(&self, command: Command) -> Command {
        command
            .arg(text_arg("user", "USER", &self.user_arg))
            .arg(count_arg("top", &self.top_arg).short('t'))
    }

    fn list_arguments(&self) -> Vec<ArgInfo> {
        vec![self.user_arg.clone(), self.top_arg.clone()]
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> LensResult<()> {
        let user = ctx.config.get_string("user");
        let top = ctx.config.get_count_or("top", DEFAULT_TOP) as usize;
        let issues = ctx.issues()?;

        let activity = monthly_activity(issues, user.as_deref());
        if activity.is_empty() {
            return Err(LensError::EmptyResult(match &user {
                Some(user) => format!("No dated events found for contributor '{}'.", user),
                None => "No dated events with an author found.".to_string(),
            }));
        }

        let shown: Vec<AuthorActivity> = activity.into_iter().take(top).collect();
        let totals: Vec<(String, u64)> = shown
            .iter()
            .map(|author| (author.author.clone(), author.total))
            .collect();
        write_ranked_table(ctx.out, "Most active contributors:", "Contributor", "Events", &totals)?;
        writeln!(ctx.out)?;

        let series = shown
            .into_iter()
            .map(|author| LineSeries {
                name: author.author,
                points: author.months,
            })
            .collect();
        ctx.renderer.render(&Chart::Line(LineChartData {
            title: "Contributor Activity Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Number of Events".to_string(),
            series,
        }))
    }
}

pub fn month_of(date: &impl Datelike) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

/// Events per (author, month), grouped by author and ranked by total.
/// Events missing an author or a date are not counted.
pub fn monthly_activity(issues: &[Issue], user_filter: Option<&str>) -> Vec<AuthorActivity> {
    let mut per_author: HashMap<&str, BTreeMap<NaiveDate, u64>> = HashMap::new();

    for event in issues.iter().flat_map(|issue| issue.events.iter()) {
        let (Some(author), Some(date)) = (event.author.as_deref(), event.event_date) else {
            continue;
        };
        if user_filter.is_some_and(|wanted| wanted != author) {
            continue;
        }
        let Some(month) = month_of(&date) else {
            continue;
        };
        *per_author.entry(author).or_default().entry(month).or_insert(0) += 1;
    }

    let totals = per_author
        .iter()
        .map(|(author, months)| (*author, months.values().sum::<u64>()));

    rank(totals)
        .into_iter()
        .filter_map(|(author, total)| {
            let months = per_author.get(author)?;
            Some(AuthorActivity {
                author: author.to_string(),
                total,
                months: months.iter().map(|(month, count)| (*month, *count)).collect(),
            })
        })
        .collect()
}
