//! The analyses shipped with issue-lens.
//!
//! Adding an analysis means implementing [`Analysis`] and appending it to
//! [`builtin`]; the registry and the CLI pick it up from there.

pub mod active_labels;
pub mod contributor_activity;
pub mod contributor_interactions;
pub mod reopened_issues;

use clap::{value_parser, Arg};

pub use active_labels::ActiveLabelsAnalysis;
pub use contributor_activity::ContributorActivityAnalysis;
pub use contributor_interactions::ContributorInteractionsAnalysis;
pub use reopened_issues::ReopenedIssuesAnalysis;

use crate::analysis::{Analysis, ArgInfo};
use crate::error::LensResult;

pub fn builtin() -> LensResult<Vec<Box<dyn Analysis>>> {
    Ok(vec![
        Box::new(ActiveLabelsAnalysis::new()?),
        Box::new(ContributorActivityAnalysis::new()?),
        Box::new(ReopenedIssuesAnalysis::new()?),
        Box::new(ContributorInteractionsAnalysis::new()?),
    ])
}

/// Sort an aggregate by value descending, ties by key ascending.
pub fn rank<K: Ord>(totals: impl IntoIterator<Item = (K, u64)>) -> Vec<(K, u64)> {
    let mut ranked: Vec<(K, u64)> = totals.into_iter().collect();
    ranked.sort_by(|(a_key, a_value), (b_key, b_value)| {
        b_value.cmp(a_value).then_with(|| a_key.cmp(b_key))
    });
    ranked
}

pub(crate) fn label_filter_info(help: &str) -> LensResult<ArgInfo> {
    ArgInfo::builder().flags("--label <LABEL>").help(help).build()
}

pub(crate) fn user_filter_info(help: &str) -> LensResult<ArgInfo> {
    ArgInfo::builder().flags("--user <USER>").help(help).build()
}

pub(crate) fn top_info(flags: &str, what: &str, default: u64) -> LensResult<ArgInfo> {
    ArgInfo::builder()
        .flags(flags)
        .help(format!("Number of {} to show (default: {})", what, default))
        .build()
}

/// A free-text option such as `--label`.
pub(crate) fn text_arg(id: &'static str, value_name: &'static str, info: &ArgInfo) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name(value_name)
        .help(info.help.clone())
}

/// A positive count option such as `--top`.
pub(crate) fn count_arg(id: &'static str, info: &ArgInfo) -> Arg {
    Arg::new(id)
        .long(id)
        .value_name("N")
        .value_parser(value_parser!(u64).range(1..))
        .help(info.help.clone())
}
