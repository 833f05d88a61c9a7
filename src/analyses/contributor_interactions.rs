use std::cmp::Ordering;
use std::collections::HashMap;

use clap::Command;
use petgraph::graphmap::UnGraphMap;

use super::{count_arg, label_filter_info, text_arg, top_info, user_filter_info};
use crate::analysis::{Analysis, ArgInfo, RunContext};
use crate::charts::{Chart, NetworkChartData, NetworkEdge, NetworkNode};
use crate::error::{LensError, LensResult};
use crate::models::Issue;

const FEATURE_ID: u32 = 4;
const DEFAULT_TOP: u64 = 30;

/// Co-participation graph: one node per person, edge weight = number of
/// issues the two people share.
pub type InteractionGraph<'a> = UnGraphMap<&'a str, u64>;

/// Who works with whom, based on shared issues.
pub struct ContributorInteractionsAnalysis {
    label_arg: ArgInfo,
    user_arg: ArgInfo,
    top_arg: ArgInfo,
}

impl ContributorInteractionsAnalysis {
    pub fn new() -> LensResult<Self> {
        Ok(Self {
            label_arg: label_filter_info("Only consider issues carrying this label")?,
            user_arg: user_filter_info("Only consider issues this contributor took part in")?,
            top_arg: top_info("--top, -t <N>", "central contributors", DEFAULT_TOP)?,
        })
    }
}

impl Analysis for ContributorInteractionsAnalysis {
    fn feature_id(&self) -> u32 {
        FEATURE_ID
    }

    fn name(&self) -> &'static str {
        "contributor-interactions"
    }

    fn description(&self) -> &'static str {
        "Visualizes the interaction network between contributors based on issue comments and events"
    }

    fn declare_arguments(&self, command: Command) -> Command {
        command
            .arg(text_arg("label", "LABEL", &self.label_arg))
            .arg(text_arg("user", "USER", &self.user_arg))
            .arg(count_arg("top", &self.top_arg).short('t'))
    }

    fn list_arguments(&self) -> Vec<ArgInfo> {
        vec![
            self.label_arg.clone(),
            self.user_arg.clone(),
            self.top_arg.clone(),
        ]
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> LensResult<()> {
        let label = ctx.config.get_string("label");
        let user = ctx.config.get_string("user");
        let top = ctx.config.get_count_or("top", DEFAULT_TOP) as usize;
        let issues = ctx.issues()?;

        let graph = build_interaction_graph(issues, label.as_deref(), user.as_deref());
        if graph.node_count() == 0 {
            return Err(LensError::EmptyResult(
                "No interactions found for the specified filters.".to_string(),
            ));
        }

        let centrality = degree_centrality(&graph);
        let leaders: Vec<(&str, f64)> = centrality.iter().take(top).copied().collect();

        writeln!(ctx.out, "Top Contributors by Degree Centrality:")?;
        for (contributor, score) in &leaders {
            writeln!(ctx.out, "{}: {:.4}", contributor, score)?;
        }

        ctx.renderer.render(&Chart::Network(network_chart(&graph, &centrality, &leaders)))
    }
}

/// Build the co-participation graph.
///
/// Issues without `label_filter`, or whose participants do not include
/// `user_filter`, are skipped. Every unordered pair of participants on a
/// kept issue gains one unit of weight.
pub fn build_interaction_graph<'a>(
    issues: &'a [Issue],
    label_filter: Option<&str>,
    user_filter: Option<&str>,
) -> InteractionGraph<'a> {
    let mut graph = InteractionGraph::new();

    for issue in issues {
        if label_filter.is_some_and(|label| !issue.has_label(label)) {
            continue;
        }
        let participants = issue.participants();
        if user_filter.is_some_and(|user| !participants.contains(&user)) {
            continue;
        }

        for (i, first) in participants.iter().enumerate() {
            for second in &participants[i + 1..] {
                match graph.edge_weight_mut(*first, *second) {
                    Some(weight) => *weight += 1,
                    None => {
                        graph.add_edge(*first, *second, 1);
                    }
                }
            }
        }
    }

    graph
}

/// Degree centrality of every node (degree over `n - 1`), highest first,
/// ties by name.
pub fn degree_centrality<'a>(graph: &InteractionGraph<'a>) -> Vec<(&'a str, f64)> {
    let others = graph.node_count().saturating_sub(1);
    let mut scores: Vec<(&'a str, f64)> = graph
        .nodes()
        .map(|node| {
            let score = if others == 0 {
                1.0
            } else {
                graph.neighbors(node).count() as f64 / others as f64
            };
            (node, score)
        })
        .collect();

    scores.sort_by(|(a_name, a_score), (b_name, b_score)| {
        b_score
            .partial_cmp(a_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a_name.cmp(b_name))
    });
    scores
}

fn network_chart(
    graph: &InteractionGraph<'_>,
    centrality: &[(&str, f64)],
    leaders: &[(&str, f64)],
) -> NetworkChartData {
    let scores: HashMap<&str, f64> = centrality.iter().copied().collect();
    let index: HashMap<&str, usize> = graph
        .nodes()
        .enumerate()
        .map(|(i, node)| (node, i))
        .collect();

    let nodes = graph
        .nodes()
        .map(|node| NetworkNode {
            name: node.to_string(),
            centrality: scores.get(node).copied().unwrap_or(0.0),
            labelled: leaders.iter().any(|(leader, _)| *leader == node),
        })
        .collect();

    let edges = graph
        .all_edges()
        .filter_map(|(source, target, weight)| {
            Some(NetworkEdge {
                source: *index.get(source)?,
                target: *index.get(target)?,
                weight: *weight,
            })
        })
        .collect();

    NetworkChartData {
        title: "Contributor Interaction Network".to_string(),
        nodes,
        edges,
    }
}
