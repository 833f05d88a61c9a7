pub mod draw;
pub mod terminal;

use chrono::NaiveDate;

use crate::error::LensResult;

pub use terminal::TerminalRenderer;

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, u64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    /// (month, count), months ascending
    pub points: Vec<(NaiveDate, u64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub name: String,
    pub centrality: f64,
    pub labelled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkEdge {
    pub source: usize,
    pub target: usize,
    pub weight: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkChartData {
    pub title: String,
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChartData),
    Line(LineChartData),
    Network(NetworkChartData),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(data) => &data.title,
            Chart::Line(data) => &data.title,
            Chart::Network(data) => &data.title,
        }
    }
}

/// Shows a chart and returns once the user is done with it.
pub trait ChartRenderer {
    fn render(&mut self, chart: &Chart) -> LensResult<()>;
}

/// Keeps every chart it is asked to render. Used by tests and by callers
/// that only want the computed series.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub charts: Vec<Chart>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Chart> {
        self.charts.last()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &Chart) -> LensResult<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}
