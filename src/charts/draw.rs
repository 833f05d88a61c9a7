use std::collections::BTreeSet;
use std::f64::consts::TAU;

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Axis, BarChart, Block, Borders, Chart as LineChartWidget, Dataset, GraphType, Paragraph,
    },
    Frame,
};

use super::{BarChartData, Chart, LineChartData, NetworkChartData};

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
];

const DISMISS_HINT: &str = "q / Esc / Enter to close";

pub fn draw_chart(frame: &mut Frame, chart: &Chart) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(frame.size());

    let caption = match chart {
        Chart::Bar(data) => {
            draw_bar_chart(frame, chunks[0], data);
            axis_caption(&data.x_label, &data.y_label)
        }
        Chart::Line(data) => {
            draw_line_chart(frame, chunks[0], data);
            axis_caption(&data.x_label, &data.y_label)
        }
        Chart::Network(data) => {
            draw_network(frame, chunks[0], data);
            format!("{} contributors, {} interactions", data.nodes.len(), data.edges.len())
        }
    };

    frame.render_widget(
        Paragraph::new(caption).style(Style::default().fg(Color::Gray)),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(DISMISS_HINT)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn axis_caption(x_label: &str, y_label: &str) -> String {
    format!("x: {}   y: {}", x_label, y_label)
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
}

/// Widest bar that still fits every bar in the area, within sane limits.
pub fn bar_width(area_width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 3;
    }
    let inner = area_width.saturating_sub(2) as usize;
    let per_bar = inner / bars;
    (per_bar.saturating_sub(1) as u16).clamp(3, 12)
}

pub fn draw_bar_chart(frame: &mut Frame, area: Rect, data: &BarChartData) {
    let bars: Vec<(&str, u64)> = data
        .bars
        .iter()
        .map(|(label, value)| (label.as_str(), *value))
        .collect();

    let chart = BarChart::default()
        .block(titled_block(&data.title))
        .data(bars.as_slice())
        .bar_width(bar_width(area.width, bars.len()))
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(chart, area);
}

pub fn draw_line_chart(frame: &mut Frame, area: Rect, data: &LineChartData) {
    let months: Vec<NaiveDate> = data
        .series
        .iter()
        .flat_map(|series| series.points.iter().map(|(month, _)| *month))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let points: Vec<Vec<(f64, f64)>> = data
        .series
        .iter()
        .map(|series| {
            series
                .points
                .iter()
                .filter_map(|(month, count)| {
                    let x = months.binary_search(month).ok()?;
                    Some((x as f64, *count as f64))
                })
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = data
        .series
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (series, series_points))| {
            Dataset::default()
                .name(series.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(series_points)
        })
        .collect();

    let max_count = data
        .series
        .iter()
        .flat_map(|series| series.points.iter().map(|(_, count)| *count))
        .max()
        .unwrap_or(0)
        .max(1);
    let x_max = months.len().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<Span> = match (months.first(), months.last()) {
        (Some(first), Some(last)) if first != last => vec![
            Span::raw(first.format("%Y-%m").to_string()),
            Span::raw(last.format("%Y-%m").to_string()),
        ],
        (Some(only), _) => vec![Span::raw(only.format("%Y-%m").to_string())],
        _ => Vec::new(),
    };
    let y_labels: Vec<Span> = vec![
        Span::raw("0"),
        Span::raw((max_count / 2).to_string()),
        Span::raw(max_count.to_string()),
    ];

    let chart = LineChartWidget::new(datasets)
        .block(titled_block(&data.title))
        .x_axis(
            Axis::default()
                .title(data.x_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(data.y_label.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_count as f64])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Nodes evenly spaced on the unit circle, starting at the top.
pub fn circle_layout(nodes: usize) -> Vec<(f64, f64)> {
    if nodes == 1 {
        return vec![(0.0, 0.0)];
    }
    (0..nodes)
        .map(|i| {
            let angle = TAU * i as f64 / nodes as f64;
            (angle.sin(), angle.cos())
        })
        .collect()
}

pub fn draw_network(frame: &mut Frame, area: Rect, data: &NetworkChartData) {
    let positions = circle_layout(data.nodes.len());

    let canvas = Canvas::default()
        .block(titled_block(&data.title))
        .marker(Marker::Braille)
        .x_bounds([-1.4, 1.4])
        .y_bounds([-1.4, 1.4])
        .paint(|ctx| {
            for edge in &data.edges {
                if let (Some(&(x1, y1)), Some(&(x2, y2))) =
                    (positions.get(edge.source), positions.get(edge.target))
                {
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: Color::DarkGray,
                    });
                }
            }
            ctx.layer();
            for (node, &(x, y)) in data.nodes.iter().zip(positions.iter()) {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: 0.02 + 0.08 * node.centrality,
                    color: Color::Cyan,
                });
                if node.labelled {
                    ctx.print(
                        x,
                        y,
                        Line::from(Span::styled(node.name.clone(), Style::default().fg(Color::White))),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}
