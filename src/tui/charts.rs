use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::canvas::Line as CanvasLine,
    widgets::{canvas::Canvas, Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset,
        GraphType, Paragraph},
    Frame,
};

use crate::model::{KmeansReport, SobelReport};
use crate::stats;

const GROUP_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

/// Split a page into the key-hint header and the chart body.
fn page_layout(f: &mut Frame, hint: &str) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(f.area());
    f.render_widget(Paragraph::new(hint.to_string()), chunks[0]);
    chunks[1]
}

fn short_label(name: &str) -> &str {
    name.strip_prefix("sobel_").unwrap_or(name)
}

/// Grouped execution-time bars: one group per flag set, one bar per variant.
/// Variants missing at a flag set simply have no bar in that group.
pub fn draw_sobel_times(f: &mut Frame, report: &SobelReport) {
    let body = page_layout(f, "Execution times  |  Tab: speedup  q: quit");

    let max_avg = report
        .table
        .iter()
        .flatten()
        .flatten()
        .fold(0.0_f64, |acc, &v| acc.max(v));

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Execution time (s), grouped by flag set"),
        )
        .bar_width(9)
        .bar_gap(1)
        .group_gap(3)
        .max((max_avg * 1000.0).max(1.0) as u64);

    for (col, section) in report.flag_sections.iter().enumerate() {
        let color = GROUP_COLORS[col % GROUP_COLORS.len()];
        let bars: Vec<Bar> = section
            .rows
            .iter()
            .map(|row| {
                Bar::default()
                    .value((row.row.average * 1000.0) as u64)
                    .text_value(format!("{:.2}", row.row.average))
                    .label(Line::from(short_label(&row.executable).to_string()))
                    .style(Style::default().fg(color))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(section.flag_set.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, body);
}

/// Speedup bars vs the first-seen executable of each flag set.
pub fn draw_sobel_speedup(f: &mut Frame, report: &SobelReport) {
    let body = page_layout(f, "Speedup  |  Tab: execution times  q: quit");

    let max_speedup = report
        .flag_sections
        .iter()
        .flat_map(|s| s.rows.iter().filter_map(|r| r.row.speedup))
        .fold(1.0_f64, f64::max);

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Speedup vs baseline executable"),
        )
        .bar_width(9)
        .bar_gap(1)
        .group_gap(3)
        .max((max_speedup * 100.0) as u64);

    for (col, section) in report.flag_sections.iter().enumerate() {
        let color = GROUP_COLORS[col % GROUP_COLORS.len()];
        let bars: Vec<Bar> = section
            .rows
            .iter()
            .filter_map(|row| {
                row.row.speedup.map(|sp| {
                    Bar::default()
                        .value((sp * 100.0) as u64)
                        .text_value(format!("{sp:.2}x"))
                        .label(Line::from(short_label(&row.executable).to_string()))
                        .style(Style::default().fg(color))
                })
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(section.flag_set.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, body);
}

/// Measured speedup over the thread sweep against the ideal linear line.
pub fn draw_kmeans_speedup(f: &mut Frame, report: &KmeansReport) {
    let body = page_layout(f, "Speedup  |  Tab: efficiency  q: quit");

    let measured: Vec<(f64, f64)> = report
        .rows
        .iter()
        .filter_map(|r| r.row.speedup.map(|sp| (r.threads as f64, sp)))
        .collect();
    let ideal: Vec<(f64, f64)> = report
        .rows
        .iter()
        .map(|r| (r.threads as f64, r.threads as f64))
        .collect();

    let x_max = report
        .rows
        .last()
        .map(|r| r.threads as f64)
        .unwrap_or(1.0);
    let y_max = measured.iter().map(|p| p.1).fold(x_max, f64::max) * 1.1;

    let datasets = vec![
        Dataset::default()
            .name("Measured speedup")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&measured),
        Dataset::default()
            .name("Ideal linear")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&ideal),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Speedup vs threads"),
        )
        .x_axis(
            Axis::default()
                .title("Threads")
                .bounds([0.0, x_max])
                .labels(["0".to_string(), format!("{x_max:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title("Speedup")
                .bounds([0.0, y_max])
                .labels(["0".to_string(), format!("{y_max:.1}")]),
        );

    f.render_widget(chart, body);
}

/// Parallel efficiency over the thread sweep.
pub fn draw_kmeans_efficiency(f: &mut Frame, report: &KmeansReport) {
    let body = page_layout(f, "Efficiency  |  Tab: box plots  q: quit");

    let points: Vec<(f64, f64)> = report
        .rows
        .iter()
        .filter_map(|r| r.row.efficiency.map(|eff| (r.threads as f64, eff)))
        .collect();

    let x_max = report
        .rows
        .last()
        .map(|r| r.threads as f64)
        .unwrap_or(1.0);
    let y_max = points.iter().map(|p| p.1).fold(100.0_f64, f64::max) * 1.1;

    let datasets = vec![Dataset::default()
        .name("Efficiency (%)")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Parallel efficiency vs threads"),
        )
        .x_axis(
            Axis::default()
                .title("Threads")
                .bounds([0.0, x_max])
                .labels(["0".to_string(), format!("{x_max:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title("%")
                .bounds([0.0, y_max])
                .labels(["0".to_string(), format!("{y_max:.0}")]),
        );

    f.render_widget(chart, body);
}

/// One computation-time box plot per thread count, side by side.
pub fn draw_kmeans_boxplots(f: &mut Frame, report: &KmeansReport) {
    let body = page_layout(f, "Time distribution  |  Tab: speedup  q: quit");

    if report.rows.is_empty() {
        f.render_widget(Paragraph::new("no data"), body);
        return;
    }

    let constraints: Vec<Constraint> = report
        .rows
        .iter()
        .map(|_| Constraint::Ratio(1, report.rows.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(body);

    for (row, cell) in report.rows.iter().zip(cells.iter()) {
        render_box_plot(f, *cell, &row.samples, format!("{} threads", row.threads));
    }
}

fn draw_line(ctx: &mut ratatui::widgets::canvas::Context, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
    ctx.draw(&CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color,
    });
}

/// Horizontal box plot of `samples` inside a bordered cell.
fn render_box_plot(f: &mut Frame, area: Rect, samples: &[f64], title: String) {
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(dist) = stats::distribution(samples) else {
        f.render_widget(Paragraph::new("no samples"), inner);
        return;
    };
    let mean = stats::mean(samples).unwrap_or(dist.median);
    let pad = ((dist.max - dist.min) * 0.1).max(0.01);

    let canvas = Canvas::default()
        .x_bounds([dist.min - pad, dist.max + pad])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            // box (p25 to p75)
            draw_line(ctx, dist.p25, -0.4, dist.p75, -0.4, Color::White);
            draw_line(ctx, dist.p25, 0.4, dist.p75, 0.4, Color::White);
            draw_line(ctx, dist.p25, -0.4, dist.p25, 0.4, Color::White);
            draw_line(ctx, dist.p75, -0.4, dist.p75, 0.4, Color::White);

            // median and mean markers
            draw_line(ctx, dist.median, -0.4, dist.median, 0.4, Color::Yellow);
            draw_line(ctx, mean, -0.4, mean, 0.4, Color::Cyan);

            // whiskers with caps
            draw_line(ctx, dist.min, 0.0, dist.p25, 0.0, Color::White);
            draw_line(ctx, dist.p75, 0.0, dist.max, 0.0, Color::White);
            draw_line(ctx, dist.min, -0.2, dist.min, 0.2, Color::White);
            draw_line(ctx, dist.max, -0.2, dist.max, 0.2, Color::White);
        });
    f.render_widget(canvas, inner);
}
