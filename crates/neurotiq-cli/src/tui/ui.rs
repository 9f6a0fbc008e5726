//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  🧠 NeurotiQ   running  #42  t=42..141        │
//! ├──────────────────────────────┬───────────────┤
//! │  ╭ brain waves               │  Latest       │
//! │  │  ~~alpha~~beta~~          │  alpha  9.81  │
//! │  │  ~~theta~~delta~~         │  beta   3.02  │
//! │  ╰────────────────────────── │  ...          │
//! ├──────────────────────────────┴───────────────┤
//! │  p: pause   b: focus band   q: quit          │
//! └──────────────────────────────────────────────┘

use super::app::App;
use neurotiq_core::{Band, DriverState, Sample};
use ratatui::{prelude::*, widgets::*};

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // main
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    let window = app.snapshot();

    draw_title(f, rows[0], app, &window);
    draw_main(f, rows[1], app, &window);
    draw_keys(f, rows[2]);
}

fn band_color(band: Band) -> Color {
    match band {
        Band::Alpha => Color::Cyan,
        Band::Beta => Color::Green,
        Band::Theta => Color::Magenta,
        Band::Delta => Color::Yellow,
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &App, window: &[Sample]) {
    let (state_label, state_color) = match app.state() {
        DriverState::Running => ("running", Color::Green),
        DriverState::Idle => ("paused", Color::Red),
    };
    let range = match (window.first(), window.last()) {
        (Some(first), Some(last)) => format!("t={}..{}", first.time, last.time),
        _ => "empty".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" 🧠 NeurotiQ ", Style::default().bold().fg(Color::Cyan)),
            Span::styled(format!(" {state_label} "), Style::default().bold().fg(state_color)),
            Span::styled(
                format!(
                    "  #{}  {range}  {}ms/tick  up {}s ",
                    app.ticks(),
                    app.tick_interval().as_millis(),
                    app.uptime().as_secs()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App, window: &[Sample]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(area);

    draw_chart(f, cols[0], app, window);
    draw_latest(f, cols[1], app, window);
}

fn draw_chart(f: &mut Frame, area: Rect, app: &App, window: &[Sample]) {
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        let p = Paragraph::new("Waiting for samples")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Brain waves "));
        f.render_widget(p, area);
        return;
    };

    let series: Vec<(Band, Vec<(f64, f64)>)> = Band::ALL
        .iter()
        .map(|&b| (b, band_points(window, b)))
        .collect();

    let (y_min, y_max) = series
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|&(_, v)| v))
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let y_min = (y_min - 1.0).floor();
    let y_max = (y_max + 1.0).ceil();

    let focus = app.focus();
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(band, pts)| {
            let style = if *band == focus {
                Style::default().fg(band_color(*band)).bold()
            } else {
                Style::default().fg(band_color(*band)).dim()
            };
            Dataset::default()
                .name(band.to_string())
                .marker(if *band == focus {
                    symbols::Marker::Braille
                } else {
                    symbols::Marker::Dot
                })
                .graph_type(GraphType::Line)
                .style(style)
                .data(pts)
        })
        .collect();

    let x_min = first.time as f64;
    let x_max = (last.time as f64).max(x_min + 1.0);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Brain waves  focus: {focus} ")),
        )
        .x_axis(Axis::default().bounds([x_min, x_max]).labels(vec![
            Line::from(format!("{}", first.time)),
            Line::from(format!("{}", last.time)),
        ]))
        .y_axis(Axis::default().bounds([y_min, y_max]).labels(vec![
            Line::from(format!("{y_min:.0}")),
            Line::from(format!("{y_max:.0}")),
        ]));

    f.render_widget(chart, area);
}

/// `(time, value)` points of one band, taken from the frame's snapshot so
/// every dataset and the axes agree.
fn band_points(window: &[Sample], band: Band) -> Vec<(f64, f64)> {
    window.iter().map(|s| (s.time as f64, s.get(band))).collect()
}

fn draw_latest(f: &mut Frame, area: Rect, app: &App, window: &[Sample]) {
    let mut lines = Vec::new();
    match window.last() {
        Some(latest) => {
            lines.push(Line::from(Span::styled(
                format!("t = {}", latest.time),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            for band in Band::ALL {
                let pointer = if band == app.focus() { "▸" } else { " " };
                let style = if band == app.focus() {
                    Style::default().fg(band_color(band)).bold()
                } else {
                    Style::default().fg(band_color(band))
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("{pointer} ")),
                    Span::styled(format!("{:<6}", band.to_string()), style),
                    Span::raw(format!("{:>8.2}", latest.get(band))),
                ]));
            }
        }
        None => lines.push(Line::from("—")),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{}/{} samples", window.len(), app.capacity()),
        Style::default().fg(Color::DarkGray),
    )));

    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Latest "));
    f.render_widget(p, area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(" p/space: pause/resume   b/tab: focus band   q: quit")
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurotiq_core::baseline;

    #[test]
    fn band_points_follow_the_snapshot() {
        let window: Vec<Sample> = (7..10).map(baseline).collect();
        let points = band_points(&window, Band::Theta);
        assert_eq!(
            points,
            vec![
                (7.0, baseline(7).theta),
                (8.0, baseline(8).theta),
                (9.0, baseline(9).theta),
            ]
        );
        assert!(band_points(&[], Band::Alpha).is_empty());
    }
}
