//! Main UI rendering logic

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Dataset, Gauge, GraphType, List, ListItem,
        Paragraph, Wrap,
    },
    Frame,
};

use super::app::{App, Loaded};
use crate::chart::area::closed_points;
use crate::chart::primitives::sample_spline;
use crate::format::{format_count, format_delay, format_hour, format_percentage};
use crate::leaderboard::Badge;
use crate::stats::HOURS_PER_DAY;
use crate::summary::pad_to_width;

const HOUR_LABEL_STEP: u32 = 3;
const SPLINE_SAMPLES: usize = 8;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Percentage(45), // Gauge, weekdays, leaderboard
            Constraint::Min(8),         // Hours
            Constraint::Length(3),      // Footer
        ])
        .split(size);

    render_header(f, app, chunks[0]);

    match &app.loaded {
        Some(loaded) => {
            let top = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(25),
                    Constraint::Percentage(45),
                    Constraint::Percentage(30),
                ])
                .split(chunks[1]);
            render_gauge(f, app, top[0]);
            render_weekdays(f, loaded, top[1]);
            render_leaderboard(f, loaded, top[2]);
            render_hours(f, loaded, chunks[2]);
        }
        None => {
            let body = Rect {
                height: chunks[1].height + chunks[2].height,
                ..chunks[1]
            };
            render_failure(f, app, body);
        }
    }

    render_footer(f, chunks[3]);
}

fn block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::Cyan))
}

/// Render the metric header
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let failure = app.options.failure_message.as_str();
    let (rate, written, skipped, delay) = match &app.loaded {
        Some(loaded) => (
            format_percentage(loaded.document.ratio_replied_wrs),
            format_count(loaded.document.num_wrs),
            format_count(loaded.document.num_skipped_wrs),
            format_delay(loaded.document.avg_reply_delay),
        ),
        None => (
            failure.to_string(),
            failure.to_string(),
            failure.to_string(),
            failure.to_string(),
        ),
    };

    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("Replied ", label),
        Span::styled(rate, value),
        Span::styled("  Written ", label),
        Span::styled(written, value),
        Span::styled("  Skipped ", label),
        Span::styled(skipped, value),
        Span::styled("  Reply delay ", label),
        Span::styled(delay, value),
    ]);

    let header = Paragraph::new(line).block(block(&format!("WR statistics - {}", app.source)));
    f.render_widget(header, area);
}

fn render_gauge(f: &mut Frame, app: &App, area: Rect) {
    let ratio = app.gauge_ratio();
    let gauge = Gauge::default()
        .block(block("Replied"))
        .gauge_style(Style::default().fg(Color::LightRed).bg(Color::Black))
        .ratio(ratio)
        .label(format_percentage(ratio));
    f.render_widget(gauge, area);
}

/// Bars in display slot order
fn render_weekdays(f: &mut Frame, loaded: &Loaded, area: Rect) {
    let data: Vec<(&str, u64)> = loaded
        .days
        .iter()
        .map(|day| (day.label, day.count as u64))
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let slots = data.len().max(1) as u16;
    let bar_width = (inner_width / slots).saturating_sub(1).max(1);

    let chart = BarChart::default()
        .block(block("WRs per weekday"))
        .data(data.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::LightBlue))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(chart, area);
}

fn render_hours(f: &mut Frame, loaded: &Loaded, area: Rect) {
    let points = sample_spline(&closed_points(&loaded.hours), 0.0, SPLINE_SAMPLES);
    let max = loaded.hours.iter().map(|hour| hour.count).max().unwrap_or(0).max(1) as f64;

    let x_labels: Vec<Span> = (0..=HOURS_PER_DAY)
        .step_by(HOUR_LABEL_STEP as usize)
        .map(|hour| Span::raw(format_hour(hour)))
        .collect();
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{}", max as u32)),
    ];

    let dataset = Dataset::default()
        .name("replies")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block("Replies per hour"))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, HOURS_PER_DAY as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn badge_color(badge: Badge) -> Color {
    match badge {
        Badge::Gold => Color::Yellow,
        Badge::Silver => Color::White,
        Badge::Bronze => Color::LightRed,
        Badge::Neutral => Color::DarkGray,
    }
}

fn render_leaderboard(f: &mut Frame, loaded: &Loaded, area: Rect) {
    let items: Vec<ListItem> = if loaded.leaderboard.is_empty() {
        vec![ListItem::new(Span::styled(
            "Nobody in CC",
            Style::default().fg(Color::Gray),
        ))]
    } else {
        loaded
            .leaderboard
            .iter()
            .map(|entry| {
                let badge = Badge::for_rank(entry.rank);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        pad_to_width(&badge.symbol(entry.rank), 4),
                        Style::default().fg(badge_color(badge)),
                    ),
                    Span::styled(
                        format!("@{}", entry.username),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!(" {}x", entry.count),
                        Style::default().fg(Color::Cyan),
                    ),
                ]))
            })
            .collect()
    };

    f.render_widget(List::new(items).block(block("Most in CC")), area);
}

fn render_failure(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        app.options.failure_message.clone(),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))];
    if let Some(err) = &app.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Gray),
        )));
    }
    let paragraph = Paragraph::new(lines)
        .block(block("Error"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new("[r] Replay animation  [q/Esc] Quit")
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardOptions;
    use crate::error::FetchError;
    use crate::stats::tests::sample;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draws_all_panels() {
        let app = App::new("stats.json", DashboardOptions::default(), Ok(sample()));
        let text = screen(&app, 140, 40);
        assert!(text.contains("WRs per weekday"));
        assert!(text.contains("Replies per hour"));
        assert!(text.contains("Most in CC"));
        assert!(text.contains("@jdoe"));
        assert!(text.contains("38 WRs"));
    }

    #[test]
    fn test_redraw_after_resize() {
        let mut app = App::new("stats.json", DashboardOptions::default(), Ok(sample()));
        screen(&app, 140, 40);
        app.on_resize(80, 30);
        let text = screen(&app, 80, 30);
        assert!(text.contains("Most in CC"));
    }

    #[test]
    fn test_failure_message_shown() {
        let app = App::new(
            "stats.json",
            DashboardOptions::default(),
            Err(FetchError::ParseFailure("missing field".to_string())),
        );
        let text = screen(&app, 120, 30);
        assert!(text.contains("Could not load statistics"));
        assert!(!text.contains("WRs per weekday"));
    }
}
