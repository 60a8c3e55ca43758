use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use timepivot_core::{CellValue, ReportQuery, ReportRow, UserReport};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::ReportApp;

const NUM_WIDTH: u16 = 5;
const DAY_WIDTH: u16 = 3;
// borders + highlight symbol
const TABLE_CHROME: u16 = 2 + 3;

pub fn draw<F>(f: &mut Frame, app: &mut ReportApp<F>)
where
    F: Fn(&ReportQuery) -> Result<UserReport>,
{
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Report
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let nav = Line::from(vec![
        Span::styled(" < ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} {}", title_of(app), app.query.period.label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(nav)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    if let Some(err) = &app.error {
        let msg = Paragraph::new(format!("Could not build report: {}", err))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(msg, main_chunks[1]);
    } else if app.report.as_ref().is_some_and(|r| r.has_data) {
        draw_report_table(f, app, main_chunks[1]);
    } else {
        let msg = Paragraph::new("No time recorded in this period")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(msg, main_chunks[1]);
    }

    // Footer
    let footer = Paragraph::new("←/→: Month | h/l: Scroll days | j/k: Navigate | r: Reload | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn title_of<F>(app: &ReportApp<F>) -> &str
where
    F: Fn(&ReportQuery) -> Result<UserReport>,
{
    app.report.as_ref().map_or("Report", |r| r.title.as_str())
}

fn draw_report_table<F>(f: &mut Frame, app: &mut ReportApp<F>, area: Rect)
where
    F: Fn(&ReportQuery) -> Result<UserReport>,
{
    let Some(report) = &app.report else { return };

    let name_width = column_width(report.rows.iter().map(|r| r.name.as_str()), 4, 24);
    let team_width = column_width(report.rows.iter().map(|r| r.team.as_str()), 4, 20);

    // Fixed columns plus one space between every column.
    let fixed = name_width + team_width + NUM_WIDTH * 3 + 5 + TABLE_CHROME;
    let visible = (area.width.saturating_sub(fixed) / (DAY_WIDTH + 1)).max(1) as usize;
    let days: Vec<NaiveDate> = report.dates.iter().skip(app.day_offset).take(visible).copied().collect();

    let mut header_cells = vec![
        Cell::from("Name"),
        Cell::from("Team"),
        Cell::from("Total"),
        Cell::from("On"),
        Cell::from("Off"),
    ];
    header_cells.extend(days.iter().map(|d| {
        let style = if matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Cell::from(Span::styled(d.format("%d").to_string(), style))
    }));

    let rows: Vec<Row> = report.rows.iter().map(|row| report_row(row, &days)).collect();

    let mut widths = vec![
        Constraint::Length(name_width),
        Constraint::Length(team_width),
        Constraint::Length(NUM_WIDTH),
        Constraint::Length(NUM_WIDTH),
        Constraint::Length(NUM_WIDTH),
    ];
    widths.extend(days.iter().map(|_| Constraint::Length(DAY_WIDTH)));

    let span_title = match (days.first(), days.last()) {
        (Some(first), Some(last)) => format!(" Days {}-{} of {} ", first.day(), last.day(), report.dates.len()),
        _ => " Days ".to_string(),
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).style(Style::default().fg(Color::Yellow)))
        .block(Block::default().title(span_title).borders(Borders::ALL).border_type(BorderType::Rounded))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn report_row<'a>(row: &'a ReportRow, days: &[NaiveDate]) -> Row<'a> {
    let base = if row.is_totals() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut cells = vec![
        Cell::from(Span::styled(row.name.as_str(), base.add_modifier(Modifier::BOLD))),
        Cell::from(Span::styled(row.team.as_str(), base)),
        Cell::from(Span::styled(row.total_work.to_string(), base)),
        Cell::from(Span::styled(row.onsite.to_string(), base)),
        Cell::from(Span::styled(row.offsite.to_string(), base)),
    ];

    cells.extend(days.iter().map(|d| {
        let value = row.day(*d).cloned().unwrap_or_default();
        let style = match &value {
            CellValue::Leave(_) => base.fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            CellValue::Hours(0) => base.fg(Color::DarkGray),
            CellValue::Hours(_) => base,
        };
        Cell::from(Span::styled(value.to_string(), style))
    }));

    Row::new(cells)
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: u16, max: u16) -> u16 {
    let widest = values.map(|v| v.width()).max().unwrap_or(0);
    (widest as u16).clamp(min, max)
}
