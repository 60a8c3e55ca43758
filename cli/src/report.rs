use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Style};
use tabled::{Table, Tabled};
use timepivot_core::model::report::display_header;
use timepivot_core::{LeaveCodeTable, UserReport};

#[derive(Tabled)]
struct LeaveCodeRow {
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Code")]
    code: String,
}

pub fn show_report(report: &UserReport) {
    println!(
        "\n\x1b[1;36m{} {}\x1b[0m{}",
        report.title,
        report.period.label(),
        filter_summary(report)
    );

    if !report.has_data {
        println!("No time recorded in this period.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(display_header(&report.dates));
    for row in &report.rows {
        builder.push_record(row.to_record());
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.modify(Rows::first(), Color::FG_CYAN); // Header color
    table.modify(Rows::last(), Color::BOLD); // Totals

    println!("{}", table);

    if let (Some(prev), Some(next)) = (report.previous, report.next) {
        println!("\x1b[2mprevious: {}  next: {}\x1b[0m", prev.label(), next.label());
    }
}

pub fn show_leave_codes(codes: &LeaveCodeTable) {
    if codes.is_empty() {
        println!("No leave codes configured.");
        return;
    }

    let rows: Vec<LeaveCodeRow> = codes
        .iter()
        .map(|(activity, code)| LeaveCodeRow {
            activity: activity.to_string(),
            code: code.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.modify(Rows::first(), Color::FG_CYAN);
    println!("{}", table);
}

fn filter_summary(report: &UserReport) -> String {
    let mut parts = Vec::new();
    if let Some(project) = report.project_id {
        parts.push(format!("project {}", project));
    }
    if let Some(team) = &report.team {
        parts.push(format!("team {}", team));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}
