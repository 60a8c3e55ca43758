mod report;
mod tui;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use timepivot_core::export::{default_file_name, write_csv, write_json};
use timepivot_core::{
    export_to_path, parse_date, parse_month, Config, ExportFormat, FileTimesheetRepository, LeaveCodeTable,
    ReportPeriod, ReportQuery, UserReportUseCase,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "timepivot")]
#[command(about = "Per-user, per-day timesheet reports", long_about = None)]
struct Cli {
    /// Dataset file (default: config value, then ~/.timepivot/dataset.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file (default: ~/.timepivot/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone, Default)]
struct ReportArgs {
    /// Only count time booked on this project
    #[arg(long)]
    project: Option<i64>,

    /// Only include members of this team
    #[arg(long)]
    team: Option<String>,

    /// table, json, csv or xlsx (prefixes accepted)
    #[arg(long, short)]
    format: Option<String>,

    /// Output file, or "-" for stdout (json/csv). Defaults to a generated file name.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Report one calendar month (usage: month 2025-01 | this | last | next | -2)
    Month {
        month: Option<String>,
        #[command(flatten)]
        args: ReportArgs,
    },
    /// Report an inclusive date range (usage: range --from 2025-01-06 --to 2025-01-12)
    Range {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[command(flatten)]
        args: ReportArgs,
    },
    /// Show the active leave-code table
    LeaveCodes,
    /// Browse monthly reports in the terminal
    Browse {
        month: Option<String>,
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        team: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_repository(data: Option<&Path>, config: &Config) -> Result<FileTimesheetRepository> {
    match data.or(config.dataset_path.as_deref()) {
        Some(path) => FileTimesheetRepository::open(path),
        None => FileTimesheetRepository::new(None),
    }
}

fn main() -> Result<()> {
    init_tracing();

    let Cli { data, config: config_path, command } = Cli::parse();
    let config = Config::load(config_path.as_deref())?;
    let leave_codes = config.leave_code_table();
    let today = Local::now().date_naive();

    match command {
        Some(Commands::Month { month, args }) => {
            let period = parse_month(month.as_deref().unwrap_or("this"), today)?;
            run_report(data.as_deref(), &config, &leave_codes, period, args)?;
        }
        Some(Commands::Range { from, to, args }) => {
            let period = ReportPeriod::range(parse_date(&from)?, parse_date(&to)?)?;
            run_report(data.as_deref(), &config, &leave_codes, period, args)?;
        }
        Some(Commands::LeaveCodes) => {
            report::show_leave_codes(&leave_codes);
        }
        Some(Commands::Browse { month, project, team }) => {
            let period = parse_month(month.as_deref().unwrap_or("this"), today)?;
            let repo = open_repository(data.as_deref(), &config)?;
            let usecase = UserReportUseCase::new(&repo, &repo, &repo, &leave_codes);
            let query = ReportQuery::new(period).with_project(project).with_team(team);

            tui::run(|q| usecase.build(q), query)?;
        }
        None => {
            // No subcommand: this month's report as a table.
            let period = parse_month("this", today)?;
            run_report(data.as_deref(), &config, &leave_codes, period, ReportArgs::default())?;
        }
    }
    Ok(())
}

fn run_report(
    data: Option<&Path>,
    config: &Config,
    leave_codes: &LeaveCodeTable,
    period: ReportPeriod,
    args: ReportArgs,
) -> Result<()> {
    let repo = open_repository(data, config)?;
    debug!(dataset = %repo.path().display(), period = %period.label(), "Running report");

    let usecase = UserReportUseCase::new(&repo, &repo, &repo, leave_codes);
    let query = ReportQuery::new(period)
        .with_project(args.project)
        .with_team(args.team);
    let user_report = usecase.build(&query)?;

    let format: ExportFormat = match args.format.as_deref().or(config.default_format.as_deref()) {
        Some(f) => f.parse()?,
        None => ExportFormat::Table,
    };

    if format == ExportFormat::Table {
        report::show_report(&user_report);
        return Ok(());
    }

    match args.output {
        Some(path) if path.as_os_str() == "-" => match format {
            ExportFormat::Json => write_json(&user_report, io::stdout().lock())?,
            ExportFormat::Csv => write_csv(&user_report, io::stdout().lock())?,
            _ => anyhow::bail!("Only json and csv can be written to stdout"),
        },
        output => {
            let path = match output.or_else(|| default_file_name(&user_report, format).map(PathBuf::from)) {
                Some(p) => p,
                None => anyhow::bail!("No output file for format {}", format),
            };
            export_to_path(&user_report, format, &path)?;
            println!("Exported {} rows to {}", user_report.rows.len(), path.display());
        }
    }
    Ok(())
}
