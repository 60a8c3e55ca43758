//! Pivots flat work-log rows into one row per user and one column per day.
//!
//! Rows are folded in input order. Users appear in the order they were first seen, and
//! the per-day activity lists keep fold order, so identical input always produces
//! identical output.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::model::accumulator::UserAccumulator;
use crate::model::leave_code::LeaveCodeTable;
use crate::model::report::{CellValue, ReportRow, TOTALS_ROW_NAME};
use crate::model::team::Team;
use crate::model::work_log::WorkLogRow;
use crate::time::expand_date_range;

/// Placeholder for a missing role or team.
pub const UNKNOWN: &str = "N/A";

pub struct TimesheetPivot<'a> {
    dates: Vec<NaiveDate>,
    leave_codes: &'a LeaveCodeTable,
}

impl<'a> TimesheetPivot<'a> {
    pub fn new(begin: NaiveDate, end: NaiveDate, leave_codes: &'a LeaveCodeTable) -> Self {
        Self {
            dates: expand_date_range(begin, end),
            leave_codes,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Groups rows by username.
    ///
    /// `lookup_teams` runs once per distinct username, on first sight, and only when
    /// that row carries a user id.
    pub fn fold<F>(&self, rows: &[WorkLogRow], mut lookup_teams: F) -> Vec<UserAccumulator>
    where
        F: FnMut(i64) -> Vec<Team>,
    {
        let mut accumulators: Vec<UserAccumulator> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let slot = match index.get(&row.username) {
                Some(&i) => i,
                None => {
                    let team = match row.user_id {
                        Some(user_id) => {
                            debug!(user_id, username = %row.username, "Looking up teams");
                            join_team_names(&lookup_teams(user_id))
                        }
                        None => UNKNOWN.to_string(),
                    };
                    let role = row.role.clone().unwrap_or_else(|| UNKNOWN.to_string());

                    accumulators.push(UserAccumulator::new(
                        row.username.clone(),
                        role,
                        team,
                        &self.dates,
                    ));
                    index.insert(row.username.clone(), accumulators.len() - 1);
                    accumulators.len() - 1
                }
            };

            accumulators[slot].add(row);
        }

        accumulators
    }

    pub fn build_rows(&self, accumulators: Vec<UserAccumulator>) -> Vec<ReportRow> {
        accumulators
            .into_iter()
            .map(|acc| {
                let days = self
                    .dates
                    .iter()
                    .map(|d| {
                        let value =
                            resolve_day_value(acc.day_total(*d), acc.day_activities(*d), self.leave_codes);
                        (*d, value)
                    })
                    .collect();

                ReportRow {
                    name: acc.name,
                    role: acc.role,
                    team: acc.team,
                    total_work: acc.total_work_hours,
                    onsite: acc.onsite_hours,
                    offsite: acc.offsite_hours,
                    days,
                }
            })
            .collect()
    }

    /// Fold, resolve and append the totals row in one pass.
    pub fn pivot<F>(&self, rows: &[WorkLogRow], lookup_teams: F) -> Vec<ReportRow>
    where
        F: FnMut(i64) -> Vec<Team>,
    {
        let accumulators = self.fold(rows, lookup_teams);
        let mut report = self.build_rows(accumulators);
        append_totals_row(&mut report, &self.dates);
        report
    }
}

/// The value shown for one user on one day.
///
/// Non-zero hours win. On a zero-hour day the first recorded activity that has a leave
/// code supplies the cell; with none, the cell is `0`.
pub fn resolve_day_value(hours: i64, activities: &[String], leave_codes: &LeaveCodeTable) -> CellValue {
    if hours != 0 {
        return CellValue::Hours(hours);
    }

    activities
        .iter()
        .find_map(|a| leave_codes.lookup(a))
        .map(|code| CellValue::Leave(code.to_string()))
        .unwrap_or(CellValue::Hours(0))
}

/// Appends a `Totals` row summing every numeric cell. Leave codes contribute nothing.
///
/// Does nothing for an empty report. Rows already named `Totals` are skipped.
pub fn append_totals_row(rows: &mut Vec<ReportRow>, dates: &[NaiveDate]) {
    if rows.is_empty() {
        return;
    }

    let mut totals = ReportRow {
        name: TOTALS_ROW_NAME.to_string(),
        role: String::new(),
        team: String::new(),
        total_work: 0,
        onsite: 0,
        offsite: 0,
        days: dates.iter().map(|d| (*d, CellValue::Hours(0))).collect(),
    };

    let mut day_sums: Vec<i64> = vec![0; dates.len()];

    for row in rows.iter().filter(|r| !r.is_totals()) {
        totals.total_work += row.total_work;
        totals.onsite += row.onsite;
        totals.offsite += row.offsite;

        for (sum, date) in day_sums.iter_mut().zip(dates) {
            if let Some(h) = row.day(*date).and_then(CellValue::numeric) {
                *sum += h;
            }
        }
    }

    for (date, sum) in dates.iter().zip(day_sums) {
        totals.days.insert(*date, CellValue::Hours(sum));
    }

    rows.push(totals);
}

fn join_team_names(teams: &[Team]) -> String {
    if teams.is_empty() {
        return UNKNOWN.to_string();
    }
    teams.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ")
}
