use chrono::NaiveDate;
use serde::Serialize;

use crate::model::report::ReportRow;
use crate::time::ReportPeriod;

/// What a report view needs: the pivoted rows plus the period and its neighbours.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserReport {
    pub title: String,
    pub period: ReportPeriod,
    pub previous: Option<ReportPeriod>,
    pub next: Option<ReportPeriod>,
    pub project_id: Option<i64>,
    pub team: Option<String>,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<ReportRow>,
    pub has_data: bool,
}

impl UserReport {
    pub fn user_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|r| !r.is_totals())
    }

    pub fn totals(&self) -> Option<&ReportRow> {
        self.rows.last().filter(|r| r.is_totals())
    }
}

/// Filters for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub period: ReportPeriod,
    pub project_id: Option<i64>,
    pub team: Option<String>,
}

impl ReportQuery {
    pub fn new(period: ReportPeriod) -> Self {
        Self { period, project_id: None, team: None }
    }

    pub fn with_project(mut self, project_id: Option<i64>) -> Self {
        self.project_id = project_id;
        self
    }

    pub fn with_team(mut self, team: Option<String>) -> Self {
        self.team = team;
        self
    }
}
