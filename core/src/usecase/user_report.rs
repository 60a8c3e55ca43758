use crate::model::leave_code::LeaveCodeTable;
use crate::repository::{TeamRepository, UserRepository, WorkLogRepository};
use crate::service::dto::{ReportQuery, UserReport};
use crate::service::pivot::TimesheetPivot;
use anyhow::Result;
use tracing::{info, warn};

const MONTHLY_TITLE: &str = "Monthly user report";
const RANGE_TITLE: &str = "User report";

pub struct UserReportUseCase<'a, U, W, T>
where
    U: UserRepository,
    W: WorkLogRepository,
    T: TeamRepository,
{
    user_repo: &'a U,
    work_log_repo: &'a W,
    team_repo: &'a T,
    leave_codes: &'a LeaveCodeTable,
}

impl<'a, U, W, T> UserReportUseCase<'a, U, W, T>
where
    U: UserRepository,
    W: WorkLogRepository,
    T: TeamRepository,
{
    pub fn new(user_repo: &'a U, work_log_repo: &'a W, team_repo: &'a T, leave_codes: &'a LeaveCodeTable) -> Self {
        Self {
            user_repo,
            work_log_repo,
            team_repo,
            leave_codes,
        }
    }

    pub fn build(&self, query: &ReportQuery) -> Result<UserReport> {
        let period = query.period;

        // 1. Select users
        let users = self.user_repo.list_users(query.team.as_deref())?;
        let user_ids: Vec<i64> = users.iter().map(|u| u.id).collect();

        // 2. Fetch rows
        let rows = if user_ids.is_empty() {
            Vec::new()
        } else {
            self.work_log_repo
                .fetch_work_log_rows(&user_ids, period.begin(), period.end(), query.project_id)?
        };

        // 3. Pivot
        let pivot = TimesheetPivot::new(period.begin(), period.end(), self.leave_codes);
        let report_rows = pivot.pivot(&rows, |user_id| {
            match self.team_repo.fetch_teams_for_user(user_id, query.project_id) {
                Ok(teams) => teams,
                Err(e) => {
                    warn!(user_id, error = %e, "Team lookup failed, reporting team as N/A");
                    Vec::new()
                }
            }
        });

        info!(
            period = %period.label(),
            users = user_ids.len(),
            rows = rows.len(),
            report_rows = report_rows.len(),
            "Built user report"
        );

        Ok(UserReport {
            title: (if period.is_monthly() { MONTHLY_TITLE } else { RANGE_TITLE }).to_string(),
            period,
            previous: period.previous().ok(),
            next: period.next().ok(),
            project_id: query.project_id,
            team: query.team.clone(),
            dates: pivot.dates().to_vec(),
            has_data: !report_rows.is_empty(),
            rows: report_rows,
        })
    }
}
