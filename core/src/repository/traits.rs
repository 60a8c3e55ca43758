use crate::model::team::Team;
use crate::model::user::User;
use crate::model::work_log::WorkLogRow;
use anyhow::Result;
use chrono::NaiveDate;

pub trait WorkLogRepository {
    /// Rows for the given users between `start` and `end` inclusive, optionally limited to one project.
    fn fetch_work_log_rows(
        &self,
        user_ids: &[i64],
        start: NaiveDate,
        end: NaiveDate,
        project_id: Option<i64>,
    ) -> Result<Vec<WorkLogRow>>;
}

pub trait TeamRepository {
    fn fetch_teams_for_user(&self, user_id: i64, project_id: Option<i64>) -> Result<Vec<Team>>;
}

pub trait UserRepository {
    /// Reportable users, optionally restricted to members of `team`.
    fn list_users(&self, team: Option<&str>) -> Result<Vec<User>>;
}
