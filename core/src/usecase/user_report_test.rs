#[cfg(test)]
mod tests {
    use crate::model::leave_code::LeaveCodeTable;
    use crate::model::report::CellValue;
    use crate::model::team::Team;
    use crate::model::user::User;
    use crate::model::work_log::WorkLogRow;
    use crate::repository::{TeamRepository, UserRepository, WorkLogRepository};
    use crate::service::dto::ReportQuery;
    use crate::time::ReportPeriod;
    use crate::usecase::user_report::UserReportUseCase;
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    struct MockUserRepo {
        users: Vec<User>,
        seen_team: RefCell<Option<Option<String>>>,
    }

    impl UserRepository for MockUserRepo {
        fn list_users(&self, team: Option<&str>) -> Result<Vec<User>> {
            *self.seen_team.borrow_mut() = Some(team.map(str::to_string));
            Ok(self.users.clone())
        }
    }

    struct MockWorkLogRepo {
        rows: Vec<WorkLogRow>,
        calls: RefCell<Vec<(Vec<i64>, NaiveDate, NaiveDate, Option<i64>)>>,
    }

    impl WorkLogRepository for MockWorkLogRepo {
        fn fetch_work_log_rows(
            &self,
            user_ids: &[i64],
            start: NaiveDate,
            end: NaiveDate,
            project_id: Option<i64>,
        ) -> Result<Vec<WorkLogRow>> {
            self.calls.borrow_mut().push((user_ids.to_vec(), start, end, project_id));
            Ok(self.rows.clone())
        }
    }

    struct MockTeamRepo {
        calls: RefCell<Vec<(i64, Option<i64>)>>,
        fail: bool,
    }

    impl TeamRepository for MockTeamRepo {
        fn fetch_teams_for_user(&self, user_id: i64, project_id: Option<i64>) -> Result<Vec<Team>> {
            self.calls.borrow_mut().push((user_id, project_id));
            if self.fail {
                return Err(anyhow!("team store unavailable"));
            }
            Ok(vec![Team { name: format!("team-{}", user_id) }])
        }
    }

    fn user(id: i64, name: &str) -> User {
        User { id, username: name.to_string(), system_account: false }
    }

    fn team_repo(fail: bool) -> MockTeamRepo {
        MockTeamRepo { calls: RefCell::new(Vec::new()), fail }
    }

    fn user_repo(users: Vec<User>) -> MockUserRepo {
        MockUserRepo { users, seen_team: RefCell::new(None) }
    }

    fn work_log_repo(rows: Vec<WorkLogRow>) -> MockWorkLogRepo {
        MockWorkLogRepo { rows, calls: RefCell::new(Vec::new()) }
    }

    #[test]
    fn test_build_monthly_report() {
        let users = user_repo(vec![user(1, "alice"), user(2, "bob")]);
        let logs = work_log_repo(vec![
            WorkLogRow::new("alice", date(2), 8 * 3600).with_user_id(1).with_role("ROLE_USER"),
            WorkLogRow::new("bob", date(2), 0).with_user_id(2).with_activity("Vacation"),
            WorkLogRow::new("alice", date(3), 4 * 3600).with_user_id(1),
            WorkLogRow::new("bob", date(3), 6 * 3600).with_user_id(2),
        ]);
        let teams = team_repo(false);
        let codes = LeaveCodeTable::default();
        let usecase = UserReportUseCase::new(&users, &logs, &teams, &codes);

        let query = ReportQuery::new(ReportPeriod::month(2025, 1).unwrap())
            .with_project(Some(7))
            .with_team(Some("Ops".to_string()));
        let report = usecase.build(&query).unwrap();

        assert!(report.has_data);
        assert_eq!(report.title, "Monthly user report");
        assert_eq!(report.dates.len(), 31);
        assert_eq!(report.previous, Some(ReportPeriod::month(2024, 12).unwrap()));
        assert_eq!(report.next, Some(ReportPeriod::month(2025, 2).unwrap()));

        // collaborators received the filters
        assert_eq!(*users.seen_team.borrow(), Some(Some("Ops".to_string())));
        assert_eq!(*logs.calls.borrow(), vec![(vec![1, 2], date(1), date(31), Some(7))]);
        assert_eq!(*teams.calls.borrow(), vec![(1, Some(7)), (2, Some(7))]);

        let rows: Vec<_> = report.user_rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team, "team-1");
        assert_eq!(rows[0].role, "ROLE_USER");
        assert_eq!(rows[1].day(date(2)), Some(&CellValue::Leave("V".to_string())));

        let totals = report.totals().unwrap();
        assert_eq!(totals.total_work, 18);
        assert_eq!(totals.day(date(2)), Some(&CellValue::Hours(8)));
        assert_eq!(totals.day(date(3)), Some(&CellValue::Hours(10)));
        assert_eq!(totals.day(date(4)), Some(&CellValue::Hours(0)));
    }

    #[test]
    fn test_no_users_skips_fetch() {
        let users = user_repo(Vec::new());
        let logs = work_log_repo(vec![WorkLogRow::new("ghost", date(1), 3600)]);
        let teams = team_repo(false);
        let codes = LeaveCodeTable::default();
        let usecase = UserReportUseCase::new(&users, &logs, &teams, &codes);

        let report = usecase.build(&ReportQuery::new(ReportPeriod::month(2025, 1).unwrap())).unwrap();

        assert!(!report.has_data);
        assert!(report.rows.is_empty());
        assert!(report.totals().is_none());
        assert!(logs.calls.borrow().is_empty());
    }

    #[test]
    fn test_team_lookup_failure_degrades() {
        let users = user_repo(vec![user(1, "alice")]);
        let logs = work_log_repo(vec![
            WorkLogRow::new("alice", date(1), 3600).with_user_id(1),
            WorkLogRow::new("alice", date(2), 3600).with_user_id(1),
        ]);
        let teams = team_repo(true);
        let codes = LeaveCodeTable::default();
        let usecase = UserReportUseCase::new(&users, &logs, &teams, &codes);

        let period = ReportPeriod::range(date(1), date(7)).unwrap();
        let report = usecase.build(&ReportQuery::new(period)).unwrap();

        assert_eq!(report.title, "User report");
        assert_eq!(report.rows[0].team, "N/A");
        assert_eq!(teams.calls.borrow().len(), 1);
        assert_eq!(report.previous.unwrap().begin(), NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
    }
}
