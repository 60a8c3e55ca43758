use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::model::work_log::WorkLogRow;

/// Running totals for one user while rows are folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccumulator {
    pub name: String,
    pub role: String,
    pub team: String,
    pub total_work_hours: i64,
    pub onsite_hours: i64,
    pub offsite_hours: i64,
    pub daily_totals: BTreeMap<NaiveDate, i64>,
    /// Normalised activity names per day, in the order the rows arrived.
    pub daily_activities: BTreeMap<NaiveDate, Vec<String>>,
}

impl UserAccumulator {
    /// Seeds every date of the period with zero hours and no activities.
    pub fn new(name: String, role: String, team: String, dates: &[NaiveDate]) -> Self {
        Self {
            name,
            role,
            team,
            total_work_hours: 0,
            onsite_hours: 0,
            offsite_hours: 0,
            daily_totals: dates.iter().map(|d| (*d, 0)).collect(),
            daily_activities: dates.iter().map(|d| (*d, Vec::new())).collect(),
        }
    }

    pub fn add(&mut self, row: &WorkLogRow) {
        let hours = row.total_hours();

        self.total_work_hours += hours;
        self.onsite_hours += row.onsite_hours();
        self.offsite_hours += row.offsite_hours();

        // Dates outside the period still count towards the totals above but get no column.
        if let Some(day) = self.daily_totals.get_mut(&row.workdate) {
            *day += hours;
        }
        if let Some(activities) = self.daily_activities.get_mut(&row.workdate) {
            activities.push(row.normalized_activity());
        }
    }

    pub fn day_total(&self, date: NaiveDate) -> i64 {
        self.daily_totals.get(&date).copied().unwrap_or(0)
    }

    pub fn day_activities(&self, date: NaiveDate) -> &[String] {
        self.daily_activities
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_new_seeds_every_date() {
        let dates = vec![date(1), date(2), date(3)];
        let acc = UserAccumulator::new("alice".into(), "N/A".into(), "N/A".into(), &dates);

        assert_eq!(acc.daily_totals.len(), 3);
        assert!(acc.daily_totals.values().all(|h| *h == 0));
        assert!(acc.daily_activities.values().all(Vec::is_empty));
    }

    #[test]
    fn test_add_accumulates_truncated_hours() {
        let dates = vec![date(1), date(2)];
        let mut acc = UserAccumulator::new("alice".into(), "N/A".into(), "N/A".into(), &dates);

        acc.add(&WorkLogRow::new("alice", date(1), 7199).with_split(3600, 3599).with_activity("Dev"));
        acc.add(&WorkLogRow::new("alice", date(1), 0).with_activity("Lunch"));
        acc.add(&WorkLogRow::new("alice", date(9), 7200));

        assert_eq!(acc.total_work_hours, 3);
        assert_eq!(acc.onsite_hours, 1);
        assert_eq!(acc.offsite_hours, 0);
        assert_eq!(acc.day_total(date(1)), 1);
        assert_eq!(acc.day_activities(date(1)), ["dev", "lunch"]);
        assert!(!acc.daily_totals.contains_key(&date(9)));
    }
}
