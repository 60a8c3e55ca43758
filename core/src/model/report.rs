use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const TOTALS_ROW_NAME: &str = "Totals";

/// Field keys preceding the per-date columns, in output order.
pub const SUMMARY_FIELDS: [&str; 6] = ["name", "role", "team", "total_work", "onsite", "offsite"];

const SUMMARY_LABELS: [&str; 6] = ["Name", "Role", "Team", "Total", "Onsite", "Offsite"];

/// One day cell: whole hours worked, or a leave code for a zero-hour day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CellValue {
    Hours(i64),
    Leave(String),
}

impl CellValue {
    /// The value as a number, if it is one. Leave codes count only when they are
    /// themselves numeric.
    pub fn numeric(&self) -> Option<i64> {
        match self {
            CellValue::Hours(h) => Some(*h),
            CellValue::Leave(code) => code.trim().parse().ok(),
        }
    }

    pub fn is_leave(&self) -> bool {
        matches!(self, CellValue::Leave(_))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Hours(0)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Hours(h) => write!(f, "{}", h),
            CellValue::Leave(code) => f.write_str(code),
        }
    }
}

/// A pivoted report line: one user (or the totals) across every date of the period.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub role: String,
    pub team: String,
    pub total_work: i64,
    pub onsite: i64,
    pub offsite: i64,
    pub days: BTreeMap<NaiveDate, CellValue>,
}

impl ReportRow {
    pub fn is_totals(&self) -> bool {
        self.name == TOTALS_ROW_NAME
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CellValue> {
        self.days.get(&date)
    }

    /// Every cell as text, in the same order as [`field_keys`] / [`display_header`].
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.name.clone(),
            self.role.clone(),
            self.team.clone(),
            self.total_work.to_string(),
            self.onsite.to_string(),
            self.offsite.to_string(),
        ];
        record.extend(self.days.values().map(|v| v.to_string()));
        record
    }
}

impl Serialize for ReportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SUMMARY_FIELDS.len() + self.days.len()))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("role", &self.role)?;
        map.serialize_entry("team", &self.team)?;
        map.serialize_entry("total_work", &self.total_work)?;
        map.serialize_entry("onsite", &self.onsite)?;
        map.serialize_entry("offsite", &self.offsite)?;
        for (date, value) in &self.days {
            map.serialize_entry(&date.format("%Y-%m-%d").to_string(), value)?;
        }
        map.end()
    }
}

/// Machine-readable column keys: summary fields then ISO dates.
pub fn field_keys(dates: &[NaiveDate]) -> Vec<String> {
    SUMMARY_FIELDS
        .iter()
        .map(|k| k.to_string())
        .chain(dates.iter().map(|d| d.format("%Y-%m-%d").to_string()))
        .collect()
}

/// Human-readable column labels, e.g. `03 Fri` for date columns.
pub fn display_header(dates: &[NaiveDate]) -> Vec<String> {
    SUMMARY_LABELS
        .iter()
        .map(|k| k.to_string())
        .chain(dates.iter().map(|d| d.format("%d %a").to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn sample_row() -> ReportRow {
        let mut days = BTreeMap::new();
        days.insert(date(2), CellValue::Leave("V".to_string()));
        days.insert(date(1), CellValue::Hours(8));
        ReportRow {
            name: "alice".to_string(),
            role: "ROLE_USER".to_string(),
            team: "Ops".to_string(),
            total_work: 8,
            onsite: 5,
            offsite: 3,
            days,
        }
    }

    #[test]
    fn test_serializes_ordered_mapping() {
        let json = serde_json::to_string(&sample_row()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"alice","role":"ROLE_USER","team":"Ops","total_work":8,"onsite":5,"offsite":3,"2025-01-01":8,"2025-01-02":"V"}"#
        );
    }

    #[test]
    fn test_numeric_cells() {
        assert_eq!(CellValue::Hours(4).numeric(), Some(4));
        assert_eq!(CellValue::Leave("S".to_string()).numeric(), None);
        assert_eq!(CellValue::Leave("2".to_string()).numeric(), Some(2));
    }

    #[test]
    fn test_record_and_headers_align() {
        let row = sample_row();
        let dates = vec![date(1), date(2)];

        assert_eq!(row.to_record(), vec!["alice", "ROLE_USER", "Ops", "8", "5", "3", "8", "V"]);
        assert_eq!(field_keys(&dates)[6], "2025-01-01");
        assert_eq!(display_header(&dates)[7], "02 Thu");
        assert_eq!(field_keys(&dates).len(), row.to_record().len());
    }
}
