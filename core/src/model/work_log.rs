use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

const SECONDS_PER_HOUR: i64 = 3600;

/// One row of the data source: a user's time on one activity for one day, already summed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkLogRow {
    pub username: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    pub workdate: NaiveDate,

    // Durations are whole seconds. A null or missing value counts as zero.
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub onsite_duration: i64,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub offsite_duration: i64,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub total_duration: i64,

    #[serde(default)]
    pub activity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
}

impl WorkLogRow {
    pub fn new(username: &str, workdate: NaiveDate, total_duration: i64) -> Self {
        Self {
            username: username.to_string(),
            user_id: None,
            role: None,
            workdate,
            onsite_duration: 0,
            offsite_duration: 0,
            total_duration,
            activity_name: None,
            project_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_activity(mut self, activity_name: &str) -> Self {
        self.activity_name = Some(activity_name.to_string());
        self
    }

    pub fn with_split(mut self, onsite: i64, offsite: i64) -> Self {
        self.onsite_duration = onsite;
        self.offsite_duration = offsite;
        self
    }

    pub fn with_project(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Activity name trimmed and lowercased; empty when absent.
    pub fn normalized_activity(&self) -> String {
        self.activity_name
            .as_deref()
            .map(|a| a.trim().to_lowercase())
            .unwrap_or_default()
    }

    pub fn total_hours(&self) -> i64 {
        seconds_to_hours(self.total_duration)
    }

    pub fn onsite_hours(&self) -> i64 {
        seconds_to_hours(self.onsite_duration)
    }

    pub fn offsite_hours(&self) -> i64 {
        seconds_to_hours(self.offsite_duration)
    }
}

/// Whole hours in `seconds`, rounded toward negative infinity.
pub fn seconds_to_hours(seconds: i64) -> i64 {
    seconds.div_euclid(SECONDS_PER_HOUR)
}

fn lenient_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}
