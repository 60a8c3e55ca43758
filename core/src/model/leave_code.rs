use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps non-work activity names to the short code shown on zero-hour days.
///
/// Keys are stored trimmed and lowercased so lookups are case-insensitive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct LeaveCodeTable {
    codes: BTreeMap<String, String>,
}

impl LeaveCodeTable {
    pub fn empty() -> Self {
        Self { codes: BTreeMap::new() }
    }

    pub fn insert(&mut self, activity: &str, code: &str) {
        self.codes.insert(normalize(activity), code.trim().to_string());
    }

    pub fn with(mut self, activity: &str, code: &str) -> Self {
        self.insert(activity, code);
        self
    }

    pub fn lookup(&self, activity: &str) -> Option<&str> {
        self.codes.get(&normalize(activity)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for LeaveCodeTable {
    fn default() -> Self {
        Self::empty()
            .with("weekoff", "W")
            .with("week-off", "W")
            .with("comp-off", "C")
            .with("vacation", "V")
            .with("sick", "S")
            .with("emergency", "S")
            .with("sick/emergency", "S")
            .with("ad dolorum", "AD")
    }
}

impl From<BTreeMap<String, String>> for LeaveCodeTable {
    fn from(raw: BTreeMap<String, String>) -> Self {
        let mut table = Self::empty();
        for (activity, code) in &raw {
            table.insert(activity, code);
        }
        table
    }
}

impl From<LeaveCodeTable> for BTreeMap<String, String> {
    fn from(table: LeaveCodeTable) -> Self {
        table.codes
    }
}

fn normalize(activity: &str) -> String {
    activity.trim().to_lowercase()
}
