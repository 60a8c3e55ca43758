use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::default_data_dir;
use crate::model::team::{Team, TeamMembership};
use crate::model::user::User;
use crate::model::work_log::WorkLogRow;
use crate::repository::traits::{TeamRepository, UserRepository, WorkLogRepository};

const DEFAULT_FILE_NAME: &str = "dataset.json";

/// Everything a report reads, as stored on disk.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub teams: Vec<TeamMembership>,
    pub work_logs: Vec<WorkLogRow>,
}

#[derive(Clone)]
pub struct FileTimesheetRepository {
    file_path: PathBuf,
}

impl FileTimesheetRepository {
    /// Uses `dataset.json` inside `base_dir` (default `~/.timepivot`), creating an empty one if needed.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Dataset::default())?;
            writer.flush()?;
        }

        Ok(FileTimesheetRepository { file_path: path })
    }

    /// Uses an existing dataset file as-is.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(anyhow!("Dataset file not found: {}", path.display()));
        }
        Ok(FileTimesheetRepository { file_path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn read_dataset(&self) -> Result<Dataset> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let dataset = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse dataset {}", self.file_path.display()))?;
        Ok(dataset)
    }

    pub fn write_dataset(&self, dataset: &Dataset) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, dataset)?;
        writer.flush()?;
        Ok(())
    }
}

impl WorkLogRepository for FileTimesheetRepository {
    fn fetch_work_log_rows(
        &self,
        user_ids: &[i64],
        start: NaiveDate,
        end: NaiveDate,
        project_id: Option<i64>,
    ) -> Result<Vec<WorkLogRow>> {
        let dataset = self.read_dataset()?;
        let ids: HashSet<i64> = user_ids.iter().copied().collect();

        // Rows without an id are matched to the selected users by name.
        let usernames: HashSet<&str> = dataset
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .map(|u| u.username.as_str())
            .collect();

        let rows: Vec<WorkLogRow> = dataset
            .work_logs
            .iter()
            .filter(|r| match r.user_id {
                Some(id) => ids.contains(&id),
                None => usernames.contains(r.username.as_str()),
            })
            .filter(|r| r.workdate >= start && r.workdate <= end)
            .filter(|r| project_id.is_none() || r.project_id == project_id)
            .cloned()
            .collect();

        debug!(rows = rows.len(), %start, %end, ?project_id, "Fetched work log rows");
        Ok(rows)
    }
}

impl TeamRepository for FileTimesheetRepository {
    fn fetch_teams_for_user(&self, user_id: i64, project_id: Option<i64>) -> Result<Vec<Team>> {
        let dataset = self.read_dataset()?;
        Ok(dataset
            .teams
            .iter()
            .filter(|m| m.user_id == user_id && m.applies_to(project_id))
            .map(|m| Team { name: m.name.clone() })
            .collect())
    }
}

impl UserRepository for FileTimesheetRepository {
    fn list_users(&self, team: Option<&str>) -> Result<Vec<User>> {
        let dataset = self.read_dataset()?;

        let members: Option<HashSet<i64>> = team.map(|name| {
            dataset
                .teams
                .iter()
                .filter(|m| m.name.eq_ignore_ascii_case(name.trim()))
                .map(|m| m.user_id)
                .collect()
        });

        Ok(dataset
            .users
            .into_iter()
            .filter(|u| !u.system_account)
            .filter(|u| members.as_ref().map_or(true, |m| m.contains(&u.id)))
            .collect())
    }
}
