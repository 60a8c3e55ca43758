use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
}

/// Links a user to a team. A membership with no project ids applies to every project.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamMembership {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub project_ids: Vec<i64>,
}

impl TeamMembership {
    pub fn applies_to(&self, project_id: Option<i64>) -> bool {
        match project_id {
            Some(id) => self.project_ids.is_empty() || self.project_ids.contains(&id),
            None => true,
        }
    }
}
