use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named grouping of issues, optionally carrying a due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: MilestoneState,
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub closed_issues: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Milestone {
    pub fn has_due_date(&self) -> bool {
        self.due_on.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneState {
    #[default]
    Open,
    Closed,
}
