use crate::error::Result;
use crate::github::{Direction, MilestoneSort, Tracker};
use crate::models::{AggregatedMilestone, Issue, Milestone};

/// Which milestones make it onto the page, by presence of a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneFilter {
    pub include_due: bool,
    pub include_non_due: bool,
}

impl Default for MilestoneFilter {
    fn default() -> Self {
        Self {
            include_due: true,
            include_non_due: false,
        }
    }
}

impl MilestoneFilter {
    pub fn retains(&self, milestone: &Milestone) -> bool {
        if milestone.has_due_date() {
            self.include_due
        } else {
            self.include_non_due
        }
    }

    /// Keep the retained milestones, preserving their order.
    pub fn apply(&self, milestones: Vec<Milestone>) -> Vec<Milestone> {
        milestones.into_iter().filter(|m| self.retains(m)).collect()
    }
}

/// Convert CRLF line endings to LF.
///
/// Runs of carriage returns before a line feed collapse as well, so the result
/// never contains `"\r\n"` and normalizing twice changes nothing.
pub fn normalize_body(body: &str) -> String {
    let mut out = body.replace("\r\n", "\n");
    while out.contains("\r\n") {
        out = out.replace("\r\n", "\n");
    }
    out
}

/// Stable ascending sort by title.
pub fn sort_by_title(milestones: &mut [AggregatedMilestone]) {
    milestones.sort_by(|a, b| a.milestone.title.cmp(&b.milestone.title));
}

/// Attach `issues` to `milestone`, dropping any that belong elsewhere.
pub fn assemble(milestone: Milestone, issues: Vec<Issue>) -> AggregatedMilestone {
    let fetched = issues.len();
    let mut issues: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| issue.milestone_number() == Some(milestone.number))
        .map(|mut issue| {
            issue.body = normalize_body(&issue.body);
            issue
        })
        .collect();
    if issues.len() != fetched {
        tracing::debug!(
            milestone = milestone.number,
            dropped = fetched - issues.len(),
            "dropped issues from another milestone"
        );
    }
    issues.sort_by(|a, b| a.title.cmp(&b.title));

    AggregatedMilestone { milestone, issues }
}

/// Fetch, filter and group a repository's milestones and issues.
///
/// Any fetch failure aborts the whole aggregation.
pub async fn aggregate<T: Tracker>(
    tracker: &T,
    repo: &str,
    filter: MilestoneFilter,
) -> Result<Vec<AggregatedMilestone>> {
    let milestones = tracker
        .fetch_milestones(repo, MilestoneSort::DueDate, Direction::Asc)
        .await?;
    let total = milestones.len();
    let retained = filter.apply(milestones);
    tracing::debug!(repo, total, retained = retained.len(), "filtered milestones");

    let mut aggregated = Vec::with_capacity(retained.len());
    for milestone in retained {
        let issues = tracker.fetch_issues(repo, milestone.number).await?;
        aggregated.push(assemble(milestone, issues));
    }

    sort_by_title(&mut aggregated);
    Ok(aggregated)
}
