use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the reconciler did (or would do) with one record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncAction {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "updated")]
    Updated,
    #[serde(rename = "would create")]
    WouldCreate,
    #[serde(rename = "would update")]
    WouldUpdate,
}

impl SyncAction {
    pub fn is_mutation(self) -> bool {
        matches!(self, SyncAction::Created | SyncAction::Updated)
    }
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SyncAction::Created => "created",
            SyncAction::Updated => "updated",
            SyncAction::WouldCreate => "would create",
            SyncAction::WouldUpdate => "would update",
        };
        f.write_str(s)
    }
}

/// Per-record outcome, reported in feed order.
///
/// `id` is the CRM object id for real mutations; dry runs report no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub action: SyncAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Full-run summary returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub ok: bool,
    pub count: usize,
    pub results: Vec<RecordOutcome>,
}

impl SyncReport {
    pub fn new(results: Vec<RecordOutcome>) -> Self {
        Self {
            ok: true,
            count: results.len(),
            results,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncRunStatus {
    Running,
    Succeeded,
    Failed,
}

/// A single sync execution record. Kept in memory for the status route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRun {
    pub run_id: Uuid,
    pub status: SyncRunStatus,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub records_processed: u64,
    pub created: u64,
    pub updated: u64,
    pub error_message: Option<String>,
}

impl SyncRun {
    #[tracing::instrument(level = "debug")]
    pub fn new_running(dry_run: bool, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status: SyncRunStatus::Running,
            dry_run,
            started_at,
            finished_at: None,
            records_processed: 0,
            created: 0,
            updated: 0,
            error_message: None,
        }
    }

    #[tracing::instrument(level = "debug", skip(self, report))]
    pub fn finish_succeeded(&mut self, report: &SyncReport, at: DateTime<Utc>) {
        self.status = SyncRunStatus::Succeeded;
        self.finished_at = Some(at);
        self.records_processed = report.count as u64;
        self.created = report
            .results
            .iter()
            .filter(|r| r.action == SyncAction::Created)
            .count() as u64;
        self.updated = report
            .results
            .iter()
            .filter(|r| r.action == SyncAction::Updated)
            .count() as u64;
        self.error_message = None;
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn finish_failed(&mut self, error: impl ToString + std::fmt::Debug, at: DateTime<Utc>) {
        self.status = SyncRunStatus::Failed;
        self.finished_at = Some(at);
        self.error_message = Some(error.to_string());
    }
}
