//! Sync job orchestration: fetch → normalize → reconcile → report.

use crate::catalog::normalize::normalize_agent;
use crate::sync::models::SyncReport;
use crate::sync::pacer::Pacer;
use crate::sync::reconciler::reconcile;
use crate::sync::traits::{AgentFeed, CrmApi};
use crate::Result;
use std::sync::Arc;

/// One pass over the marketplace feed against the CRM.
///
/// Records are processed strictly in feed order, one at a time, each network
/// round-trip awaited before the next record starts. The pacing gate runs
/// between iterations regardless of mode. The first error aborts the run;
/// CRM writes already committed for earlier records stay committed.
pub struct SyncJob {
    feed: Arc<dyn AgentFeed>,
    crm: Arc<dyn CrmApi>,
    object_type: String,
    pacer: Pacer,
}

impl SyncJob {
    #[tracing::instrument(level = "debug", skip(feed, crm))]
    pub fn new(
        feed: Arc<dyn AgentFeed>,
        crm: Arc<dyn CrmApi>,
        object_type: impl Into<String> + std::fmt::Debug,
        pacer: Pacer,
    ) -> Self {
        Self {
            feed,
            crm,
            object_type: object_type.into(),
            pacer,
        }
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub async fn run(&self, dry_run: bool) -> Result<SyncReport> {
        let records = self.feed.fetch().await?;
        tracing::info!(count = records.len(), dry_run, "feed fetched");

        let mut results = Vec::with_capacity(records.len());
        for record in &records {
            let props = normalize_agent(record);
            let outcome = reconcile(&*self.crm, &self.object_type, &props, dry_run).await?;
            tracing::debug!(
                action = %outcome.action,
                name = %outcome.name,
                "record reconciled"
            );
            results.push(outcome);
            self.pacer.pause().await;
        }

        Ok(SyncReport::new(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::models::SyncAction;
    use crate::sync::test_support::{FailingFeed, FakeCrm, FakeFeed};
    use serde_json::json;

    fn job(feed: impl AgentFeed + 'static, crm: Arc<FakeCrm>) -> SyncJob {
        SyncJob::new(Arc::new(feed), crm, "2-1", Pacer::disabled())
    }

    #[tokio::test]
    async fn creates_new_records_with_normalized_properties() {
        let crm = Arc::new(FakeCrm::default());
        let feed = FakeFeed::from_json(json!([
            {"name": "Agent1", "vendor": "V1", "industries": ["saas", "bogus"]}
        ]));
        let report = job(feed, crm.clone()).run(false).await.unwrap();

        assert!(report.ok);
        assert_eq!(report.count, 1);
        assert_eq!(report.results[0].action, SyncAction::Created);
        assert_eq!(report.results[0].name, "Agent1");
        assert!(report.results[0].id.is_some());

        let stored = crm.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].1.industries_supported, vec!["saas", "other"]);
    }

    #[tokio::test]
    async fn second_run_updates_instead_of_creating() {
        let crm = Arc::new(FakeCrm::default());
        let body = json!([
            {"name": "Agent1", "vendor": "V1"},
            {"name": "Agent2", "vendor": "V2"}
        ]);

        let first = job(FakeFeed::from_json(body.clone()), crm.clone())
            .run(false)
            .await
            .unwrap();
        assert!(first.results.iter().all(|r| r.action == SyncAction::Created));

        let second = job(FakeFeed::from_json(body), crm.clone())
            .run(false)
            .await
            .unwrap();
        assert!(second.results.iter().all(|r| r.action == SyncAction::Updated));
        assert_eq!(
            second.results.iter().map(|r| &r.id).collect::<Vec<_>>(),
            first.results.iter().map(|r| &r.id).collect::<Vec<_>>()
        );
        assert_eq!(crm.stored().len(), 2);
    }

    #[tokio::test]
    async fn dry_run_reports_without_mutating() {
        let crm = Arc::new(FakeCrm::default());
        let body = json!([
            {"name": "Agent1", "vendor": "V1"},
            {"name": "Agent2", "vendor": "V2"}
        ]);

        // Seed Agent1 so the dry run sees one match and one miss.
        job(
            FakeFeed::from_json(json!([{"name": "Agent1", "vendor": "V1"}])),
            crm.clone(),
        )
        .run(false)
        .await
        .unwrap();
        let creates_before = crm.create_calls();

        let report = job(FakeFeed::from_json(body), crm.clone())
            .run(true)
            .await
            .unwrap();
        assert_eq!(report.results[0].action, SyncAction::WouldUpdate);
        assert_eq!(report.results[1].action, SyncAction::WouldCreate);
        assert!(report.results.iter().all(|r| r.id.is_none()));
        assert_eq!(crm.create_calls(), creates_before);
        assert_eq!(crm.update_calls(), 0);
    }

    #[tokio::test]
    async fn outcomes_preserve_feed_order() {
        let crm = Arc::new(FakeCrm::default());
        let feed = FakeFeed::from_json(json!([
            {"name": "C", "vendor": "v"},
            {"name": "A", "vendor": "v"},
            {"name": "B", "vendor": "v"}
        ]));
        let report = job(feed, crm).run(false).await.unwrap();
        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn malformed_feed_shape_is_an_empty_run() {
        let crm = Arc::new(FakeCrm::default());
        let report = job(FakeFeed::from_json(json!({"foo": 1})), crm.clone())
            .run(false)
            .await
            .unwrap();
        assert!(report.ok);
        assert_eq!(report.count, 0);
        assert!(report.results.is_empty());
        assert_eq!(crm.create_calls(), 0);
    }

    #[tokio::test]
    async fn a_record_error_aborts_the_run() {
        let crm = Arc::new(FakeCrm::default());
        *crm.fail_on_name.lock().unwrap() = Some("Agent2".to_string());
        let feed = FakeFeed::from_json(json!([
            {"name": "Agent1", "vendor": "V1"},
            {"name": "Agent2", "vendor": "V2"},
            {"name": "Agent3", "vendor": "V3"}
        ]));

        let err = job(feed, crm.clone()).run(false).await.unwrap_err();
        assert!(err.to_string().contains("Agent2"), "{err}");
        // Agent1 committed before the failure, Agent3 never processed.
        assert_eq!(crm.create_calls(), 1);
    }

    #[tokio::test]
    async fn feed_failure_aborts_before_any_crm_call() {
        let crm = Arc::new(FakeCrm::default());
        let err = job(FailingFeed, crm.clone()).run(false).await.unwrap_err();
        assert!(matches!(err, crate::Error::Http { status: 502, .. }));
        assert_eq!(crm.external_id_searches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_applies_between_records_even_in_dry_run() {
        let crm = Arc::new(FakeCrm::default());
        let feed = FakeFeed::from_json(json!([
            {"name": "A", "vendor": "v"},
            {"name": "B", "vendor": "v"}
        ]));
        let job = SyncJob::new(
            Arc::new(feed),
            crm,
            "2-1",
            Pacer::new(std::time::Duration::from_millis(120)),
        );

        let start = tokio::time::Instant::now();
        job.run(true).await.unwrap();
        assert_eq!(start.elapsed(), std::time::Duration::from_millis(240));
    }
}
