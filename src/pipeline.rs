// One full bot run: harvest -> filter -> notify -> persist
use crate::analyzer::is_within_window;
use crate::config::AppConfig;
use crate::model::JobRecord;
use crate::notifier::{EmailNotifier, MailTransport};
use crate::scheduler::ScheduledTask;
use crate::scraper::Harvester;
use crate::storage::{IdStrategy, JsonSeenStore, SeenSet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub harvested: usize,
    pub new_jobs: usize,
    pub notified: usize,
    pub persisted: bool,
}

pub struct JobBot<T: MailTransport> {
    harvester: Arc<Harvester>,
    notifier: EmailNotifier<T>,
    store: JsonSeenStore,
    seen: SeenSet,
    search_url: String,
    id_strategy: IdStrategy,
    recent_only: bool,
}

impl<T: MailTransport> JobBot<T> {
    /// Loads the seen set from `config.seen_jobs_path`.
    pub fn new(config: &AppConfig, harvester: Arc<Harvester>, notifier: EmailNotifier<T>) -> Self {
        let store = JsonSeenStore::new(config.seen_jobs_path.clone());
        let seen = store.load();
        Self {
            harvester,
            notifier,
            store,
            seen,
            search_url: config.search_url.clone(),
            id_strategy: config.id_strategy,
            recent_only: config.recent_only,
        }
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &EmailNotifier<T> {
        &self.notifier
    }

    pub async fn run_once(&mut self) -> RunReport {
        let started_at = Utc::now();
        info!("Starting LinkedIn bot run...");

        let jobs = self
            .harvester
            .clone()
            .harvest_blocking(self.search_url.clone())
            .await;
        info!("Found {} total jobs", jobs.len());

        let report = self.process(jobs, started_at).await;
        let elapsed = Utc::now().signed_duration_since(report.started_at);
        info!(
            "Bot run complete in {}s: {} harvested, {} new, {} notified, saved: {}",
            elapsed.num_seconds(),
            report.harvested,
            report.new_jobs,
            report.notified,
            report.persisted
        );
        report
    }

    /// Filters a harvest against the seen set, sends the survivors and
    /// persists their ids once the send succeeded.
    pub async fn process(&mut self, jobs: Vec<JobRecord>, started_at: DateTime<Utc>) -> RunReport {
        let mut report = RunReport {
            started_at,
            harvested: jobs.len(),
            new_jobs: 0,
            notified: 0,
            persisted: false,
        };

        let recent_only = self.recent_only;
        let fresh = self.seen.filter_new(jobs, self.id_strategy, |job| {
            !recent_only || is_within_window(&job.time_posted)
        });
        report.new_jobs = fresh.len();

        if fresh.is_empty() {
            info!("No new jobs found.");
            return report;
        }
        info!("Found {} new jobs!", fresh.len());

        let records: Vec<JobRecord> = fresh.iter().map(|job| job.record.clone()).collect();
        match self.notifier.notify(&records).await {
            Ok(sent) => {
                report.notified = sent;
                self.seen.mark_seen(&fresh);
                match self.store.save(&self.seen) {
                    Ok(()) => report.persisted = true,
                    Err(e) => warn!(
                        "Failed to save seen jobs to {}: {}",
                        self.store.path().display(),
                        e
                    ),
                }
            }
            Err(e) => {
                error!("❌ Error sending email: {}", e);
                warn!("{} jobs stay unsent and will be retried next run", fresh.len());
            }
        }

        report
    }
}

#[async_trait]
impl<T: MailTransport> ScheduledTask for JobBot<T> {
    async fn run(&mut self) {
        self.run_once().await;
    }
}
