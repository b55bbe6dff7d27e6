// Load-scroll-collect protocol over a page session
use super::traits::{PageSession, SessionLauncher};
use crate::config::HarvestConfig;
use crate::model::{HarvestError, JobRecord};
use crate::parser::selectors::{JOB_CONTAINERS, JOB_LINK};
use crate::parser::{DomNode, ElementContext, ScraperNode, extract};
use crate::utils::normalize_link;
use rand::Rng;
use scraper::Html;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct Harvester {
    launcher: Arc<dyn SessionLauncher>,
    config: HarvestConfig,
}

impl Harvester {
    pub fn new(launcher: Arc<dyn SessionLauncher>, config: HarvestConfig) -> Self {
        Self { launcher, config }
    }

    /// Runs one harvest of `url`. Any session-level failure is logged and
    /// yields an empty result; the session is closed either way.
    pub fn harvest(&self, url: &str) -> Vec<JobRecord> {
        match self.try_harvest(url) {
            Ok(jobs) => {
                info!("Harvested {} unique job postings", jobs.len());
                jobs
            }
            Err(e) => {
                warn!("Harvest of {} failed: {}", url, e);
                Vec::new()
            }
        }
    }

    /// `harvest` on the blocking thread pool.
    pub async fn harvest_blocking(self: Arc<Self>, url: String) -> Vec<JobRecord> {
        match tokio::task::spawn_blocking(move || self.harvest(&url)).await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("{}", HarvestError::Aborted(e.to_string()));
                Vec::new()
            }
        }
    }

    fn try_harvest(&self, url: &str) -> Result<Vec<JobRecord>, HarvestError> {
        let mut session = self.launcher.launch()?;
        let settle = session.needs_settling();

        info!("Navigating to: {}", url);
        session.navigate(url)?;
        self.settle(settle, self.config.initial_settle);

        self.scroll_until_stable(session.as_mut(), settle)?;
        self.settle(settle, self.config.final_settle);

        let html = session.content()?;
        let page_url = session.current_url().unwrap_or_else(|| url.to_string());
        drop(session);

        Ok(collect_jobs_from_html(&html, &page_url))
    }

    fn scroll_until_stable(
        &self,
        session: &mut dyn PageSession,
        settle: bool,
    ) -> Result<(), HarvestError> {
        let mut last_height = session.scroll_height()?;
        for attempt in 1..=self.config.max_scrolls {
            session.scroll_to_bottom()?;
            self.settle(settle, self.config.scroll_settle);

            let new_height = session.scroll_height()?;
            if new_height == last_height {
                session.scroll_by(self.config.nudge_offset)?;
                self.settle(settle, self.config.nudge_settle);
                debug!("Page height stable at {}px after {} scrolls", new_height, attempt);
                break;
            }
            last_height = new_height;
            debug!("Scroll {}: page height {}px", attempt, new_height);
        }
        Ok(())
    }

    fn settle(&self, enabled: bool, base: Duration) {
        if !enabled {
            return;
        }
        let jitter_ms = self.config.jitter.as_millis() as u64;
        let extra = if jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_ms)
        };
        let total = base + Duration::from_millis(extra);
        if !total.is_zero() {
            thread::sleep(total);
        }
    }
}

pub fn collect_jobs_from_html(html: &str, page_url: &str) -> Vec<JobRecord> {
    let document = Html::parse_document(html);
    collect_jobs(&ScraperNode::new(document.root_element()), page_url)
}

/// Extracts one record per distinct job link under `root`.
///
/// Job anchors are the primary source; listing containers are scanned
/// afterwards and only contribute links not already collected. Links are
/// compared without their query string.
pub fn collect_jobs<N: DomNode>(root: &N, page_url: &str) -> Vec<JobRecord> {
    let mut seen_links = HashSet::new();
    let mut jobs = Vec::new();

    let anchors = root.select_all(JOB_LINK);
    debug!("Found {} job link elements", anchors.len());
    for anchor in anchors {
        let ctx = ElementContext::from_anchor(anchor, page_url);
        if seen_links.insert(normalize_link(ctx.link()).to_string()) {
            jobs.push(extract(&ctx));
        }
    }

    for selector in JOB_CONTAINERS {
        let containers = root.select_all(selector);
        if containers.is_empty() {
            continue;
        }
        debug!("Found {} containers with selector: {}", containers.len(), selector);
        for container in containers {
            let ctx = ElementContext::from_card(container, page_url);
            if ctx.anchor.is_none() {
                continue;
            }
            if seen_links.insert(normalize_link(ctx.link()).to_string()) {
                jobs.push(extract(&ctx));
            }
        }
    }

    jobs
}
