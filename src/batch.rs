//! Batch orchestrator: one fresh session per place link, saved as it goes
//!
//! Targets are independent. A target that fails or yields nothing is
//! logged and skipped; only a browser that cannot start aborts the batch.

use crate::config::HarvestConfig;
use crate::records::mean_rating;
use crate::reviews::harvest_reviews;
use crate::selectors::MapsSelectors;
use anyhow::{Context, Result};
use mapharvest_core::{Launcher, Session};
use mapharvest_store::{is_blank, DatasetStore};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Saved,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    pub url: String,
    pub place_name: Option<String>,
    pub reviews: usize,
    pub status: TargetStatus,
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub targets: Vec<TargetOutcome>,
}

impl BatchReport {
    pub fn saved(&self) -> usize {
        self.count(TargetStatus::Saved)
    }

    pub fn count(&self, status: TargetStatus) -> usize {
        self.targets.iter().filter(|t| t.status == status).count()
    }

    pub fn total_reviews(&self) -> usize {
        self.targets.iter().map(|t| t.reviews).sum()
    }
}

pub struct BatchOrchestrator<'a> {
    launcher: &'a dyn Launcher,
    store: &'a DatasetStore,
    selectors: &'a MapsSelectors,
    config: &'a HarvestConfig,
    pause: Box<dyn Fn(Duration) + 'a>,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(
        launcher: &'a dyn Launcher,
        store: &'a DatasetStore,
        selectors: &'a MapsSelectors,
        config: &'a HarvestConfig,
    ) -> Self {
        Self {
            launcher,
            store,
            selectors,
            config,
            pause: Box::new(std::thread::sleep),
        }
    }

    /// Replace how the delay between targets is waited out.
    pub fn pausing_with(mut self, pause: impl Fn(Duration) + 'a) -> Self {
        self.pause = Box::new(pause);
        self
    }

    /// Harvest each link in order, writing one reviews file per place.
    pub fn run(&self, links: &[String], max_reviews: Option<usize>) -> Result<BatchReport> {
        let targets: Vec<&str> = links
            .iter()
            .map(|l| l.trim())
            .filter(|l| !is_blank(l))
            .collect();
        let mut report = BatchReport::default();

        for (index, url) in targets.iter().enumerate() {
            if index > 0 && !self.config.inter_target_delay.is_zero() {
                (self.pause)(self.config.inter_target_delay);
            }
            info!(target = index + 1, total = targets.len(), %url, "harvesting reviews");
            let outcome = self.run_target(url, max_reviews)?;
            report.targets.push(outcome);
        }

        info!(
            targets = report.targets.len(),
            saved = report.saved(),
            reviews = report.total_reviews(),
            "batch finished"
        );
        Ok(report)
    }

    fn run_target(&self, url: &str, max_reviews: Option<usize>) -> Result<TargetOutcome> {
        let mut session = Session::open(self.launcher).context("failed to start browser")?;
        let harvest = harvest_reviews(
            session.renderer(),
            url,
            max_reviews,
            self.selectors,
            self.config,
        );
        drop(session);

        let mut outcome = TargetOutcome {
            url: url.to_string(),
            place_name: None,
            reviews: 0,
            status: TargetStatus::Failed,
            file: None,
            error: None,
        };
        let harvest = match harvest {
            Ok(harvest) => harvest,
            Err(err) => {
                warn!(%url, %err, "target failed, continuing");
                outcome.error = Some(err.to_string());
                return Ok(outcome);
            }
        };
        outcome.place_name = Some(harvest.place_name.clone());
        if harvest.reviews.is_empty() {
            warn!(%url, place = %harvest.place_name, "no reviews collected");
            outcome.status = TargetStatus::Empty;
            return Ok(outcome);
        }

        match self
            .store
            .save_timestamped("reviews", &harvest.place_name, &harvest.reviews)
        {
            Ok(path) => {
                let mean = mean_rating(&harvest.reviews)
                    .map(|m| format!("{:.2}", m))
                    .unwrap_or_else(|| "-".to_string());
                info!(
                    place = %harvest.place_name,
                    reviews = harvest.reviews.len(),
                    mean_rating = %mean,
                    file = %path.display(),
                    "reviews saved"
                );
                outcome.reviews = harvest.reviews.len();
                outcome.status = TargetStatus::Saved;
                outcome.file = Some(path);
            }
            Err(err) => {
                warn!(place = %harvest.place_name, %err, "could not save reviews");
                outcome.error = Some(err.to_string());
            }
        }
        Ok(outcome)
    }
}
