use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Instrument;

use crate::classify::Classifier;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{KeyOutcome, RunSummary};
use crate::search::Fetcher;
use crate::storage::SinkWriter;

/// Fetches, classifies and stores URLs for each key, one key at a time.
///
/// A key whose fetch fails is logged and skipped. A failed sink write stops the whole run.
pub struct CrawlPipeline<F, S> {
    fetcher: F,
    sinks: S,
    classifier: Classifier,
    config: PipelineConfig,
}

impl<F, S> CrawlPipeline<F, S>
where
    F: Fetcher,
    S: SinkWriter,
{
    pub fn new(fetcher: F, sinks: S, config: PipelineConfig) -> Self {
        let classifier = Classifier::new(config.caps, config.scan_mode, config.parse_mode);
        Self {
            fetcher,
            sinks,
            classifier,
            config,
        }
    }

    pub fn sinks(&self) -> &S {
        &self.sinks
    }

    pub async fn run(&mut self, keys: &[String]) -> Result<RunSummary> {
        let started_at = Utc::now();
        tracing::info!(
            "Processing {} keys via {} (scan mode: {})",
            keys.len(),
            self.fetcher.name(),
            self.config.scan_mode
        );

        let pb = self.progress_bar(keys.len());
        let mut outcomes = Vec::with_capacity(keys.len());

        for (index, key) in keys.iter().enumerate() {
            let span = tracing::info_span!("key", index, key = %key);
            let outcome = self.process_key(key).instrument(span).await?;
            outcomes.push(outcome);
            pb.inc(1);
        }

        pb.finish_with_message("All keys processed");

        Ok(RunSummary {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        })
    }

    async fn process_key(&mut self, key: &str) -> Result<KeyOutcome> {
        let body = match self.fetcher.fetch(key).await {
            Ok(body) => body,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Skipping key: {}", e);
                return Ok(KeyOutcome::skipped(key, e.to_string()));
            }
            Err(e) => return Err(e),
        };

        if body.is_empty() {
            tracing::debug!("Empty response");
            return Ok(KeyOutcome::empty(key, 0));
        }

        let classification = match self.classifier.classify(&body) {
            Ok(classification) => classification,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Skipping key: {}", e);
                return Ok(KeyOutcome::skipped(key, e.to_string()));
            }
            Err(e) => return Err(e),
        };

        let discarded = classification.discarded.total();
        if discarded > 0 {
            tracing::debug!(
                malformed = classification.discarded.malformed,
                suppressed = classification.discarded.suppressed,
                unclassified = classification.discarded.unclassified,
                "Dropped records"
            );
        }

        let batch = classification.batch;
        if batch.is_empty() {
            tracing::debug!("No classified URLs");
            return Ok(KeyOutcome::empty(key, discarded));
        }

        self.sinks.write_batch(&batch)?;
        tracing::info!(
            content = batch.content.len(),
            directory = batch.directory.len(),
            image_novel = batch.image_novel.len(),
            stopped_early = classification.stopped_early,
            "Stored URLs"
        );

        Ok(KeyOutcome::written(key, &batch, discarded))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} keys")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!("Falling back to default progress style: {}", e),
        }
        pb
    }
}
