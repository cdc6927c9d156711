//! Pipeline module
//!
//! Runs Loader → Cleaner → Classifier → Aggregator → Writer once, each stage
//! fully materialized before the next starts.
//!
//! Every error before the write aborts the run. A failed write is logged and
//! reported through [`RunSummary`] instead.

mod types;

pub use types::{RunStatus, RunSummary};

use crate::aggregate::aggregate;
use crate::classify::{classify, ClassificationDictionary};
use crate::clean::clean;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::output::{write_dataset, ParquetWriterConfig};
use crate::source::{load_dictionary, load_table};
use crate::storage::Session;
use std::time::Instant;

/// A configured patent category pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute every stage against the storage reachable through `session`
    pub async fn run(&self, session: &Session) -> Result<RunSummary> {
        let start = Instant::now();
        let config = &self.config;

        tracing::info!(
            pipeline = %config.name,
            run_id = %session.run_id(),
            patents = %config.patents.location,
            output = %config.output.location,
            credentials = session.has_credentials(),
            "Starting pipeline"
        );

        let patents = load_table(session, &config.patents.location, &config.patents.csv).await?;
        let dictionary = match &config.dictionary {
            Some(source) => load_dictionary(session, &source.location, &source.csv).await?,
            None => {
                tracing::info!("No dictionary configured, using standard IPC section labels");
                ClassificationDictionary::standard()
            }
        };

        let (records, clean_report) = clean(&patents, &config.layout)?;
        drop(patents);

        let (expanded, classify_report) = classify(&records, &dictionary);
        let (final_records, aggregate_report) = aggregate(&expanded)?;

        let mut summary = RunSummary {
            pipeline: config.name.clone(),
            run_id: session.run_id().to_string(),
            status: RunStatus::Succeeded,
            output: config.output.location.clone(),
            clean: clean_report,
            classify: classify_report,
            aggregate: aggregate_report,
            write: None,
            error: None,
            duration_ms: 0,
        };

        let writer_config = ParquetWriterConfig::from(&config.output.parquet);
        match write_dataset(session, &config.output.location, &final_records, &writer_config).await
        {
            Ok(report) => summary.write = Some(report),
            Err(e) if !e.is_fatal() => {
                tracing::error!(
                    output = %config.output.location,
                    error = %e,
                    "Failed to write partitioned dataset"
                );
                summary.status = RunStatus::Failed;
                summary.error = Some(e.to_string());
            }
            Err(e) => return Err(e),
        }

        summary.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            pipeline = %summary.pipeline,
            status = ?summary.status,
            rows = summary.aggregate.rows_out,
            duration_ms = summary.duration_ms,
            "Pipeline finished"
        );

        Ok(summary)
    }
}
