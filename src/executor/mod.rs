//! Concurrent probe execution
//!
//! The runner fans out a fixed number of probes as tokio tasks. Every task
//! delivers exactly one [`ProbeOutcome`] into a channel sized for all of
//! them, so no worker ever waits on the collector. The collector only starts
//! draining after every task has finished, and stops at the first failure.

use crate::{
    client::Prober,
    error::Result,
    logging::ProbeLogger,
    models::{AggregateReport, ProbeOutcome, ProbeReport},
    stats::{aggregate_with, AveragingMode},
};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs bursts of parallel probes against one address
pub struct ConcurrentRunner {
    prober: Arc<dyn Prober>,
    logger: ProbeLogger,
    averaging: AveragingMode,
}

impl ConcurrentRunner {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self {
            prober,
            logger: ProbeLogger::quiet(),
            averaging: AveragingMode::default(),
        }
    }

    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_averaging(mut self, averaging: AveragingMode) -> Self {
        self.averaging = averaging;
        self
    }

    pub fn averaging(&self) -> AveragingMode {
        self.averaging
    }

    pub fn logger(&self) -> &ProbeLogger {
        &self.logger
    }

    /// Run `concurrency` probes in parallel and return every report
    ///
    /// Fails with the first failure the collector sees; in that case no
    /// reports are returned. Workers are never cancelled.
    pub async fn collect(&self, address: &str, payload: &[u8], concurrency: usize) -> Result<Vec<ProbeReport>> {
        let (sender, mut receiver) = mpsc::channel::<ProbeOutcome>(concurrency.max(1));
        let address: Arc<str> = Arc::from(address);
        let payload: Arc<[u8]> = Arc::from(payload);

        let mut workers = Vec::with_capacity(concurrency);
        for index in 0..concurrency {
            let sender = sender.clone();
            let prober = Arc::clone(&self.prober);
            let logger = self.logger.clone();
            let address = Arc::clone(&address);
            let payload = Arc::clone(&payload);

            workers.push(tokio::spawn(async move {
                let result = prober.probe(&address, &payload).await;
                logger.log_probe(index, &address, result.as_ref()).await;
                // Capacity covers every worker, so this never waits
                let _ = sender.send(ProbeOutcome::from(result)).await;
            }));
        }

        // Barrier: every worker has delivered (or panicked) before draining
        let joined = join_all(workers).await;
        drop(sender);

        let mut reports = Vec::with_capacity(concurrency);
        while let Some(outcome) = receiver.recv().await {
            match outcome {
                ProbeOutcome::Success(report) => reports.push(report),
                ProbeOutcome::Failure(error) => return Err(error),
            }
        }

        // A panicked worker never sent an outcome
        for result in joined {
            result?;
        }

        Ok(reports)
    }

    /// Run `concurrency` probes in parallel and average the results
    pub async fn run(&self, address: &str, payload: &[u8], concurrency: usize) -> Result<AggregateReport> {
        let reports = self.collect(address, payload, concurrency).await?;
        Ok(aggregate_with(&reports, self.averaging))
    }
}
