//! Scenario drivers: ping, balancer and simulate

use crate::{
    client::Prober,
    error::{AppError, Result},
    executor::ConcurrentRunner,
    logging::ProbeLogger,
    models::{AggregateReport, ProbeReport},
    stats::{aggregate, aggregate_with, ResponseTimeDistribution},
};

/// Probe `address` once and return its report
pub async fn ping(prober: &dyn Prober, logger: &ProbeLogger, address: &str, payload: &[u8]) -> Result<ProbeReport> {
    let correlation_id = logger.scenario_started("ping", address).await;
    let result = prober.probe(address, payload).await;
    logger.log_probe(0, address, result.as_ref()).await;
    logger.scenario_finished(&correlation_id, "ping", result.is_ok()).await;
    result
}

/// Send each payload in order and check the reply against `expected`
///
/// Fails before any network call when the two lists differ in length, and
/// stops at the first transport failure or mismatching response.
pub async fn balancer<P: AsRef<[u8]>, E: AsRef<[u8]>>(
    prober: &dyn Prober,
    logger: &ProbeLogger,
    address: &str,
    payloads: &[P],
    expected: &[E],
) -> Result<AggregateReport> {
    if payloads.len() != expected.len() {
        return Err(AppError::config(format!(
            "Field `data` must be of same length with `expect` ({} != {})",
            payloads.len(),
            expected.len()
        )));
    }

    let correlation_id = logger.scenario_started("balancer", address).await;
    let result = verify_sequence(prober, logger, address, payloads, expected).await;
    if let Ok(report) = &result {
        logger.log_aggregate("balancer", report).await;
    }
    logger.scenario_finished(&correlation_id, "balancer", result.is_ok()).await;
    result
}

async fn verify_sequence<P: AsRef<[u8]>, E: AsRef<[u8]>>(
    prober: &dyn Prober,
    logger: &ProbeLogger,
    address: &str,
    payloads: &[P],
    expected: &[E],
) -> Result<AggregateReport> {
    let mut reports = Vec::with_capacity(payloads.len());
    for (index, (payload, want)) in payloads.iter().zip(expected).enumerate() {
        let result = prober.probe(address, payload.as_ref()).await;
        logger.log_probe(index, address, result.as_ref()).await;
        let report = result?;

        if report.response() != want.as_ref() {
            return Err(AppError::mismatch(index, want.as_ref(), report.response()));
        }
        reports.push(report);
    }
    Ok(aggregate(&reports))
}

/// Burst load: `concurrency` parallel probes with the same payload
pub async fn simulate(
    runner: &ConcurrentRunner,
    address: &str,
    payload: &[u8],
    concurrency: usize,
) -> Result<AggregateReport> {
    simulate_detailed(runner, address, payload, concurrency)
        .await
        .map(|(report, _)| report)
}

/// Like [`simulate`], also returning the response time spread
pub async fn simulate_detailed(
    runner: &ConcurrentRunner,
    address: &str,
    payload: &[u8],
    concurrency: usize,
) -> Result<(AggregateReport, Option<ResponseTimeDistribution>)> {
    let logger = runner.logger();
    let correlation_id = logger.scenario_started("simulate", address).await;

    let result = runner.collect(address, payload, concurrency).await;
    let outcome = result.map(|reports| {
        let distribution = ResponseTimeDistribution::from_reports(&reports);
        (aggregate_with(&reports, runner.averaging()), distribution)
    });

    if let Ok((report, _)) = &outcome {
        logger.log_aggregate("simulate", report).await;
    }
    logger.scenario_finished(&correlation_id, "simulate", outcome.is_ok()).await;
    outcome
}
