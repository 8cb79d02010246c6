//! CLI commands
//!
//! Each command prints its result as JSON on stdout and also returns it, so
//! the same functions drive the binary and the integration tests.

use crate::context::AppContext;
use crate::publisher::AuditPublisher;
use anyhow::Context as _;
use fairscore_core::{FeatureVector, Transaction};
use fairscore_fairness::{FairnessAuditResult, FairnessAuditor};
use fairscore_features::{extract_features, summarize, PortfolioSummary};
use fairscore_ledger::{AppendReceipt, AuditPayload};
use fairscore_scoring::ScoreResult;
use serde::Serialize;
use std::path::Path;

/// Output of the `features` command
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    pub features: FeatureVector,
    pub summary: PortfolioSummary,
}

/// Output of the `verify` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub records: usize,
    pub tip: Option<String>,
}

/// Read a statement file: a JSON array of transactions
pub fn load_transactions(path: &Path) -> anyhow::Result<Vec<Transaction>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let transactions: Vec<Transaction> = serde_json::from_str(&content)
        .with_context(|| format!("parsing transactions in {}", path.display()))?;

    Ok(transactions
        .into_iter()
        .map(Transaction::with_category_filled)
        .collect())
}

/// Extract features and the portfolio summary from a statement file
pub fn features(path: &Path) -> anyhow::Result<FeatureReport> {
    let transactions = load_transactions(path)?;
    tracing::info!(transactions = transactions.len(), "Extracting features");

    let report = FeatureReport {
        features: extract_features(&transactions),
        summary: summarize(&transactions),
    };

    print_json(&report)?;
    Ok(report)
}

/// Score a feature file. Missing or non-numeric features score as 0.
pub fn score(ctx: &AppContext, path: &Path) -> anyhow::Result<ScoreResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing features in {}", path.display()))?;

    // Accept a bare feature object or the `features` command output
    let features = value.get("features").unwrap_or(&value);
    let result = ctx.engine.score_json(features);

    print_json(&result)?;
    Ok(result)
}

/// Audit two cohorts of scores
pub fn audit(
    protected: &[f64],
    reference: &[f64],
    threshold: i32,
    tolerance: f64,
) -> anyhow::Result<FairnessAuditResult> {
    if protected.is_empty() || reference.is_empty() {
        tracing::warn!(
            protected = protected.len(),
            reference = reference.len(),
            "Empty cohort, its approval rate counts as 0"
        );
    }

    let result = FairnessAuditor::new(threshold, tolerance).audit(protected, reference);

    print_json(&result)?;
    Ok(result)
}

/// Append an audit decision to the ledger
pub async fn publish(
    publisher: &AuditPublisher,
    payload: AuditPayload,
) -> anyhow::Result<AppendReceipt> {
    let receipt = publisher.publish(payload).await?;

    print_json(&receipt)?;
    Ok(receipt)
}

/// Verify the chain and every payload digest
pub fn verify(ctx: &AppContext) -> anyhow::Result<VerifyReport> {
    let ledger = ctx.open_ledger()?;
    let records = ledger.verify()?;

    // Payload digests can only be checked if the payloads can be opened
    let all = ledger.records()?;
    for record in &all {
        ledger.open_payload(record)?;
    }

    let report = VerifyReport {
        records,
        tip: all.last().map(|r| r.block_hash.clone()),
    };

    println!("✅ Hash chain verified ({} records)", report.records);
    if let Some(ref tip) = report.tip {
        println!("   Tip: {}", tip);
    }
    Ok(report)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
