//! Feature extraction from a transaction list
//!
//! Each feature is a ratio in `[0, 1]` (except `pay_hist`, see below),
//! computed in full precision and rounded to two decimals on output.

use fairscore_core::{round_dp, FeatureVector, Transaction};
use std::collections::{BTreeMap, BTreeSet};

/// Feature vector used when there is no transaction history at all.
///
/// This is the cold-start baseline and must not drift.
pub const COLD_START: FeatureVector = FeatureVector {
    pay_hist: 0.7,
    utilization: 0.4,
    savings_rate: 0.2,
    cashflow_var: 0.3,
    history_len: 0.3,
    sip_regularity: 0.5,
    mandate_punctual: 0.7,
};

/// Guards ratio denominators against a zero inflow
const EPSILON: f64 = 1e-6;

/// Minimum number of distinct days before daily volatility is measured
const MIN_VOLATILITY_DAYS: usize = 5;

/// Volatility used when there are too few days to measure it
const FALLBACK_CASHFLOW_VAR: f64 = 0.3;

/// Months of history that count as a full record
const FULL_HISTORY_MONTHS: f64 = 24.0;

const LOAN_KEYWORDS: &[&str] = &["emi", "loan", "card", "creditcard", "repay"];
const SIP_KEYWORDS: &[&str] = &["sip", "mutual fund", "mf", "systematic"];
const PENALTY_KEYWORDS: &[&str] = &["reversal", "penalty", "charge", "bounce", "return"];

/// Derive the scoring features from a statement.
///
/// An empty statement yields [`COLD_START`].
///
/// `pay_hist` is `0.85 + 0.1 * (savings_rate - 0.2)` when there is any inflow.
/// It is not clamped here and the scoring engine does not clamp benefit
/// features either.
pub fn extract_features(transactions: &[Transaction]) -> FeatureVector {
    if transactions.is_empty() {
        tracing::debug!("No transactions, using cold-start features");
        return COLD_START;
    }

    let inflow: f64 = transactions.iter().map(|t| t.credit.to_f64()).sum();
    let outflow: f64 = transactions.iter().map(|t| t.debit.to_f64()).sum();

    let savings_rate = (inflow - outflow).max(0.0) / inflow.max(EPSILON);

    let loan_outflow: f64 = transactions
        .iter()
        .filter(|t| t.description_matches(LOAN_KEYWORDS))
        .map(|t| t.debit.to_f64())
        .sum();
    let utilization = (loan_outflow / inflow.max(EPSILON)).min(1.0);

    let cashflow_var = cashflow_volatility(transactions);

    let months: BTreeSet<&str> = transactions.iter().map(|t| t.month()).collect();
    let history_len = (months.len() as f64 / FULL_HISTORY_MONTHS).min(1.0);

    let sip_months: BTreeSet<&str> = transactions
        .iter()
        .filter(|t| t.description_matches(SIP_KEYWORDS))
        .map(|t| t.month())
        .collect();
    let sip_regularity = (sip_months.len() as f64 / months.len().max(1) as f64).min(1.0);

    let penalty_hits = transactions
        .iter()
        .filter(|t| t.description_matches(PENALTY_KEYWORDS))
        .count();
    let mandate_punctual = (0.9 - 0.05 * penalty_hits as f64).max(0.0);

    let pay_hist = if inflow > 0.0 {
        0.85 + 0.1 * (savings_rate - 0.2)
    } else {
        COLD_START.pay_hist
    };

    let features = FeatureVector {
        pay_hist: round_dp(pay_hist, 2),
        utilization: round_dp(utilization, 2),
        savings_rate: round_dp(savings_rate, 2),
        cashflow_var: round_dp(cashflow_var, 2),
        history_len: round_dp(history_len, 2),
        sip_regularity: round_dp(sip_regularity, 2),
        mandate_punctual: round_dp(mandate_punctual, 2),
    };

    tracing::debug!(
        transactions = transactions.len(),
        months = months.len(),
        penalty_hits,
        "Extracted features"
    );

    features
}

/// Daily net-flow volatility: population stddev of per-day net flow over
/// five times the mean absolute daily net, capped at 1.
fn cashflow_volatility(transactions: &[Transaction]) -> f64 {
    let mut daily_net: BTreeMap<&str, f64> = BTreeMap::new();
    for t in transactions {
        *daily_net.entry(t.day()).or_insert(0.0) += t.net();
    }

    if daily_net.len() < MIN_VOLATILITY_DAYS {
        return FALLBACK_CASHFLOW_VAR;
    }

    let values: Vec<f64> = daily_net.into_values().collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mean_abs = values.iter().map(|v| v.abs()).sum::<f64>() / n;
    let scale = if mean_abs == 0.0 { 1.0 } else { mean_abs };

    (variance.sqrt() / (scale * 5.0)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairscore_core::Amount;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn txn(date: &str, description: &str, credit: Decimal, debit: Decimal) -> Transaction {
        Transaction::new(
            date,
            description,
            Amount::new(credit).unwrap(),
            Amount::new(debit).unwrap(),
            Decimal::ZERO,
        )
    }

    fn sample_statement() -> Vec<Transaction> {
        vec![
            txn("2024-01-01", "SALARY ACME", dec!(50000), dec!(0)),
            txn("2024-01-03", "HDFC LOAN EMI", dec!(0), dec!(10000)),
            txn("2024-01-05", "SIP - Axis MF", dec!(0), dec!(5000)),
            txn("2024-02-01", "SALARY ACME", dec!(50000), dec!(0)),
            txn("2024-02-04", "Swiggy", dec!(0), dec!(1000)),
            txn("2024-02-10", "ECS BOUNCE CHARGE", dec!(0), dec!(700)),
        ]
    }

    #[test]
    fn test_empty_input_is_cold_start() {
        let features = extract_features(&[]);
        assert_eq!(features, COLD_START);
        assert_eq!(features.pay_hist, 0.7);
        assert_eq!(features.utilization, 0.4);
        assert_eq!(features.savings_rate, 0.2);
        assert_eq!(features.cashflow_var, 0.3);
        assert_eq!(features.history_len, 0.3);
        assert_eq!(features.sip_regularity, 0.5);
        assert_eq!(features.mandate_punctual, 0.7);
    }

    #[test]
    fn test_sample_statement() {
        let features = extract_features(&sample_statement());

        // inflow 100000, outflow 16700
        assert_eq!(features.savings_rate, 0.83);
        // only the EMI line is loan-ish
        assert_eq!(features.utilization, 0.1);
        assert_eq!(features.cashflow_var, 0.26);
        // 2 months of history
        assert_eq!(features.history_len, 0.08);
        // SIP seen in January only
        assert_eq!(features.sip_regularity, 0.5);
        // one bounce charge
        assert_eq!(features.mandate_punctual, 0.85);
        // 0.85 + 0.1 * (0.833 - 0.2)
        assert_eq!(features.pay_hist, 0.91);
    }

    #[test]
    fn test_few_days_uses_fallback_volatility() {
        let statement = vec![
            txn("2024-01-01", "SALARY", dec!(1000), dec!(0)),
            txn("2024-01-01 18:00", "Cafe", dec!(0), dec!(100)),
            txn("2024-01-02", "Rent", dec!(0), dec!(400)),
        ];
        let features = extract_features(&statement);
        assert_eq!(features.cashflow_var, 0.3);
    }

    #[test]
    fn test_zero_inflow() {
        let statement = vec![
            txn("2024-01-01", "Credit card repay", dec!(0), dec!(1000)),
            txn("2024-01-02", "Groceries", dec!(0), dec!(300)),
        ];
        let features = extract_features(&statement);

        assert_eq!(features.pay_hist, 0.7);
        assert_eq!(features.savings_rate, 0.0);
        // loan-ish outflow over a zero inflow saturates
        assert_eq!(features.utilization, 1.0);
    }

    #[test]
    fn test_mandate_punctual_floors_at_zero() {
        let statement: Vec<Transaction> = (1..=20)
            .map(|d| txn(&format!("2024-01-{:02}", d), "NACH RETURN", dec!(0), dec!(10)))
            .collect();
        let features = extract_features(&statement);
        assert_eq!(features.mandate_punctual, 0.0);
    }

    #[test]
    fn test_history_len_caps_at_one() {
        let statement: Vec<Transaction> = (0..30)
            .map(|i| {
                let year = 2020 + i / 12;
                let month = i % 12 + 1;
                txn(&format!("{}-{:02}-15", year, month), "Salary", dec!(100), dec!(0))
            })
            .collect();
        let features = extract_features(&statement);
        assert_eq!(features.history_len, 1.0);
    }

    #[test]
    fn test_pay_hist_not_clamped() {
        // savings rate 1.0 -> 0.85 + 0.1 * 0.8
        let statement = vec![txn("2024-01-01", "Salary", dec!(1000), dec!(0))];
        let features = extract_features(&statement);
        assert_eq!(features.savings_rate, 1.0);
        assert_eq!(features.pay_hist, 0.93);
    }
}
