//! Portfolio summary - balances, daily cash flow and spend allocation

use fairscore_core::{round_dp, Category, Transaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net flow for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowPoint {
    pub date: String,
    pub amount: Decimal,
}

/// Spend in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub category: Category,
    pub amount: Decimal,
    /// Share of total spend, in percent (1 decimal)
    pub pct: f64,
}

/// Statement overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Balance column of the last line
    pub balance: Decimal,
    pub inflow: Decimal,
    pub outflow: Decimal,
    /// Share of inflow not spent (3 decimals)
    pub savings_rate: f64,
    /// Sorted by date
    pub cashflow: Vec<CashflowPoint>,
    /// Sorted by amount, largest first
    pub allocation: Vec<AllocationLine>,
}

/// Summarize a statement.
///
/// Lines without a category are classified from their description.
pub fn summarize(transactions: &[Transaction]) -> PortfolioSummary {
    let mut daily: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut spend: BTreeMap<Category, Decimal> = BTreeMap::new();
    let mut balance = Decimal::ZERO;

    for t in transactions {
        *daily.entry(t.day()).or_insert(Decimal::ZERO) += t.credit.value() - t.debit.value();
        *spend.entry(t.effective_category()).or_insert(Decimal::ZERO) += t.debit.value();
        balance = t.balance;
    }

    let inflow: Decimal = transactions.iter().map(|t| &t.credit).sum();
    let outflow: Decimal = transactions.iter().map(|t| &t.debit).sum();

    let savings_rate = {
        let surplus = (inflow - outflow).max(Decimal::ZERO).to_f64().unwrap_or(0.0);
        let base = inflow.to_f64().unwrap_or(0.0).max(1e-6);
        round_dp(surplus / base, 3)
    };

    let cashflow = daily
        .into_iter()
        .map(|(date, amount)| CashflowPoint {
            date: date.to_string(),
            amount,
        })
        .collect();

    let total_spend = {
        let total: Decimal = spend.values().sum();
        if total.is_zero() {
            Decimal::ONE
        } else {
            total
        }
    };

    let mut allocation: Vec<AllocationLine> = spend
        .into_iter()
        .map(|(category, amount)| {
            let pct = (amount * Decimal::ONE_HUNDRED / total_spend)
                .to_f64()
                .map(|p| round_dp(p, 1))
                .unwrap_or(0.0);
            AllocationLine {
                category,
                amount,
                pct,
            }
        })
        .collect();
    allocation.sort_by(|a, b| b.amount.cmp(&a.amount));

    PortfolioSummary {
        balance,
        inflow,
        outflow,
        savings_rate,
        cashflow,
        allocation,
    }
}
