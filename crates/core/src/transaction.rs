//! Transaction - One line of a bank statement

use crate::amount::Amount;
use crate::category::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single statement line as produced by the ingestion layer.
///
/// Dates are kept as the text the statement carried (normally `YYYY-MM-DD`,
/// sometimes followed by a time). Grouping by day or month works on that
/// text directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub credit: Amount,

    #[serde(default)]
    pub debit: Amount,

    #[serde(default)]
    pub balance: Decimal,

    /// Empty until a classifier back-fills it
    #[serde(default)]
    pub category: String,

    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Transaction {
    /// Create a transaction with no category or reference
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        credit: Amount,
        debit: Amount,
        balance: Decimal,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            credit,
            debit,
            balance,
            category: String::new(),
            reference: None,
        }
    }

    /// Calendar day key: the date text up to the first space
    pub fn day(&self) -> &str {
        self.date.split(' ').next().unwrap_or("")
    }

    /// Year-month key: the first seven characters of the date (`YYYY-MM`)
    pub fn month(&self) -> &str {
        match self.date.char_indices().nth(7) {
            Some((idx, _)) => &self.date[..idx],
            None => &self.date,
        }
    }

    /// Net flow of this line (credit minus debit)
    pub fn net(&self) -> f64 {
        self.credit.to_f64() - self.debit.to_f64()
    }

    /// True if the lowercased description contains any of the keywords
    pub fn description_matches(&self, keywords: &[&str]) -> bool {
        let desc = self.description.to_lowercase();
        keywords.iter().any(|k| desc.contains(k))
    }

    /// The stored category if it parses, otherwise the classifier's guess
    pub fn effective_category(&self) -> Category {
        self.category
            .parse()
            .unwrap_or_else(|_| Category::classify(&self.description))
    }

    /// Fill in the category if the statement left it blank
    pub fn with_category_filled(mut self) -> Self {
        if self.category.is_empty() {
            self.category = Category::classify(&self.description).to_string();
        }
        self
    }
}
