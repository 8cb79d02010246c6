//! Category - Spending category of a statement line
//!
//! Statement parsers usually leave the category blank. The classifier here
//! back-fills it from the free-text description.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Spending category
///
/// # Examples
/// ```
/// use fairscore_core::Category;
///
/// assert_eq!(Category::classify("NEFT SALARY ACME CORP"), Category::Salary);
/// assert_eq!(Category::classify("HDFC CARD EMI"), Category::LoanEmi);
/// assert_eq!("invest_sip".parse::<Category>().unwrap(), Category::InvestSip);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, EnumString, Display, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Salary,
    LoanEmi,
    Rent,
    InvestSip,
    Upi,
    Cash,
    Utilities,
    Food,
    Travel,
    Other,
}

/// Keyword table, checked in order. First match wins.
const RULES: &[(Category, &[&str])] = &[
    (Category::Salary, &["salary", "payroll"]),
    (Category::LoanEmi, &["emi", "loan"]),
    (Category::Rent, &["rent"]),
    (Category::InvestSip, &["sip", "mf", "mutual fund"]),
    (Category::Upi, &["upi", "gpay", "phonepe"]),
    (Category::Cash, &["atm", "cash"]),
    (Category::Utilities, &["bill", "broadband", "electric", "water"]),
    (Category::Food, &["swiggy", "zomato", "cafe"]),
    (Category::Travel, &["uber", "ola", "irctc", "air"]),
];

impl Category {
    /// Classify a transaction description by case-insensitive substring match.
    pub fn classify(description: &str) -> Self {
        let desc = description.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}
