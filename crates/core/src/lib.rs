//! FairScore Core - Domain types
//!
//! This crate contains the fundamental types shared by the scoring pipeline:
//! - `Amount`: Non-negative decimal wrapper for statement amounts
//! - `Transaction`: One bank-statement line
//! - `Category`: Spending category assigned by keyword classification
//! - `FeatureVector`: The seven scalar features consumed by the scoring engine

pub mod amount;
pub mod category;
pub mod features;
pub mod round;
pub mod transaction;

pub use amount::{Amount, AmountError};
pub use category::Category;
pub use features::{FeatureName, FeatureVector};
pub use round::round_dp;
pub use transaction::Transaction;
