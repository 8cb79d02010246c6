//! FairScore Features - Transactions to scoring features
//!
//! Turns a statement's transaction list into:
//! - a [`FeatureVector`](fairscore_core::FeatureVector) for the scoring engine
//! - a [`PortfolioSummary`] of balances, daily cash flow and spend allocation
//!
//! Both are pure functions of their input.

pub mod extract;
pub mod summary;

pub use extract::{extract_features, COLD_START};
pub use summary::{summarize, AllocationLine, CashflowPoint, PortfolioSummary};
