//! Client-side state container for the WalletSync HTTP API.
//!
//! [`FinanceStore`] owns the income and expense collections, keeps them in
//! sync with the remote server, and derives totals, balance and a short
//! transaction history for the consuming UI layer.

pub use client::{ApiClient, ApiError};
pub use store::{FinanceStore, HistoryEntry, RecordKind};

mod client;
mod store;
