//! 萌萌记账 (MengMeng Budget) is a personal finance tracker.
//!
//! This library is a typed client for its bookkeeping server: registering
//! and logging in, the income/expense summary, listing and recording
//! transactions, and generating family share codes. It also provides the
//! paging and per-day grouping the transaction list is built from.
//!
//! ```no_run
//! use mengmeng_budget::{BudgetClient, TransactionFilter, TransactionPager, QueryMonth};
//!
//! # async fn run() -> Result<(), mengmeng_budget::Error> {
//! let client = BudgetClient::new("http://localhost:8080/api")?;
//! client.login("mengmeng", "password").await?;
//!
//! let month: QueryMonth = "2025-03".parse()?;
//! let mut pager = TransactionPager::new(TransactionFilter::All, month, 10);
//! pager.load_all(&client).await?;
//!
//! for day in pager.day_groups() {
//!     println!("{} income {} expense {}", day.date, day.income, day.expense);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod account;
pub mod auth;
pub mod category;
mod client;
pub mod config;
pub mod endpoints;
mod envelope;
mod error;
pub mod format;
mod logging;
mod pagination;
mod session;
mod summary;
pub mod timezone;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use auth::AuthToken;
pub use client::BudgetClient;
pub use config::Config;
pub use envelope::{Envelope, SUCCESS_CODE};
pub use error::Error;
pub use logging::LOG_BODY_LENGTH_LIMIT;
pub use pagination::{DEFAULT_PAGE_SIZE, TransactionPager};
pub use session::Session;
pub use summary::HomeSummary;
pub use transaction::{
    DayGroup, MonthTotals, NewTransaction, Page, PageQuery, QueryMonth, SummaryFilter,
    Transaction, TransactionFilter, TransactionType,
};
