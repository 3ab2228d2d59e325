//! Transactions for the bookkeeping client.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` builder
//! - The filter and month a list or summary is scoped to
//! - Client methods for listing and recording transactions
//! - Grouping a list by day with daily totals

mod core;
mod create_transaction;
mod grouping;
mod query;
mod transactions_page;

pub use self::core::{NewTransaction, Transaction, TransactionType, parse_datetime};
pub use grouping::{DayGroup, MonthTotals, day_label, group_by_day};
pub use query::{MONTHLY_QUERY, PageQuery, QueryMonth, SummaryFilter, TransactionFilter};
pub use transactions_page::Page;
