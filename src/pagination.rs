//! This modules defines the paging flow of the transaction list: pages are
//! requested one at a time and accumulated until the server runs out.

use crate::{
    BudgetClient, Error, HomeSummary,
    transaction::{
        DayGroup, MonthTotals, Page, PageQuery, QueryMonth, SummaryFilter, Transaction,
        TransactionFilter, group_by_day,
    },
};

/// The number of transactions requested per page when not configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Accumulates pages of transactions for one filter and month.
///
/// A page shorter than `page_size` means there is nothing more to load. A
/// failed load also stops paging until [TransactionPager::refresh].
#[derive(Debug, Clone)]
pub struct TransactionPager {
    filter: TransactionFilter,
    month: QueryMonth,
    page_size: u32,
    current_page: u32,
    has_more: bool,
    is_loading: bool,
    transactions: Vec<Transaction>,
    last_error: Option<String>,
}

impl TransactionPager {
    /// Create a pager for `filter` in `month`. A `page_size` of zero is
    /// treated as [DEFAULT_PAGE_SIZE].
    pub fn new(filter: TransactionFilter, month: QueryMonth, page_size: u32) -> Self {
        Self {
            filter,
            month,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            current_page: 1,
            has_more: true,
            is_loading: false,
            transactions: Vec::new(),
            last_error: None,
        }
    }

    /// The selected filter.
    pub fn filter(&self) -> TransactionFilter {
        self.filter
    }

    /// The selected month.
    pub fn month(&self) -> QueryMonth {
        self.month
    }

    /// The number of transactions requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The page the next load will request.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Whether another load may return more transactions.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a load has begun and not finished.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Every transaction loaded so far, in server order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The message of the most recent failed load, cleared on refresh.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The loaded transactions grouped by day, newest first.
    pub fn day_groups(&self) -> Vec<DayGroup> {
        group_by_day(&self.transactions)
    }

    /// Totals over the loaded transactions.
    pub fn loaded_totals(&self) -> MonthTotals {
        MonthTotals::from_transactions(&self.transactions)
    }

    /// The summary request matching the current selection.
    pub fn summary_filter(&self) -> SummaryFilter {
        SummaryFilter::new(self.filter, self.month)
    }

    /// The list request for the next page.
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            filter: self.summary_filter(),
            page_num: self.current_page,
            page_size: self.page_size,
        }
    }

    /// Drop everything loaded and start again from page 1.
    pub fn refresh(&mut self) {
        self.transactions.clear();
        self.current_page = 1;
        self.has_more = true;
        self.is_loading = false;
        self.last_error = None;
    }

    /// Change the filter and start again from page 1.
    pub fn set_filter(&mut self, filter: TransactionFilter) {
        self.filter = filter;
        self.refresh();
    }

    /// Change the month and start again from page 1.
    pub fn set_month(&mut self, month: QueryMonth) {
        self.month = month;
        self.refresh();
    }

    /// Mark a load as started and return the request to send, or `None` if a
    /// load is already running or there is nothing more to load.
    pub fn begin_load(&mut self) -> Option<PageQuery> {
        if self.is_loading || !self.has_more {
            return None;
        }

        self.is_loading = true;
        self.last_error = None;
        tracing::debug!(
            "loading page {} ({} per page) for {} {}",
            self.current_page,
            self.page_size,
            self.month,
            self.filter.id()
        );

        Some(self.page_query())
    }

    /// Apply the outcome of the load started by [TransactionPager::begin_load].
    ///
    /// Returns the number of transactions added.
    pub fn finish_load(&mut self, result: Result<Page, Error>) -> Result<usize, Error> {
        self.is_loading = false;

        match result {
            Ok(page) => {
                let count = page.items.len();
                self.transactions.extend(page.items);

                if count < self.page_size as usize {
                    self.has_more = false;
                    tracing::debug!("all {} transactions loaded", self.transactions.len());
                } else {
                    self.current_page += 1;
                }

                Ok(count)
            }
            Err(error) => {
                tracing::error!("could not load page {}: {error}", self.current_page);
                self.has_more = false;
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Load the next page, returning how many transactions it added.
    ///
    /// Does nothing and returns `Ok(0)` if there is nothing more to load.
    ///
    /// # Errors
    ///
    /// Returns the client's error. Transactions loaded earlier are kept.
    pub async fn load_next(&mut self, client: &BudgetClient) -> Result<usize, Error> {
        let Some(query) = self.begin_load() else {
            return Ok(0);
        };

        let result = client.transactions_page(&query).await;
        self.finish_load(result)
    }

    /// The server's summary for the current selection.
    ///
    /// If the summary cannot be fetched the error is logged and the totals
    /// over the transactions loaded so far are returned instead, so call this
    /// after loading.
    pub async fn month_summary(&self, client: &BudgetClient) -> HomeSummary {
        match client.home_summary(&self.summary_filter()).await {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(
                    "could not load the summary for {}, using {} loaded transactions: {error}",
                    self.month,
                    self.transactions.len()
                );
                HomeSummary::from(self.loaded_totals())
            }
        }
    }

    /// Keep loading pages until there is nothing more to load.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error.
    pub async fn load_all(&mut self, client: &BudgetClient) -> Result<usize, Error> {
        let mut total = 0;

        while self.has_more {
            total += self.load_next(client).await?;
        }

        Ok(total)
    }
}
