//! Fetching transactions: the home screen's recent list and the paged list.

use serde::Deserialize;

use crate::{BudgetClient, Error, client::Auth, endpoints};

use super::{PageQuery, Transaction};

/// One page of transactions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// The transactions on this page, in server order.
    pub items: Vec<Transaction>,
    /// The total number of matching transactions, if the server reported it.
    pub total: Option<u64>,
}

/// The server sends either a bare array or a paged object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageData {
    Items(Vec<Transaction>),
    Paged {
        #[serde(alias = "list")]
        records: Vec<Transaction>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl From<PageData> for Page {
    fn from(data: PageData) -> Self {
        match data {
            PageData::Items(items) => Page { items, total: None },
            PageData::Paged { records, total } => Page {
                items: records,
                total,
            },
        }
    }
}

impl BudgetClient {
    /// The most recent transactions shown on the home screen.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without sending anything if there is no
    /// token, [Error::Api] if the server reports a failure, or
    /// [Error::MalformedResponse] if `data` is not a list of transactions.
    pub async fn recent_transactions(&self) -> Result<Vec<Transaction>, Error> {
        let page: PageData = self
            .get(endpoints::HOME_RECENT, Auth::Bearer)
            .await?
            .into_typed("获取首页数据失败")?;

        Ok(Page::from(page).items)
    }

    /// One page of transactions matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without sending anything if there is no
    /// token, [Error::Api] if the server reports a failure, or
    /// [Error::MalformedResponse] if `data` is not a page of transactions.
    pub async fn transactions_page(&self, query: &PageQuery) -> Result<Page, Error> {
        let page: PageData = self
            .post(endpoints::HOME_ALL, query, Auth::Bearer)
            .await?
            .into_typed("加载交易数据失败")?;
        let page = Page::from(page);
        tracing::debug!(
            "loaded {} transactions for page {} of {}",
            page.items.len(),
            query.page_num,
            query.filter.query_month
        );

        Ok(page)
    }
}
