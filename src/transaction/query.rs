//! The selection a transaction list or summary is scoped to: a filter chip and
//! a month.

use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Serializer};
use time::{Date, Month};

use crate::{Error, transaction::TransactionType};

/// The filter chips shown above the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionFilter {
    /// No filtering.
    #[default]
    All,
    /// Expenses only.
    Expense,
    /// Income only.
    Income,
    /// Expenses in the "food" category.
    Food,
    /// Expenses in the "shopping" category.
    Shopping,
    /// Expenses in the "transport" category.
    Transport,
    /// Expenses in the "entertainment" category.
    Entertainment,
    /// Expenses in the "housing" category.
    Housing,
    /// Expenses in the "medical" category.
    Medical,
    /// Expenses in the "education" category.
    Education,
    /// Expenses in the "gift" category.
    Gift,
    /// Income in the salary category.
    Salary,
    /// Expenses in the "other" category.
    Other,
}

impl TransactionFilter {
    /// Every filter, in display order.
    pub const ALL: [TransactionFilter; 13] = [
        TransactionFilter::All,
        TransactionFilter::Expense,
        TransactionFilter::Income,
        TransactionFilter::Food,
        TransactionFilter::Shopping,
        TransactionFilter::Transport,
        TransactionFilter::Entertainment,
        TransactionFilter::Housing,
        TransactionFilter::Medical,
        TransactionFilter::Education,
        TransactionFilter::Gift,
        TransactionFilter::Salary,
        TransactionFilter::Other,
    ];

    /// The ID used on the command line. Category filters use the category ID.
    pub fn id(&self) -> &'static str {
        match self {
            TransactionFilter::All => "all",
            TransactionFilter::Expense => "expense",
            TransactionFilter::Income => "income",
            TransactionFilter::Food => "food",
            TransactionFilter::Shopping => "shopping",
            TransactionFilter::Transport => "transport",
            TransactionFilter::Entertainment => "entertainment",
            TransactionFilter::Housing => "housing",
            TransactionFilter::Medical => "medical",
            TransactionFilter::Education => "education",
            TransactionFilter::Gift => "gift",
            TransactionFilter::Salary => "salary",
            TransactionFilter::Other => "other",
        }
    }

    /// The chip label.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionFilter::All => "全部",
            TransactionFilter::Expense => "支出",
            TransactionFilter::Income => "收入",
            TransactionFilter::Food => "餐饮",
            TransactionFilter::Shopping => "购物",
            TransactionFilter::Transport => "交通",
            TransactionFilter::Entertainment => "娱乐",
            TransactionFilter::Housing => "住房",
            TransactionFilter::Medical => "医疗",
            TransactionFilter::Education => "教育",
            TransactionFilter::Gift => "礼物",
            TransactionFilter::Salary => "工资",
            TransactionFilter::Other => "其他",
        }
    }

    /// The transaction type this filter restricts to, if any.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        match self {
            TransactionFilter::All => None,
            TransactionFilter::Income | TransactionFilter::Salary => Some(TransactionType::Income),
            _ => Some(TransactionType::Expense),
        }
    }

    /// The category ID this filter restricts to, if any.
    pub fn category_id(&self) -> Option<&'static str> {
        match self {
            TransactionFilter::All | TransactionFilter::Expense | TransactionFilter::Income => None,
            category => Some(category.id()),
        }
    }

    /// The `(type, category)` pair sent to the server, with empty strings
    /// meaning "no filter".
    pub fn as_query_params(&self) -> (String, String) {
        (
            self.transaction_type()
                .map(|kind| kind.as_str().to_owned())
                .unwrap_or_default(),
            self.category_id().map(str::to_owned).unwrap_or_default(),
        )
    }
}

impl Display for TransactionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        TransactionFilter::ALL
            .into_iter()
            .find(|filter| filter.id().eq_ignore_ascii_case(s) || filter.label() == s)
            .ok_or_else(|| Error::InvalidFilter(s.to_owned()))
    }
}

/// A calendar month, written `yyyy-MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryMonth {
    year: i32,
    month: Month,
}

impl QueryMonth {
    /// The month containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.month
    }

    /// The month before this one.
    pub fn previous(&self) -> Self {
        let year = if self.month == Month::January {
            self.year - 1
        } else {
            self.year
        };

        Self {
            year,
            month: self.month.previous(),
        }
    }

    /// The month after this one, or this month if the next month would be
    /// after the month containing `today`.
    pub fn next(&self, today: Date) -> Self {
        let year = if self.month == Month::December {
            self.year + 1
        } else {
            self.year
        };
        let next = Self {
            year,
            month: self.month.next(),
        };

        if next > Self::containing(today) {
            *self
        } else {
            next
        }
    }

    /// The header shown above a month, e.g. "2025年03月".
    pub fn title(&self) -> String {
        format!("{}年{:02}月", self.year, u8::from(self.month))
    }
}

impl Display for QueryMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for QueryMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self { year, month })
    }
}

impl Serialize for QueryMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The `queryType` the app sends with every list and summary request.
/// `2` scopes the query to `queryMonth`.
pub const MONTHLY_QUERY: u8 = 2;

/// The body of a summary request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFilter {
    /// "expense", "income" or "" for any.
    #[serde(rename = "type")]
    pub kind: String,
    /// A category ID or "" for any.
    pub category: String,
    /// Always [MONTHLY_QUERY].
    pub query_type: u8,
    /// The month to summarise.
    pub query_month: QueryMonth,
}

impl SummaryFilter {
    /// The summary filter for `filter` in `month`.
    pub fn new(filter: TransactionFilter, month: QueryMonth) -> Self {
        let (kind, category) = filter.as_query_params();

        Self {
            kind,
            category,
            query_type: MONTHLY_QUERY,
            query_month: month,
        }
    }
}

/// The body of a paged transaction list request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// The same filter fields as the summary, so list and totals agree.
    #[serde(flatten)]
    pub filter: SummaryFilter,
    /// 1-based page number.
    pub page_num: u32,
    /// Number of transactions per page.
    pub page_size: u32,
}
