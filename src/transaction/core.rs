//! Defines the core transaction models and their wire format.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use time::PrimitiveDateTime;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Which way the money moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
    /// Money moved between the user's own accounts.
    Transfer,
}

impl TransactionType {
    /// Every transaction type, in the order the app shows them.
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Expense,
        TransactionType::Income,
        TransactionType::Transfer,
    ];

    /// The wire name, e.g. "expense".
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Transfer => "transfer",
        }
    }

    /// The display title.
    pub fn title(&self) -> &'static str {
        match self {
            TransactionType::Expense => "支出",
            TransactionType::Income => "收入",
            TransactionType::Transfer => "转账",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.title() == s)
            .ok_or_else(|| Error::InvalidTransactionType(s.to_owned()))
    }
}

/// An expense, income or transfer as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "TransactionWire")]
pub struct Transaction {
    /// The server's ID for the transaction.
    pub id: String,
    /// The magnitude of the transaction. The direction is given by `kind`.
    pub amount: f64,
    /// Whether this is an expense, income or transfer.
    pub kind: TransactionType,
    /// The category ID, e.g. "food". See [crate::category].
    pub category_id: String,
    /// The account ID, e.g. "alipay". See [crate::account].
    pub account_id: String,
    /// When the transaction happened, in local wall-clock time.
    pub date: PrimitiveDateTime,
    /// A free text note.
    pub note: String,
    /// The family member who recorded the transaction.
    pub created_by: Option<String>,
}

impl Transaction {
    /// Whether the transaction is an expense.
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Whether the transaction is income.
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// The signed amount as shown in lists, e.g. "-¥35.00" or "+¥8750.00".
    pub fn formatted_amount(&self) -> String {
        let prefix = if self.is_expense() {
            "-"
        } else if self.is_income() {
            "+"
        } else {
            ""
        };

        format!("{prefix}¥{:.2}", self.amount.abs())
    }
}

/// The body of a request to record a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The magnitude of the transaction, must be positive.
    pub amount: f64,
    /// Whether this is an expense, income or transfer.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The category ID.
    pub category_id: String,
    /// The account ID.
    pub account_id: String,
    /// When the transaction happened.
    #[serde(serialize_with = "datetime_format::serialize")]
    pub date: PrimitiveDateTime,
    /// A free text note.
    pub note: String,
}

impl NewTransaction {
    /// Create a new transaction with the app's defaults: the "food" category,
    /// the "alipay" account and an empty note.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `amount` is not a positive, finite number.
    pub fn build(amount: f64, kind: TransactionType, date: PrimitiveDateTime) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(format!(
                "{amount} must be a positive number"
            )));
        }

        Ok(Self {
            amount,
            kind,
            category_id: "food".to_owned(),
            account_id: "alipay".to_owned(),
            date,
            note: String::new(),
        })
    }

    /// Set the category ID.
    pub fn category(mut self, category_id: &str) -> Self {
        self.category_id = category_id.to_owned();
        self
    }

    /// Set the account ID.
    pub fn account(mut self, account_id: &str) -> Self {
        self.account_id = account_id.to_owned();
        self
    }

    /// Set the note.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }
}

/// Parse a date-time in any layout the server uses, e.g. "2025-03-06 12:30".
///
/// # Errors
///
/// Returns [Error::InvalidDate] if no accepted layout matches.
pub fn parse_datetime(s: &str) -> Result<PrimitiveDateTime, Error> {
    datetime_format::parse(s.trim()).ok_or_else(|| Error::InvalidDate(s.to_owned()))
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// A transaction as the server writes it. Older and newer server versions
/// name some fields differently and may send both names at once.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionWire {
    #[serde(default, deserialize_with = "deserialize_id")]
    id: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: TransactionType,
    #[serde(default)]
    category_id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    account: Option<String>,
    #[serde(default, deserialize_with = "datetime_format::deserialize_option")]
    date: Option<PrimitiveDateTime>,
    #[serde(default, deserialize_with = "datetime_format::deserialize_option")]
    created_at: Option<PrimitiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    note: String,
    #[serde(default)]
    created_by: Option<String>,
}

impl TryFrom<TransactionWire> for Transaction {
    type Error = String;

    fn try_from(wire: TransactionWire) -> Result<Self, Self::Error> {
        let date = wire
            .date
            .or(wire.created_at)
            .ok_or_else(|| "missing field `date` or `createdAt`".to_owned())?;

        Ok(Self {
            id: wire.id,
            amount: wire.amount,
            kind: wire.kind,
            category_id: wire.category_id.or(wire.category).unwrap_or_default(),
            account_id: wire.account_id.or(wire.account).unwrap_or_default(),
            date,
            note: wire.note,
            created_by: wire.created_by,
        })
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

mod datetime_format {
    //! Specifies how transaction date-times are written to and read from the
    //! server.
    //!
    //! The server writes local date-times without an offset. Several layouts
    //! are accepted when reading, and "yyyy-MM-dd HH:mm:ss" is always written.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{
        Date, OffsetDateTime, PrimitiveDateTime, Time,
        format_description::{BorrowedFormatItem, well_known::Rfc3339},
        macros::format_description,
    };

    /// Date time format sent to the server, e.g. "2025-03-06 12:30:00".
    pub const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    const ISO_FORMAT: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

    const ISO_SUBSECOND_FORMAT: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

    const SPACE_MINUTE_FORMAT: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day] [hour]:[minute]");

    const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(dt: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = dt
            .format(DATE_TIME_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    /// Read any accepted layout. `null` is `None`.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                parse(&s)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time \"{s}\"")))
            })
            .transpose()
    }

    /// Parse any of the accepted layouts.
    ///
    /// RFC 3339 values keep their own wall-clock time; the offset is dropped.
    pub fn parse(s: &str) -> Option<PrimitiveDateTime> {
        [
            DATE_TIME_FORMAT,
            ISO_FORMAT,
            ISO_SUBSECOND_FORMAT,
            SPACE_MINUTE_FORMAT,
        ]
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(s, format).ok())
        .or_else(|| {
            OffsetDateTime::parse(s, &Rfc3339)
                .ok()
                .map(|dt| PrimitiveDateTime::new(dt.date(), dt.time()))
        })
        .or_else(|| {
            Date::parse(s, DATE_FORMAT)
                .ok()
                .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
        })
    }
}
