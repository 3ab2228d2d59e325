//! Grouping logic for transactions (day groups, daily and monthly totals).

use std::collections::BTreeMap;

use time::{Date, Duration};

use crate::format::format_currency;

use super::{Transaction, TransactionType};

/// The transactions recorded on one day, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// The local calendar date.
    pub date: Date,
    /// The day's transactions sorted by date-time, newest first.
    pub transactions: Vec<Transaction>,
    /// Sum of the day's income amounts.
    pub income: f64,
    /// Sum of the day's expense amounts.
    pub expense: f64,
}

impl DayGroup {
    /// The line shown above the day's transactions, e.g.
    /// "今天  收入 ¥8,750.00  支出 ¥35.00". Totals of zero are left out.
    pub fn header(&self, today: Date) -> String {
        let mut header = day_label(self.date, today);

        if self.income > 0.0 {
            header.push_str(&format!("  收入 {}", format_currency(self.income)));
        }
        if self.expense > 0.0 {
            header.push_str(&format!("  支出 {}", format_currency(self.expense)));
        }

        header
    }
}

/// Group transactions by calendar day, newest day first.
///
/// Transfers are listed but count toward neither total.
pub fn group_by_day(transactions: &[Transaction]) -> Vec<DayGroup> {
    let mut days: BTreeMap<Date, Vec<Transaction>> = BTreeMap::new();

    for transaction in transactions {
        days.entry(transaction.date.date())
            .or_default()
            .push(transaction.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, mut transactions)| {
            // Stable, so same-minute transactions keep their server order.
            transactions.sort_by(|a, b| b.date.cmp(&a.date));
            let totals = MonthTotals::from_transactions(&transactions);

            DayGroup {
                date,
                transactions,
                income: totals.income,
                expense: totals.expense,
            }
        })
        .collect()
}

/// The header shown above a day group: "今天", "昨天", or e.g. "03月06日".
pub fn day_label(date: Date, today: Date) -> String {
    if date == today {
        return "今天".to_owned();
    }

    if today
        .checked_sub(Duration::days(1))
        .is_some_and(|yesterday| yesterday == date)
    {
        return "昨天".to_owned();
    }

    format!("{:02}月{:02}日", u8::from(date.month()), date.day())
}

/// Income, expense and balance over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthTotals {
    /// Sum of income amounts.
    pub income: f64,
    /// Sum of expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

impl MonthTotals {
    /// Total up `transactions`, ignoring transfers.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut totals = Self::default();

        for transaction in transactions {
            match transaction.kind {
                TransactionType::Income => totals.income += transaction.amount,
                TransactionType::Expense => totals.expense += transaction.amount,
                TransactionType::Transfer => {}
            }
        }

        totals.balance = totals.income - totals.expense;
        totals
    }
}

#[cfg(test)]
mod tests {
    use time::{
        PrimitiveDateTime,
        macros::{date, datetime},
    };

    use crate::transaction::{Transaction, TransactionType};

    use super::{MonthTotals, day_label, group_by_day};

    fn transaction(
        id: &str,
        amount: f64,
        kind: TransactionType,
        date: PrimitiveDateTime,
    ) -> Transaction {
        Transaction {
            id: id.to_owned(),
            amount,
            kind,
            category_id: "food".to_owned(),
            account_id: "alipay".to_owned(),
            date,
            note: String::new(),
            created_by: None,
        }
    }

    #[test]
    fn groups_newest_day_first_and_newest_transaction_first() {
        let transactions = vec![
            transaction("a", 35.0, TransactionType::Expense, datetime!(2025-03-05 12:00)),
            transaction("b", 128.5, TransactionType::Expense, datetime!(2025-03-06 09:00)),
            transaction("c", 8750.0, TransactionType::Income, datetime!(2025-03-05 18:00)),
            transaction("d", 45.5, TransactionType::Expense, datetime!(2025-03-06 20:15)),
        ];

        let days = group_by_day(&transactions);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date!(2025 - 03 - 06));
        assert_eq!(days[1].date, date!(2025 - 03 - 05));

        let day_ids = |index: usize| {
            days[index]
                .transactions
                .iter()
                .map(|transaction| transaction.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(day_ids(0), ["d", "b"]);
        assert_eq!(day_ids(1), ["c", "a"]);
    }

    #[test]
    fn sums_daily_income_and_expense() {
        let transactions = vec![
            transaction("a", 35.0, TransactionType::Expense, datetime!(2025-03-05 12:00)),
            transaction("b", 8750.0, TransactionType::Income, datetime!(2025-03-05 18:00)),
            transaction("c", 45.5, TransactionType::Expense, datetime!(2025-03-05 20:00)),
            transaction("d", 500.0, TransactionType::Transfer, datetime!(2025-03-05 21:00)),
        ];

        let days = group_by_day(&transactions);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].income, 8750.0);
        assert_eq!(days[0].expense, 80.5);
        assert_eq!(days[0].transactions.len(), 4);
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(group_by_day(&[]).is_empty());
    }

    #[test]
    fn labels_today_and_yesterday() {
        let today = date!(2025 - 03 - 01);

        assert_eq!(day_label(date!(2025 - 03 - 01), today), "今天");
        assert_eq!(day_label(date!(2025 - 02 - 28), today), "昨天");
        assert_eq!(day_label(date!(2025 - 02 - 27), today), "02月27日");
        assert_eq!(day_label(date!(2024 - 12 - 31), today), "12月31日");
    }

    #[test]
    fn header_leaves_out_zero_totals() {
        let today = date!(2025 - 03 - 06);
        let expenses_only = group_by_day(&[transaction(
            "a",
            35.0,
            TransactionType::Expense,
            datetime!(2025-03-06 12:00),
        )]);
        let transfer_only = group_by_day(&[transaction(
            "b",
            500.0,
            TransactionType::Transfer,
            datetime!(2025-03-05 12:00),
        )]);

        let header = expenses_only[0].header(today);
        assert!(header.starts_with("今天  支出 ¥35"), "got {header}");
        assert!(!header.contains("收入"), "got {header}");

        assert_eq!(transfer_only[0].header(today), "昨天");
    }

    #[test]
    fn header_shows_both_totals_when_present() {
        let days = group_by_day(&[
            transaction("a", 35.0, TransactionType::Expense, datetime!(2025-03-01 12:00)),
            transaction("b", 100.0, TransactionType::Income, datetime!(2025-03-01 18:00)),
        ]);

        let header = days[0].header(date!(2025 - 03 - 06));

        assert!(header.starts_with("03月01日  收入 ¥100"), "got {header}");
        assert!(header.contains("  支出 ¥35"), "got {header}");
    }

    #[test]
    fn month_totals_compute_balance() {
        let transactions = [
            transaction("a", 100.0, TransactionType::Income, datetime!(2025-03-05 12:00)),
            transaction("b", 30.0, TransactionType::Expense, datetime!(2025-03-06 12:00)),
        ];

        let totals = MonthTotals::from_transactions(&transactions);

        assert_eq!(
            totals,
            MonthTotals {
                income: 100.0,
                expense: 30.0,
                balance: 70.0
            }
        );
    }
}
