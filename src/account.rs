//! The payment accounts a transaction can be recorded against.

use serde::Serialize;

use crate::format::format_currency;

/// A payment account such as a wallet app or bank card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Account {
    /// The ID sent to the server, e.g. "alipay".
    pub id: &'static str,
    /// The display name.
    pub name: &'static str,
    /// The sample balance shown in the app.
    pub balance: f64,
    /// The icon symbol name.
    pub icon: &'static str,
}

impl Account {
    /// The balance as currency, e.g. "¥3,856.75".
    pub fn formatted_balance(&self) -> String {
        format_currency(self.balance)
    }
}

/// The built-in accounts. The first entry is the fallback for unknown IDs.
pub static ACCOUNTS: [Account; 4] = [
    Account {
        id: "alipay",
        name: "支付宝",
        balance: 3856.75,
        icon: "creditcard",
    },
    Account {
        id: "wechat",
        name: "微信",
        balance: 2458.10,
        icon: "message",
    },
    Account {
        id: "cash",
        name: "现金",
        balance: 1250.00,
        icon: "banknote",
    },
    Account {
        id: "bank",
        name: "工商银行",
        balance: 35300.45,
        icon: "building.columns",
    },
];

/// Look up an account by ID, falling back to the first account for unknown IDs.
pub fn get_account(id: &str) -> &'static Account {
    ACCOUNTS
        .iter()
        .find(|account| account.id == id)
        .unwrap_or(&ACCOUNTS[0])
}

#[cfg(test)]
mod tests {
    use super::get_account;

    #[test]
    fn finds_known_account() {
        assert_eq!(get_account("bank").name, "工商银行");
    }

    #[test]
    fn unknown_account_falls_back_to_first() {
        assert_eq!(get_account("paypal").id, "alipay");
    }

    #[test]
    fn balance_is_currency() {
        let balance = get_account("cash").formatted_balance();

        assert!(balance.starts_with('¥'), "got {balance}");
        assert!(balance.contains("1,250"), "got {balance}");
    }
}
