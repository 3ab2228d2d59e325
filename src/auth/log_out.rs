//! Logging out. The server keeps no session, so this only forgets the token.

use crate::BudgetClient;

impl BudgetClient {
    /// Forget the bearer token. Later authenticated calls fail with
    /// [crate::Error::NotLoggedIn] until the next [BudgetClient::login].
    pub fn logout(&self) {
        self.clear_token();
        tracing::info!("logged out");
    }
}
