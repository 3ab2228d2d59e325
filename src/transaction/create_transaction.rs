//! Recording a new transaction.

use crate::{BudgetClient, Error, client::Auth, endpoints};

use super::NewTransaction;

impl BudgetClient {
    /// Record `transaction` on the server.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without sending anything if there is no
    /// token, or [Error::Api] with the server's message (or "添加交易失败")
    /// if the server rejects it.
    pub async fn add_transaction(&self, transaction: &NewTransaction) -> Result<(), Error> {
        self.post(endpoints::ADD_TRANSACTION, transaction, Auth::Bearer)
            .await?
            .into_data("添加交易失败")?;
        tracing::info!(
            "added {} of {:.2} in {}",
            transaction.kind,
            transaction.amount,
            transaction.category_id
        );

        Ok(())
    }
}
