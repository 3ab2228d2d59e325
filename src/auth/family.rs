//! Generating a family share code so another user can join the same ledger.

use crate::{BudgetClient, Error, client::Auth, endpoints};

impl BudgetClient {
    /// Ask the server for a new family code.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without sending anything if there is no
    /// token, [Error::Api] with the server's message (or "生成家庭码失败") on
    /// failure, or [Error::MalformedResponse] if `data` is not a string.
    pub async fn generate_family_code(&self) -> Result<String, Error> {
        let code: String = self
            .get(endpoints::GENERATE_FAMILY_CODE, Auth::Bearer)
            .await?
            .into_typed("生成家庭码失败")?;
        tracing::info!("generated a family code");

        Ok(code)
    }
}
