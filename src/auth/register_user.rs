//! Registering a new user.

use serde::Serialize;

use crate::{BudgetClient, Error, client::Auth, endpoints};

/// The body of a registration request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    /// The ID the user will log in with.
    pub id: String,
    /// The display name.
    pub username: String,
    /// The password in plain text.
    pub password: String,
}

impl BudgetClient {
    /// Register a new user. Registering does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] with the server's message (or "注册失败") if the
    /// server rejects the registration, e.g. because the ID is taken.
    pub async fn register(&self, id: &str, username: &str, password: &str) -> Result<(), Error> {
        let request = RegisterRequest {
            id: id.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
        };

        self.post(endpoints::REGISTER, &request, Auth::None)
            .await?
            .into_data("注册失败")?;
        tracing::info!("registered user {id}");

        Ok(())
    }
}
