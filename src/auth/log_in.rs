//! Logging in with a user ID and password.

use serde::{Deserialize, Serialize};

use crate::{
    BudgetClient, Error,
    auth::AuthToken,
    client::Auth,
    endpoints,
};

/// The body of a log in request.
///
/// The server looks users up by `username`, which the app always fills with
/// the user ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogInRequest {
    /// The user's ID.
    pub id: String,
    /// Same as `id`.
    pub username: String,
    /// The user's password in plain text, sent over the wire as-is.
    pub password: String,
}

impl LogInRequest {
    /// Build a request for `id`.
    pub fn new(id: &str, password: &str) -> Self {
        Self {
            id: id.to_owned(),
            username: id.to_owned(),
            password: password.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LogInData {
    token: String,
}

impl BudgetClient {
    /// Log in and keep the returned bearer token for later requests.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] with the server's message (or "登录失败") if
    /// the credentials are rejected, [Error::MalformedResponse] if the
    /// response has no `data.token`, or [Error::Network] if the request could
    /// not be sent. The stored token is left untouched on failure.
    pub async fn login(&self, id: &str, password: &str) -> Result<AuthToken, Error> {
        let envelope = self
            .post(endpoints::LOG_IN, &LogInRequest::new(id, password), Auth::None)
            .await?;
        let data: LogInData = envelope.into_typed("登录失败")?;

        let token = AuthToken::new(&data.token);
        self.set_token(token.clone());
        tracing::info!("logged in as {id}");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, routing::post};
    use serde_json::{Value, json};

    use crate::{
        Error,
        auth::AuthToken,
        test_utils::{capture_logs, failure, ok, spawn_server},
    };

    #[tokio::test]
    async fn login_stores_prefixed_token() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(
                    body,
                    json!({"id": "mengmeng", "username": "mengmeng", "password": "hunter2"})
                );
                Json(ok(json!({"token": "abc.def"})))
            }),
        );
        let client = spawn_server(router).await;

        let token = client.login("mengmeng", "hunter2").await.unwrap();

        assert_eq!(token.as_header_value(), "Bearer abc.def");
        assert_eq!(client.token(), Some(AuthToken::new("abc.def")));
        assert!(client.is_logged_in());
    }

    #[tokio::test]
    async fn login_does_not_log_token_or_password() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(ok(json!({"token": "SECRETTOKENVALUE123"}))) }),
        );
        let client = spawn_server(router).await;
        let (logs, _guard) = capture_logs();

        client.login("mengmeng", "hunter2").await.unwrap();

        let logs = logs.contents();
        assert!(logs.contains("Received response"), "nothing captured: {logs}");
        assert!(!logs.contains("SECRETTOKENVALUE123"), "token in logs: {logs}");
        assert!(!logs.contains("hunter2"), "password in logs: {logs}");
    }

    #[tokio::test]
    async fn login_keeps_existing_bearer_prefix() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(ok(json!({"token": "Bearer xyz"}))) }),
        );
        let client = spawn_server(router).await;

        client.login("mengmeng", "hunter2").await.unwrap();

        assert_eq!(
            client.token().unwrap().as_header_value(),
            "Bearer xyz"
        );
    }

    #[tokio::test]
    async fn rejected_login_surfaces_message() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(failure(400, "密码错误")) }),
        );
        let client = spawn_server(router).await;

        let got = client.login("mengmeng", "wrong").await;

        assert_eq!(
            got,
            Err(Error::Api {
                code: 400,
                message: "密码错误".to_owned()
            })
        );
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn rejected_login_without_message_uses_fallback() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(json!({"code": 500})) }),
        );
        let client = spawn_server(router).await;

        let got = client.login("mengmeng", "hunter2").await;

        assert_eq!(
            got,
            Err(Error::Api {
                code: 500,
                message: "登录失败".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn success_without_token_is_malformed() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async { Json(ok(json!({}))) }),
        );
        let client = spawn_server(router).await;

        let got = client.login("mengmeng", "hunter2").await;

        assert!(matches!(got, Err(Error::MalformedResponse(_))));
        assert!(!client.is_logged_in());
    }
}
