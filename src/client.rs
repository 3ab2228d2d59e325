//! The HTTP client for the bookkeeping server.
//!
//! [BudgetClient] owns the connection pool and the bearer token. Each
//! endpoint is a method defined next to the types it sends and receives,
//! e.g. [BudgetClient::login] lives in the `auth` module.

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::{
    Error,
    auth::{AuthToken, TokenSlot},
    config::ServerConfig,
    endpoints,
    envelope::Envelope,
    logging::{log_request, log_response, redact_json_field},
};

/// A client for the bookkeeping server's REST API.
///
/// Cloning is cheap and clones share both the connection pool and the token.
#[derive(Debug, Clone)]
pub struct BudgetClient {
    http: reqwest::Client,
    base_url: String,
    token: TokenSlot,
}

impl BudgetClient {
    /// Create a client for the API at `base_url`, e.g. `http://localhost:8080/api`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Config] if the HTTP client could not be built.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::from_config(&ServerConfig {
            base_url: base_url.to_owned(),
            timeout_secs: None,
        })
    }

    /// Create a client from the `[server]` section of the config.
    ///
    /// # Errors
    ///
    /// Returns [Error::Config] if the HTTP client could not be built.
    pub fn from_config(config: &ServerConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|error| Error::Config(format!("could not build HTTP client: {error}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: TokenSlot::default(),
        })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<AuthToken> {
        self.token.get()
    }

    /// Use `token` for subsequent authenticated requests, e.g. one restored
    /// from a saved session.
    pub fn set_token(&self, token: AuthToken) {
        self.token.set(token);
    }

    /// Forget the bearer token.
    pub fn clear_token(&self) {
        self.token.clear();
    }

    /// Whether a non-empty bearer token is held.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_logged_in()
    }

    fn bearer(&self) -> Result<AuthToken, Error> {
        match self.token.get() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => {
                tracing::warn!("refusing to call an authenticated endpoint without a token");
                Err(Error::NotLoggedIn)
            }
        }
    }

    fn request(&self, method: Method, endpoint: &str, auth: Auth) -> Result<RequestBuilder, Error> {
        let url = endpoints::join(&self.base_url, endpoint);
        let request = self.http.request(method, url);

        match auth {
            Auth::Bearer => {
                let token = self.bearer()?;
                tracing::debug!("using token {token}");
                Ok(request.header(reqwest::header::AUTHORIZATION, token.as_header_value()))
            }
            Auth::None => Ok(request),
        }
    }

    /// Send a `GET` request and parse the response envelope.
    pub(crate) async fn get(&self, endpoint: &str, auth: Auth) -> Result<Envelope, Error> {
        let request = self.request(Method::GET, endpoint, auth)?;
        log_request("GET", &endpoints::join(&self.base_url, endpoint), "");

        self.send(request).await
    }

    /// Send a `POST` request with a JSON body and parse the response envelope.
    ///
    /// Any `password` field is redacted before the body is logged.
    pub(crate) async fn post<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        auth: Auth,
    ) -> Result<Envelope, Error> {
        let request = self.request(Method::POST, endpoint, auth)?;
        let body =
            serde_json::to_value(body).map_err(|error| Error::Serialization(error.to_string()))?;
        log_request(
            "POST",
            &endpoints::join(&self.base_url, endpoint),
            &redact_json_field(&body, "password").to_string(),
        );

        self.send(request.json::<Value>(&body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Envelope, Error> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        log_response(status.as_u16(), &body);

        Envelope::parse(&body)
    }
}

/// Whether a request carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// Send the `Authorization` header, failing with [Error::NotLoggedIn] if
    /// there is no token.
    Bearer,
    /// Send no credentials.
    None,
}
