//! The `{code, message, data}` wrapper the server puts around every response.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Error;

/// The envelope code the server uses for success.
pub const SUCCESS_CODE: i64 = 200;

/// A decoded response envelope.
///
/// The envelope `code` decides success, not the HTTP status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// `200` on success, anything else is a failure.
    pub code: i64,
    /// A human readable message, usually only present on failure.
    #[serde(default)]
    pub message: Option<String>,
    /// The payload. `null` and absent are treated the same.
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns [Error::MalformedResponse] if `body` is not a JSON object with
    /// an integer `code`.
    pub fn parse(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(|error| {
            tracing::error!("could not parse response envelope: {error}");
            Error::MalformedResponse(error.to_string())
        })
    }

    /// Check the code and return the (possibly absent) payload.
    ///
    /// `fallback_message` is used when the server reports a failure without a
    /// message.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] if `code` is not [SUCCESS_CODE].
    pub fn into_data(self, fallback_message: &str) -> Result<Option<Value>, Error> {
        if self.code == SUCCESS_CODE {
            return Ok(self.data);
        }

        let message = self
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback_message.to_owned());
        tracing::warn!("server returned code {}: {message}", self.code);

        Err(Error::Api {
            code: self.code,
            message,
        })
    }

    /// Check the code and decode the payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] if `code` is not [SUCCESS_CODE], or
    /// [Error::MalformedResponse] if the payload is missing or has the wrong
    /// shape.
    pub fn into_typed<T: DeserializeOwned>(self, fallback_message: &str) -> Result<T, Error> {
        let data = self
            .into_data(fallback_message)?
            .ok_or_else(|| Error::MalformedResponse("missing data".to_owned()))?;

        serde_json::from_value(data).map_err(|error| {
            tracing::error!("could not decode response data: {error}");
            Error::MalformedResponse(error.to_string())
        })
    }
}
