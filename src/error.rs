//! Defines the crate level error type.

/// The errors that may occur when talking to the bookkeeping server.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An endpoint that requires a bearer token was called before logging in.
    ///
    /// No request is sent when this error is returned.
    #[error("not logged in, please log in first")]
    NotLoggedIn,

    /// The request could not be sent or the response could not be read.
    ///
    /// The string is the underlying transport error.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server replied with something other than a well formed envelope,
    /// or the envelope's `data` did not have the expected shape.
    #[error("response format is incorrect: {0}")]
    MalformedResponse(String),

    /// The server replied with a non-200 envelope code.
    ///
    /// `message` is the server supplied message, or a fallback message for
    /// the operation when the server did not supply one.
    #[error("{message} (code {code})")]
    Api {
        /// The envelope code.
        code: i64,
        /// The message to show to the user.
        message: String,
    },

    /// A request body could not be serialized.
    #[error("could not serialize request: {0}")]
    Serialization(String),

    /// A month string was not in the `yyyy-MM` format.
    #[error("invalid month \"{0}\", expected yyyy-MM")]
    InvalidMonth(String),

    /// A date or date-time string could not be parsed.
    #[error("invalid date \"{0}\"")]
    InvalidDate(String),

    /// The transaction filter name did not match any known filter.
    #[error("unknown transaction filter \"{0}\"")]
    InvalidFilter(String),

    /// The transaction type did not match `expense`, `income` or `transfer`.
    #[error("unknown transaction type \"{0}\"")]
    InvalidTransactionType(String),

    /// The amount of a new transaction was not a positive, finite number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The saved session could not be read, written or removed.
    #[error("session error: {0}")]
    Session(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        tracing::error!("HTTP transport error: {error}");
        Error::Network(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::MalformedResponse(error.to_string())
    }
}
