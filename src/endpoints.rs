//! The server API endpoint paths.
//!
//! Paths are relative to the configured base URL, which already ends in `/api`.

/// The route for registering a new user.
pub const REGISTER: &str = "/auth/register";
/// The route for logging in and receiving a bearer token.
pub const LOG_IN: &str = "/auth/login";
/// The route for generating a family share code.
pub const GENERATE_FAMILY_CODE: &str = "/auth/generate-family";
/// The route for the income/balance/expense summary.
pub const HOME_SUMMARY: &str = "/transactions/home-summary";
/// The route for the most recent transactions.
///
/// The misspelling is the server's actual route.
pub const HOME_RECENT: &str = "/transactions/home-rencent";
/// The route for paging through all transactions.
pub const HOME_ALL: &str = "/transactions/home-all";
/// The route for creating a transaction.
pub const ADD_TRANSACTION: &str = "/transactions/add";

/// The base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Join `base_url` and `endpoint`, tolerating a trailing slash on the base.
pub fn join(base_url: &str, endpoint: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint)
}
