//! The income/balance/expense summary shown on the home and list screens.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    BudgetClient, Error,
    client::Auth,
    endpoints,
    transaction::{MonthTotals, SummaryFilter},
};

/// Totals for the selected month and filter. Missing, `null` and
/// non-numeric fields decode as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HomeSummary {
    /// Total income.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub income: f64,
    /// Income minus expense, as computed by the server.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub balance: f64,
    /// Total expense.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub expense: f64,
}

// The server sums with SQL, so an empty month comes back as `null`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .unwrap_or_default())
}

impl From<MonthTotals> for HomeSummary {
    fn from(totals: MonthTotals) -> Self {
        Self {
            income: totals.income,
            balance: totals.balance,
            expense: totals.expense,
        }
    }
}

impl BudgetClient {
    /// Fetch the summary for `filter`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without sending anything if there is no
    /// token, [Error::Api] if the server reports a failure, or
    /// [Error::MalformedResponse] if `data` is not an object.
    pub async fn home_summary(&self, filter: &SummaryFilter) -> Result<HomeSummary, Error> {
        let summary: HomeSummary = self
            .post(endpoints::HOME_SUMMARY, filter, Auth::Bearer)
            .await?
            .into_typed("获取月度统计失败")?;
        tracing::debug!(
            "summary for {}: income={}, balance={}, expense={}",
            filter.query_month,
            summary.income,
            summary.balance,
            summary.expense
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::HeaderMap, routing::post};
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        BudgetClient, Error,
        test_utils::{has_test_token, ok, spawn_server_logged_in, unauthorized},
        transaction::{MonthTotals, QueryMonth, SummaryFilter, TransactionFilter},
    };

    use super::HomeSummary;

    fn filter() -> SummaryFilter {
        SummaryFilter::new(
            TransactionFilter::All,
            QueryMonth::containing(date!(2025 - 03 - 06)),
        )
    }

    #[tokio::test]
    async fn posts_filter_and_decodes_summary() {
        let router = Router::new().route(
            "/api/transactions/home-summary",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if !has_test_token(&headers) {
                    return Json(unauthorized());
                }
                assert_eq!(
                    body,
                    json!({"type": "", "category": "", "queryType": 2, "queryMonth": "2025-03"})
                );
                Json(ok(json!({"income": 8750.0, "balance": 8541.0, "expense": 209})))
            }),
        );
        let client = spawn_server_logged_in(router).await;

        let got = client.home_summary(&filter()).await.unwrap();

        assert_eq!(
            got,
            HomeSummary {
                income: 8750.0,
                balance: 8541.0,
                expense: 209.0
            }
        );
    }

    #[tokio::test]
    async fn missing_fields_are_zero() {
        let router = Router::new().route(
            "/api/transactions/home-summary",
            post(|| async { Json(ok(json!({"income": 12.5}))) }),
        );
        let client = spawn_server_logged_in(router).await;

        let got = client.home_summary(&filter()).await.unwrap();

        assert_eq!(
            got,
            HomeSummary {
                income: 12.5,
                balance: 0.0,
                expense: 0.0
            }
        );
    }

    #[tokio::test]
    async fn null_and_non_numeric_fields_are_zero() {
        let router = Router::new().route(
            "/api/transactions/home-summary",
            post(|| async {
                Json(ok(json!({"income": null, "balance": -35.0, "expense": "n/a"})))
            }),
        );
        let client = spawn_server_logged_in(router).await;

        let got = client.home_summary(&filter()).await;

        assert_eq!(
            got,
            Ok(HomeSummary {
                income: 0.0,
                balance: -35.0,
                expense: 0.0
            })
        );
    }

    #[tokio::test]
    async fn null_data_is_malformed() {
        let router = Router::new().route(
            "/api/transactions/home-summary",
            post(|| async { Json(ok(Value::Null)) }),
        );
        let client = spawn_server_logged_in(router).await;

        let got = client.home_summary(&filter()).await;

        assert!(matches!(got, Err(Error::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn requires_login() {
        let client = BudgetClient::new("http://127.0.0.1:9/api").unwrap();

        assert_eq!(client.home_summary(&filter()).await, Err(Error::NotLoggedIn));
    }

    #[test]
    fn converts_local_totals() {
        let totals = MonthTotals {
            income: 10.0,
            expense: 4.0,
            balance: 6.0,
        };

        assert_eq!(
            HomeSummary::from(totals),
            HomeSummary {
                income: 10.0,
                balance: 6.0,
                expense: 4.0
            }
        );
    }
}
