//! Blocking HTTP implementation of [`TradingApi`].
//!
//! Runs on the TUI's worker thread, so blocking I/O is fine. Errors
//! map onto [`ApiError`] with the backend's JSON `detail` field
//! extracted when present.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{
    ApiError, BacktestOutcome, BacktestRequest, NewStrategy, NewTrade, ScreenOutcome,
    ScreenRequest, TradePatch, TradingApi,
};
use crate::config::Config;
use crate::domain::{ScreenResult, Strategy, Trade};

/// FastAPI error envelope.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct HttpApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tradedesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
        what: &str,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(e.to_string())
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Pull the backend's detail message out before the body is gone.
        let detail = response
            .json::<ErrorBody>()
            .map(|body| body.detail)
            .unwrap_or_else(|_| status.to_string());

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound { what: what.into() });
        }
        Err(ApiError::Status {
            code: status.as_u16(),
            detail,
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(&url).query(query), what)?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.send(self.client.post(&url).json(body), what)?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let response = self.send(self.client.put(&url).json(body), what)?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TradingApi for HttpApi {
    fn list_trades(&self, open_only: bool) -> Result<Vec<Trade>, ApiError> {
        self.get_json(
            "/journal/",
            &[("open_only", open_only.to_string())],
            "journal",
        )
    }

    fn list_screens(&self) -> Result<Vec<ScreenResult>, ApiError> {
        self.get_json("/screen/", &[], "screenings")
    }

    fn list_strategies(&self) -> Result<Vec<Strategy>, ApiError> {
        self.get_json("/strategies/", &[], "strategies")
    }

    fn create_trade(&self, trade: &NewTrade) -> Result<Trade, ApiError> {
        self.post_json("/journal/", trade, "journal")
    }

    fn update_trade(&self, id: i64, patch: &TradePatch) -> Result<Trade, ApiError> {
        self.put_json(&format!("/journal/{id}"), patch, "trade")
    }

    fn delete_trade(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/journal/{id}"));
        tracing::debug!(%url, "DELETE");
        self.send(self.client.delete(&url), "trade")?;
        Ok(())
    }

    fn run_screen(&self, request: &ScreenRequest) -> Result<ScreenOutcome, ApiError> {
        self.post_json("/screen/", request, "screening")
    }

    fn create_strategy(&self, strategy: &NewStrategy) -> Result<Strategy, ApiError> {
        self.post_json("/strategies/", strategy, "strategies")
    }

    fn run_backtest(&self, request: &BacktestRequest) -> Result<BacktestOutcome, ApiError> {
        self.post_json("/backtest/", request, "backtest")
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = Config {
            base_url: "http://127.0.0.1:8000/".into(),
            ..Config::default()
        };
        let api = HttpApi::new(&config).unwrap();
        assert_eq!(api.url("/journal/"), "http://127.0.0.1:8000/journal/");
    }

    #[test]
    fn error_body_parses_fastapi_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Trade mit ID 9 nicht gefunden"}"#).unwrap();
        assert!(body.detail.contains("ID 9"));
    }
}
