use super::util::with_retry;
use super::{numeric_rates, parse_quote_date};
use crate::rate_provider::{RateProvider, RateSheet};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate.host";

/// Bulk provider: same `rates` object shape as ExchangeRate-API but the
/// base currency travels as a query parameter.
pub struct ExchangeHostProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeHostProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeHostProvider {
            base_url: base_url.to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    rates: Option<HashMap<String, Value>>,
}

#[async_trait]
impl RateProvider for ExchangeHostProvider {
    fn name(&self) -> &'static str {
        "ExchangeRate.host"
    }

    #[instrument(name = "ExchangeHostFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateSheet> {
        let url = format!("{}/latest?base={}", self.base_url, base);
        debug!("Requesting rates from {}", url);

        let response = with_retry(|| async { self.client.get(&url).send().await }, 2, 300).await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} from {}",
                response.status(),
                self.name()
            ));
        }

        let text = response.text().await?;
        let data: LatestResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse response from {}: {}", self.name(), e))?;

        let raw = data
            .rates
            .ok_or_else(|| anyhow!("No rates object in response from {}", self.name()))?;
        let as_of = data.date.as_deref().and_then(parse_quote_date);

        let sheet = RateSheet::new(base, self.name(), as_of, numeric_rates(raw));
        if sheet.is_empty() {
            return Err(anyhow!("No usable rates for {} from {}", base, self.name()));
        }
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", base))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(server: &MockServer) -> ExchangeHostProvider {
        ExchangeHostProvider::new(&server.uri(), reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_successful_bulk_fetch() {
        let mock_response = r#"{
            "success": true,
            "base": "EUR",
            "date": "2026-08-28",
            "rates": {"USD": 1.09, "GBP": 0.85}
        }"#;
        let mock_server = create_mock_server(
            "EUR",
            ResponseTemplate::new(200).set_body_string(mock_response),
        )
        .await;

        let sheet = provider(&mock_server).fetch_rates("EUR").await.unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rate_for("USD").unwrap(), 1.09);
        assert!(sheet.rate_for("EUR").is_err());
    }

    #[tokio::test]
    async fn test_server_error_is_provider_failure() {
        let mock_server = create_mock_server("EUR", ResponseTemplate::new(503)).await;

        let err = provider(&mock_server).fetch_rates("EUR").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP error: 503 Service Unavailable from ExchangeRate.host"
        );
    }

    #[tokio::test]
    async fn test_rates_must_be_an_object() {
        let mock_server = create_mock_server(
            "EUR",
            ResponseTemplate::new(200).set_body_string(r#"{"rates": "unavailable"}"#),
        )
        .await;

        let err = provider(&mock_server).fetch_rates("EUR").await.unwrap_err();
        assert!(
            err.to_string()
                .contains("Failed to parse response from ExchangeRate.host")
        );
    }
}
