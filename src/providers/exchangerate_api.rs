use super::util::with_retry;
use super::{numeric_rates, parse_quote_date};
use crate::rate_provider::{RateProvider, RateSheet};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";

/// Bulk provider: one GET returns every rate for the base currency under a
/// top-level `rates` object.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    rates: Option<HashMap<String, Value>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &'static str {
        "ExchangeRate-API"
    }

    #[instrument(name = "ExchangeRateApiFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateSheet> {
        let url = format!("{}/v4/latest/{}", self.base_url, base);
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
        let data: LatestRatesResponse = serde_json::from_str(&text)
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
