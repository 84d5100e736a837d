use super::parse_quote_date;
use crate::currency;
use crate::rate_provider::{RateProvider, RateSheet};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest";

/// Single-pair provider: the API quotes one base/target pair per request,
/// so rates for a base are assembled from parallel per-pair fetches. An
/// individual pair failing drops that currency only.
pub struct FawazProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FawazProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        FawazProvider {
            base_url: base_url.to_string(),
            client,
        }
    }

    async fn fetch_pair(&self, base: &str, target: &str) -> Result<(f64, Option<NaiveDate>)> {
        let url = format!(
            "{}/v1/currencies/{}/{}.json",
            self.base_url,
            base.to_ascii_lowercase(),
            target.to_ascii_lowercase()
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for pair {}/{}",
                response.status(),
                base,
                target
            ));
        }

        let data: Value = response.json().await?;
        let rate = data
            .get(target.to_ascii_lowercase())
            .and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("No numeric rate for pair {}/{}", base, target))?;
        let as_of = data
            .get("date")
            .and_then(Value::as_str)
            .and_then(parse_quote_date);

        Ok((rate, as_of))
    }
}

#[async_trait]
impl RateProvider for FawazProvider {
    fn name(&self) -> &'static str {
        "Fawaz Exchange API"
    }

    #[instrument(name = "FawazFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateSheet> {
        let fetches = currency::SUPPORTED
            .iter()
            .filter(|c| c.code != base)
            .map(|c| async move { (c.code, self.fetch_pair(base, c.code).await) });

        // All pairs settle before aggregation; one failure never cancels
        // its siblings.
        let results = join_all(fetches).await;

        let mut rates = Vec::new();
        let mut as_of = None;
        for (code, result) in results {
            match result {
                Ok((rate, date)) => {
                    rates.push((code.to_string(), rate));
                    as_of = as_of.or(date);
                }
                Err(err) => debug!(%code, error = %err, "Dropping failed pair"),
            }
        }

        let sheet = RateSheet::new(base, self.name(), as_of, rates);
        if sheet.is_empty() {
            return Err(anyhow!("No valid exchange rates found for {}", base));
        }
        Ok(sheet)
    }
}
