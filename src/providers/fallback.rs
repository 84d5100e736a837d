use crate::cache::RateCache;
use crate::rate_provider::{ConvertError, RateProvider, RateSheet};
use anyhow::anyhow;
use tracing::{debug, info, warn};

/// Tries providers in declared priority order, stopping at the first
/// success. Per-provider failures are logged and recorded; only the
/// aggregate failure carrying the last underlying error is surfaced.
pub struct FallbackRateProvider {
    providers: Vec<Box<dyn RateProvider>>,
    cache: RateCache,
}

impl FallbackRateProvider {
    pub fn new(providers: Vec<Box<dyn RateProvider>>, cache: RateCache) -> Self {
        FallbackRateProvider { providers, cache }
    }

    pub async fn fetch_rates(&self, base: &str) -> Result<RateSheet, ConvertError> {
        if let Some(sheet) = self.cache.get(base).await {
            return Ok(sheet);
        }

        let mut last_failure: Option<(&'static str, anyhow::Error)> = None;
        for provider in &self.providers {
            debug!(provider = provider.name(), %base, "Trying rate provider");
            match provider.fetch_rates(base).await {
                Ok(sheet) => {
                    info!(
                        provider = provider.name(),
                        %base,
                        rates = sheet.len(),
                        "Fetched exchange rates"
                    );
                    self.cache.put(sheet.clone()).await;
                    return Ok(sheet);
                }
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "Rate provider failed");
                    last_failure = Some((provider.name(), err));
                }
            }
        }

        let (provider, source) = last_failure
            .unwrap_or_else(|| ("none", anyhow!("No rate providers configured")));
        Err(ConvertError::AllProvidersFailed { provider, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::exchangerate_api::ExchangeRateApiProvider;
    use crate::providers::fawaz::FawazProvider;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn bulk_server(base: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v4/latest/{base}")))
            .respond_with(response)
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn bulk_provider(server: &MockServer) -> Box<dyn RateProvider> {
        Box::new(ExchangeRateApiProvider::new(
            &server.uri(),
            reqwest::Client::new(),
        ))
    }

    fn cache() -> RateCache {
        RateCache::new(Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_falls_back_to_second_provider_on_http_500() {
        let failing = bulk_server("USD", ResponseTemplate::new(500)).await;
        let healthy = bulk_server(
            "USD",
            ResponseTemplate::new(200).set_body_string(r#"{"rates": {"EUR": 0.92}}"#),
        )
        .await;

        let chain = FallbackRateProvider::new(
            vec![bulk_provider(&failing), bulk_provider(&healthy)],
            cache(),
        );

        let sheet = chain.fetch_rates("USD").await.unwrap();
        assert_eq!(sheet.rate_for("EUR").unwrap(), 0.92);
        assert_eq!(sheet.provider, "ExchangeRate-API");
        assert_eq!(failing.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_both_bulk_providers_down_reaches_single_pair_provider() {
        let failing_one = bulk_server("USD", ResponseTemplate::new(500)).await;
        let failing_two = bulk_server("USD", ResponseTemplate::new(502)).await;

        let pair_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/currencies/usd/eur.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"eur": 0.92}"#))
            .mount(&pair_server)
            .await;

        let chain = FallbackRateProvider::new(
            vec![
                bulk_provider(&failing_one),
                bulk_provider(&failing_two),
                Box::new(FawazProvider::new(&pair_server.uri(), reqwest::Client::new())),
            ],
            cache(),
        );

        let sheet = chain.fetch_rates("USD").await.unwrap();
        assert_eq!(sheet.provider, "Fawaz Exchange API");
        assert_eq!(sheet.rate_for("EUR").unwrap(), 0.92);
    }

    #[tokio::test]
    async fn test_all_providers_failing_surfaces_last_error() {
        let failing_one = bulk_server("USD", ResponseTemplate::new(500)).await;
        let failing_two = bulk_server("USD", ResponseTemplate::new(404)).await;

        let chain = FallbackRateProvider::new(
            vec![bulk_provider(&failing_one), bulk_provider(&failing_two)],
            cache(),
        );

        let err = chain.fetch_rates("USD").await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("All rate providers failed."));
        assert!(message.contains("ExchangeRate-API"));
        assert!(message.contains("404"), "should carry the last failure: {message}");
    }

    #[tokio::test]
    async fn test_successful_sheet_is_cached() {
        let server = bulk_server(
            "USD",
            ResponseTemplate::new(200).set_body_string(r#"{"rates": {"EUR": 0.92}}"#),
        )
        .await;

        let chain = FallbackRateProvider::new(vec![bulk_provider(&server)], cache());

        chain.fetch_rates("USD").await.unwrap();
        chain.fetch_rates("USD").await.unwrap();
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
