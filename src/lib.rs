pub mod cache;
pub mod config;
pub mod convert;
pub mod currencies;
pub mod currency;
pub mod log;
pub mod providers;
pub mod rate_provider;
pub mod rates;
pub mod ui;

use crate::cache::RateCache;
use crate::config::AppConfig;
use crate::providers::exchange_host::ExchangeHostProvider;
use crate::providers::exchangerate_api::ExchangeRateApiProvider;
use crate::providers::fallback::FallbackRateProvider;
use crate::providers::fawaz::FawazProvider;
use crate::rate_provider::RateProvider;
use anyhow::{Result, bail};
use std::time::Duration;
use tracing::debug;

pub enum AppCommand {
    Convert {
        amount: f64,
        from: Option<String>,
        to: Option<String>,
    },
    Rates {
        base: Option<String>,
    },
    Currencies,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Currencies => {
            currencies::run();
            Ok(())
        }
        AppCommand::Convert { amount, from, to } => {
            let chain = build_provider_chain(&config)?;
            let from = from.unwrap_or_else(|| config.base.clone());
            let to = to.unwrap_or_else(|| config.target.clone());
            convert::run(&chain, amount, &from, &to).await
        }
        AppCommand::Rates { base } => {
            let chain = build_provider_chain(&config)?;
            let base = base.unwrap_or_else(|| config.base.clone());
            rates::run(&chain, &base).await
        }
    }
}

/// Wires the configured providers into a fallback chain, in priority
/// order, sharing one HTTP client so the request timeout applies
/// everywhere.
fn build_provider_chain(config: &AppConfig) -> Result<FallbackRateProvider> {
    let client = reqwest::Client::builder()
        .user_agent("kurs/0.1")
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    let mut chain: Vec<Box<dyn RateProvider>> = Vec::new();
    if let Some(p) = &config.providers.exchangerate_api {
        chain.push(Box::new(ExchangeRateApiProvider::new(
            &p.base_url,
            client.clone(),
        )));
    }
    if let Some(p) = &config.providers.exchange_host {
        chain.push(Box::new(ExchangeHostProvider::new(
            &p.base_url,
            client.clone(),
        )));
    }
    if let Some(p) = &config.providers.fawaz {
        chain.push(Box::new(FawazProvider::new(&p.base_url, client)));
    }
    if chain.is_empty() {
        bail!("No rate providers configured");
    }

    let cache = RateCache::new(Duration::from_secs(config.rate_ttl_secs));
    Ok(FallbackRateProvider::new(chain, cache))
}
