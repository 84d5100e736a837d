//! Exchange-rate provider abstraction and the validated rate sheet.

use crate::currency;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

/// Errors surfaced to callers of the conversion core. Provider-internal
/// failures stay `anyhow` inside the fallback chain; only these cross the
/// library boundary.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Unsupported currency code: {0}")]
    UnknownCurrency(String),

    #[error("No exchange rate available for {target}")]
    RateUnavailable { target: String },

    #[error("All rate providers failed. Last error from {provider}: {source}")]
    AllProvidersFailed {
        provider: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// One external rate-quoting API. Implementations return every usable rate
/// for a base currency in a single call; how many HTTP requests that takes
/// is up to the provider.
#[async_trait]
pub trait RateProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_rates(&self, base: &str) -> Result<RateSheet>;
}

/// Validated rates for one base currency: every value is positive and
/// finite, every key is a supported non-base code.
#[derive(Debug, Clone)]
pub struct RateSheet {
    pub base: String,
    pub provider: &'static str,
    pub as_of: Option<NaiveDate>,
    rates: HashMap<String, f64>,
}

impl RateSheet {
    /// Builds a sheet from raw provider output, dropping entries that are
    /// unusable for conversion: non-positive, non-finite, unsupported
    /// codes, and the base currency itself.
    pub fn new(
        base: &str,
        provider: &'static str,
        as_of: Option<NaiveDate>,
        raw: impl IntoIterator<Item = (String, f64)>,
    ) -> Self {
        let rates = raw
            .into_iter()
            .filter_map(|(code, rate)| {
                let code = code.to_ascii_uppercase();
                if code == base || !currency::is_supported(&code) {
                    return None;
                }
                if !rate.is_finite() || rate <= 0.0 {
                    tracing::debug!(%code, rate, "Dropping unusable rate");
                    return None;
                }
                Some((code, rate))
            })
            .collect();

        RateSheet {
            base: base.to_string(),
            provider,
            as_of,
            rates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn rate_for(&self, target: &str) -> Result<f64, ConvertError> {
        self.rates
            .get(target)
            .copied()
            .ok_or_else(|| ConvertError::RateUnavailable {
                target: target.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

/// Applies an exchange rate to an amount.
pub fn convert(amount: f64, rate: f64) -> Result<f64, ConvertError> {
    validate_amount(amount)?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ConvertError::RateUnavailable {
            target: String::new(),
        });
    }
    Ok(amount * rate)
}

pub fn validate_amount(amount: f64) -> Result<(), ConvertError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConvertError::InvalidAmount);
    }
    Ok(())
}
