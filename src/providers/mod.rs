pub mod exchange_host;
pub mod exchangerate_api;
pub mod fallback;
pub mod fawaz;
pub mod util;

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Extracts the numeric entries from a raw JSON rates object. Non-numeric
/// values are dropped per entry; they must not fail the whole provider.
pub(crate) fn numeric_rates(raw: HashMap<String, Value>) -> impl Iterator<Item = (String, f64)> {
    raw.into_iter().filter_map(|(code, value)| match value.as_f64() {
        Some(rate) => Some((code, rate)),
        None => {
            debug!(%code, "Dropping non-numeric rate value");
            None
        }
    })
}

/// Parses the `date` field providers attach to a quote. Quote dates are
/// informational, so a format we do not recognize is simply discarded.
pub(crate) fn parse_quote_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_rates_drops_non_numbers() {
        let raw: HashMap<String, Value> = [
            ("EUR".to_string(), json!(0.92)),
            ("INR".to_string(), json!("not-a-number")),
            ("JPY".to_string(), json!(null)),
        ]
        .into();

        let rates: HashMap<String, f64> = numeric_rates(raw).collect();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates["EUR"], 0.92);
    }

    #[test]
    fn test_parse_quote_date() {
        assert_eq!(
            parse_quote_date("2026-08-28"),
            NaiveDate::from_ymd_opt(2026, 8, 28)
        );
        assert!(parse_quote_date("28/08/2026").is_none());
    }
}
