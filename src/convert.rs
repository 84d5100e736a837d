//! The convert command: validate input, fetch a rate, multiply, render.

use crate::currency::{self, Currency};
use crate::providers::fallback::FallbackRateProvider;
use crate::rate_provider::{self, ConvertError};
use crate::ui;
use anyhow::Result;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Conversion {
    pub amount: f64,
    pub from: &'static Currency,
    pub to: &'static Currency,
    pub rate: f64,
    pub converted: f64,
    /// Provider the rate came from; `None` for the same-currency shortcut.
    pub provider: Option<&'static str>,
    pub as_of: Option<NaiveDate>,
}

impl Conversion {
    pub fn display_panel(&self) -> String {
        let headline = format!(
            "{} {:.2} {}  \u{2192}  {} {} {}",
            self.from.flag,
            self.amount,
            self.from.code,
            self.to.flag,
            ui::style_text(&format!("{:.2}", self.converted), ui::StyleType::Result),
            self.to.code,
        );

        let mut rate_line = format!("1 {} = {:.4} {}", self.from.code, self.rate, self.to.code);
        if let Some(provider) = self.provider {
            match self.as_of {
                Some(date) => rate_line.push_str(&format!(" (via {provider}, {date})")),
                None => rate_line.push_str(&format!(" (via {provider})")),
            }
        }

        format!(
            "{}\n{}",
            headline,
            ui::style_text(&rate_line, ui::StyleType::Subtle)
        )
    }
}

/// Converts `amount` from one currency to another, short-circuiting the
/// same-currency case before any provider is consulted.
pub async fn execute(
    chain: &FallbackRateProvider,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<Conversion, ConvertError> {
    rate_provider::validate_amount(amount)?;
    let from = currency::lookup(from.trim())
        .ok_or_else(|| ConvertError::UnknownCurrency(from.trim().to_string()))?;
    let to = currency::lookup(to.trim())
        .ok_or_else(|| ConvertError::UnknownCurrency(to.trim().to_string()))?;

    if from.code == to.code {
        return Ok(Conversion {
            amount,
            from,
            to,
            rate: 1.0,
            converted: amount,
            provider: None,
            as_of: None,
        });
    }

    let sheet = chain.fetch_rates(from.code).await?;
    let rate = sheet.rate_for(to.code)?;
    let converted = rate_provider::convert(amount, rate)?;

    Ok(Conversion {
        amount,
        from,
        to,
        rate,
        converted,
        provider: Some(sheet.provider),
        as_of: sheet.as_of,
    })
}

pub async fn run(chain: &FallbackRateProvider, amount: f64, from: &str, to: &str) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let outcome = execute(chain, amount, from, to).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(conversion) => {
            println!("{}", conversion.display_panel());
            Ok(())
        }
        Err(err) => {
            println!(
                "{}",
                ui::style_text(&format!("Error: {err}"), ui::StyleType::Error)
            );
            if is_network_error(&err) {
                println!(
                    "{}",
                    ui::style_text(
                        "Check your internet connection and try again.",
                        ui::StyleType::Subtle
                    )
                );
            }
            Err(err.into())
        }
    }
}

/// Connect and timeout failures get a connectivity hint at the
/// presentation boundary; everything else keeps its own message.
fn is_network_error(err: &ConvertError) -> bool {
    let ConvertError::AllProvidersFailed { source, .. } = err else {
        return false;
    };
    source.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .is_some_and(|e| e.is_connect() || e.is_timeout())
    })
}
