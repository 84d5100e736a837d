//! The rates command: table of every available rate for a base currency.

use crate::currency;
use crate::providers::fallback::FallbackRateProvider;
use crate::rate_provider::{ConvertError, RateSheet};
use crate::ui;
use anyhow::Result;
use comfy_table::Cell;

pub fn display_as_table(sheet: &RateSheet) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (1 {})", sheet.base)),
    ]);

    let mut rows: Vec<_> = sheet.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    for (code, rate) in rows {
        // Sheets only carry supported codes, so the lookup cannot miss.
        let name = currency::lookup(code).map_or("", |c| c.name);
        table.add_row(vec![Cell::new(code), Cell::new(name), ui::rate_cell(rate)]);
    }

    let mut footer = format!("Source: {}", sheet.provider);
    if let Some(date) = sheet.as_of {
        footer.push_str(&format!(", {date}"));
    }

    format!(
        "{}\n\n{}\n{}",
        ui::style_text(&format!("Exchange rates for {}", sheet.base), ui::StyleType::Title),
        table,
        ui::style_text(&footer, ui::StyleType::Subtle)
    )
}

pub async fn run(chain: &FallbackRateProvider, base: &str) -> Result<()> {
    let base = currency::lookup(base.trim())
        .ok_or_else(|| ConvertError::UnknownCurrency(base.trim().to_string()))?;

    let spinner = ui::new_spinner("Fetching exchange rates...");
    let outcome = chain.fetch_rates(base.code).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(sheet) => {
            println!("{}", display_as_table(&sheet));
            Ok(())
        }
        Err(err) => {
            println!(
                "{}",
                ui::style_text(&format!("Error: {err}"), ui::StyleType::Error)
            );
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_rates_sorted_by_code() {
        let sheet = RateSheet::new(
            "USD",
            "ExchangeRate-API",
            chrono::NaiveDate::from_ymd_opt(2026, 8, 28),
            vec![("INR".to_string(), 83.1), ("EUR".to_string(), 0.92)],
        );

        let rendered = console::strip_ansi_codes(&display_as_table(&sheet)).to_string();
        assert!(rendered.contains("Exchange rates for USD"));
        assert!(rendered.contains("Euro"));
        assert!(rendered.contains("83.1000"));
        assert!(rendered.contains("Source: ExchangeRate-API, 2026-08-28"));
        let eur = rendered.find("EUR").unwrap();
        let inr = rendered.find("INR").unwrap();
        assert!(eur < inr);
    }
}
