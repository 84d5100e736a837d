//! The currencies command: table of the supported currency set.

use crate::currency;
use crate::ui;
use comfy_table::Cell;

pub fn display_as_table() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Flag"),
    ]);

    for currency in currency::SUPPORTED {
        table.add_row(vec![
            Cell::new(currency.code),
            Cell::new(currency.name),
            Cell::new(currency.flag),
        ]);
    }

    table.to_string()
}

pub fn run() {
    println!("{}", display_as_table());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_supported_currency() {
        let rendered = display_as_table();
        for currency in currency::SUPPORTED {
            assert!(rendered.contains(currency.code));
            assert!(rendered.contains(currency.name));
        }
    }
}
