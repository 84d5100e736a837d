//! Supported currency table and code normalization.

/// A currency the converter knows about. The set is fixed for the process
/// lifetime; providers may quote more codes but those are dropped during
/// rate-sheet validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

pub const SUPPORTED: &[Currency] = &[
    Currency { code: "USD", name: "US Dollar", flag: "\u{1F1FA}\u{1F1F8}" },
    Currency { code: "EUR", name: "Euro", flag: "\u{1F1EA}\u{1F1FA}" },
    Currency { code: "GBP", name: "British Pound", flag: "\u{1F1EC}\u{1F1E7}" },
    Currency { code: "INR", name: "Indian Rupee", flag: "\u{1F1EE}\u{1F1F3}" },
    Currency { code: "JPY", name: "Japanese Yen", flag: "\u{1F1EF}\u{1F1F5}" },
    Currency { code: "AUD", name: "Australian Dollar", flag: "\u{1F1E6}\u{1F1FA}" },
    Currency { code: "CAD", name: "Canadian Dollar", flag: "\u{1F1E8}\u{1F1E6}" },
    Currency { code: "CHF", name: "Swiss Franc", flag: "\u{1F1E8}\u{1F1ED}" },
    Currency { code: "CNY", name: "Chinese Yuan", flag: "\u{1F1E8}\u{1F1F3}" },
    Currency { code: "SEK", name: "Swedish Krona", flag: "\u{1F1F8}\u{1F1EA}" },
    Currency { code: "NZD", name: "New Zealand Dollar", flag: "\u{1F1F3}\u{1F1FF}" },
    Currency { code: "MXN", name: "Mexican Peso", flag: "\u{1F1F2}\u{1F1FD}" },
    Currency { code: "SGD", name: "Singapore Dollar", flag: "\u{1F1F8}\u{1F1EC}" },
    Currency { code: "HKD", name: "Hong Kong Dollar", flag: "\u{1F1ED}\u{1F1F0}" },
    Currency { code: "NOK", name: "Norwegian Krone", flag: "\u{1F1F3}\u{1F1F4}" },
    Currency { code: "KRW", name: "South Korean Won", flag: "\u{1F1F0}\u{1F1F7}" },
    Currency { code: "TRY", name: "Turkish Lira", flag: "\u{1F1F9}\u{1F1F7}" },
    Currency { code: "RUB", name: "Russian Ruble", flag: "\u{1F1F7}\u{1F1FA}" },
    Currency { code: "BRL", name: "Brazilian Real", flag: "\u{1F1E7}\u{1F1F7}" },
    Currency { code: "ZAR", name: "South African Rand", flag: "\u{1F1FF}\u{1F1E6}" },
];

pub fn lookup(code: &str) -> Option<&'static Currency> {
    SUPPORTED.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}
