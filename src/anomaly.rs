// 🔎 Anomaly Reporter
// Countries with no currency or with several are worth a human look,
// but neither case stops the generation.

use crate::territory::CountryTable;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anomaly {
    /// No current tender currency found
    NoCurrencies { code: String },

    /// More than one current tender currency (possibly the same one twice)
    MultipleCurrencies { code: String, currencies: Vec<String> },
}

impl Anomaly {
    pub fn code(&self) -> &str {
        match self {
            Anomaly::NoCurrencies { code } => code,
            Anomaly::MultipleCurrencies { code, .. } => code,
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::NoCurrencies { code } => write!(f, "{}: no currencies", code),
            Anomaly::MultipleCurrencies { code, currencies } => {
                write!(f, "{}.Currencies: [{}]", code, currencies.join(" "))
            }
        }
    }
}

/// Inspect every country, returning anomalies ordered by country code
pub fn find_anomalies(countries: &CountryTable) -> Vec<Anomaly> {
    let mut anomalies: Vec<Anomaly> = countries
        .values()
        .filter_map(|country| match country.currencies.len() {
            1 => None,
            0 => Some(Anomaly::NoCurrencies {
                code: country.code.clone(),
            }),
            _ => Some(Anomaly::MultipleCurrencies {
                code: country.code.clone(),
                currencies: country.currencies.clone(),
            }),
        })
        .collect();

    anomalies.sort_by(|a, b| a.code().cmp(b.code()));
    anomalies
}
