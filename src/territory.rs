// 🗺️ Territory Extractor
// Keeps only the CLDR territories that are real, current countries

use crate::cldr::RawTerritory;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// COUNTRY RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166 alpha-2 code (plus XK)
    pub code: String,

    /// Display name in the configured locale
    pub name: String,

    /// Current tender currencies, in source order, not deduplicated
    pub currencies: Vec<String>,
}

impl CountryRecord {
    pub fn new(code: &str, name: &str) -> Self {
        CountryRecord {
            code: code.to_string(),
            name: name.to_string(),
            currencies: Vec::new(),
        }
    }
}

/// Records keyed by country code. Iteration order is unspecified.
pub type CountryTable = HashMap<String, CountryRecord>;

// ============================================================================
// EXCLUSION RULES
// ============================================================================

/// Why a territory entry did not become a country, in rule order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// alt="short", alt="variant", ...
    AltVariant,
    /// Continents and other aggregates (001, 150, EU, ...)
    NotTwoLetters,
    /// QM..QZ, including QO (duplicate of UM)
    ReservedQ,
    /// X? user-assigned, except XK (Kosovo)
    UserAssignedX,
    /// ZZ
    Unknown,
}

/// First matching exclusion rule, or `None` if the entry is a country
pub fn exclusion_reason(entry: &RawTerritory) -> Option<ExclusionReason> {
    if entry.alt.as_deref().map_or(false, |alt| !alt.is_empty()) {
        return Some(ExclusionReason::AltVariant);
    }

    let code = entry.code.as_bytes();
    if code.len() != 2 {
        return Some(ExclusionReason::NotTwoLetters);
    }

    if code[0] == b'Q' && code[1] >= b'M' {
        return Some(ExclusionReason::ReservedQ);
    }

    if code[0] == b'X' && code[1] != b'K' {
        return Some(ExclusionReason::UserAssignedX);
    }

    if code == b"ZZ" {
        return Some(ExclusionReason::Unknown);
    }

    None
}

/// Build one record per territory entry surviving every exclusion rule
pub fn extract_countries(territories: &[RawTerritory]) -> CountryTable {
    let mut countries = CountryTable::with_capacity(territories.len());

    for entry in territories {
        if let Some(reason) = exclusion_reason(entry) {
            debug!("{}: skipped ({:?})", entry.code, reason);
            continue;
        }

        countries.insert(
            entry.code.clone(),
            CountryRecord::new(&entry.code, &entry.name),
        );
    }

    countries
}
