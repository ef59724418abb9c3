// Country Table Generator - Core Library
// CLDR archive → country code, name and current tender currencies → generated Rust table

pub mod error;
pub mod config;
pub mod cldr;       // Archive decoding (zip or unpacked directory)
pub mod territory;  // Territory Extractor
pub mod currency;   // Currency Associator
pub mod anomaly;    // Anomaly Reporter
pub mod codegen;    // Dataset Serializer
pub mod pipeline;

// Re-export commonly used types
pub use error::{GenError, Result};
pub use config::GeneratorConfig;
pub use cldr::{
    ArchiveInfo, CldrDecoder, Dataset, DraftLevel,
    RawCurrency, RawCurrencyRegion, RawTerritory,
};
pub use territory::{
    CountryRecord, CountryTable, ExclusionReason,
    exclusion_reason, extract_countries,
};
pub use currency::associate_currencies;
pub use anomaly::{Anomaly, find_anomalies};
pub use codegen::{REMOVED_CODES, render_countries, write_artifact};
pub use pipeline::{GenerationSummary, build_table, generate, run};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
