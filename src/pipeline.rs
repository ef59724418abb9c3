// 🔄 Generation Pipeline
// decode → extract territories → associate currencies → report anomalies → render + write
//
// Four sequential passes over one in-memory table; the table is only
// mutated by the first two.

use crate::anomaly::{find_anomalies, Anomaly};
use crate::cldr::{CldrDecoder, Dataset};
use crate::codegen::{render_countries, write_artifact};
use crate::config::GeneratorConfig;
use crate::currency::associate_currencies;
use crate::error::{GenError, Result};
use crate::territory::{extract_countries, CountryTable};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub countries: usize,
    pub currencies: usize,
    pub anomalies: Vec<Anomaly>,
    pub output: PathBuf,
}

/// Extraction and association only, no I/O
pub fn build_table(dataset: &Dataset) -> (CountryTable, usize) {
    let mut countries = extract_countries(&dataset.territories);
    let currencies = associate_currencies(&mut countries, &dataset.currency_regions);
    (countries, currencies)
}

/// Run the generator on an already decoded dataset
pub fn generate(mut dataset: Dataset, config: &GeneratorConfig) -> Result<GenerationSummary> {
    dataset.set_draft_level(config.draft_level);

    let (countries, currencies) = build_table(&dataset);

    let anomalies = find_anomalies(&countries);
    for anomaly in &anomalies {
        info!("{}", anomaly);
    }

    info!("{} countries.", countries.len());

    let rendered =
        render_countries(&dataset.source, &countries).map_err(|e| GenError::OutputWrite {
            path: config.output.clone(),
            source: io::Error::new(io::ErrorKind::Other, e.to_string()),
        })?;
    write_artifact(&config.output, &rendered)?;

    Ok(GenerationSummary {
        countries: countries.len(),
        currencies,
        anomalies,
        output: config.output.clone(),
    })
}

/// Decode the archive at `archive` and write the generated table
pub fn run(archive: &Path, config: &GeneratorConfig) -> Result<GenerationSummary> {
    info!("Loading...");
    let dataset = CldrDecoder::new(&config.locale).decode(archive)?;
    info!("Loaded.");

    generate(dataset, config)
}
