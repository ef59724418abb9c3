use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::path::PathBuf;
use std::process;

use country_gen::{run, GeneratorConfig, VERSION};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Ex: cldr-common-33.0.zip
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        eprintln!("usage: country-gen <cldr-common-archive>");
        process::exit(2);
    }
    let archive = PathBuf::from(&args[0]);

    let config = GeneratorConfig::from_env();
    debug!("country-gen {} with {:?}", VERSION, config);

    let summary = run(&archive, &config).context("Failed to generate country table")?;

    debug!(
        "{} currencies, {} anomalies → {}",
        summary.currencies,
        summary.anomalies.len(),
        summary.output.display()
    );

    Ok(())
}
