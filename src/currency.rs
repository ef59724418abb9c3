// 💱 Currency Associator
// Attaches current legal-tender currencies to the extracted countries

use crate::cldr::RawCurrencyRegion;
use crate::territory::CountryTable;
use log::debug;

/// Append every current tender currency of each region to its country.
///
/// Regions without a country are ignored. Facts are taken in source order
/// and repeats are kept. Returns the number of codes appended.
pub fn associate_currencies(
    countries: &mut CountryTable,
    regions: &[RawCurrencyRegion],
) -> usize {
    let mut appended = 0;

    for region in regions {
        let Some(country) = countries.get_mut(&region.region) else {
            debug!("{}: currency history without country", region.region);
            continue;
        };

        for currency in &region.currencies {
            // "XXX", gold and friends
            if !currency.is_tender() {
                continue;
            }
            if !currency.is_current() {
                continue;
            }

            country.currencies.push(currency.code.clone());
            appended += 1;
        }
    }

    appended
}
