// 📦 CLDR Archive Decoder
// Reads the two CLDR members the generator needs (locale display names and
// supplemental currency data) from a zip archive or an unpacked directory.
//
// Only the handful of elements used downstream are decoded; everything
// else in the XML is skipped.

use crate::error::{GenError, Result};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Archive member holding the supplemental data
pub const SUPPLEMENTAL_MEMBER: &str = "common/supplemental/supplementalData.xml";

// ============================================================================
// DRAFT LEVEL
// ============================================================================

/// CLDR `draft` attribute, ordered from most to least confident
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DraftLevel {
    #[default]
    Approved,
    Contributed,
    Provisional,
    Unconfirmed,
}

impl DraftLevel {
    /// Parse the attribute value. Absent or unknown values count as approved.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("contributed") => DraftLevel::Contributed,
            Some("provisional") => DraftLevel::Provisional,
            Some("unconfirmed") => DraftLevel::Unconfirmed,
            _ => DraftLevel::Approved,
        }
    }
}

// ============================================================================
// RAW RECORDS
// ============================================================================

/// `<territory type=".." alt="..">Name</territory>` from a locale file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTerritory {
    pub code: String,
    pub alt: Option<String>,
    pub name: String,
    #[serde(default)]
    pub draft: DraftLevel,
}

impl RawTerritory {
    pub fn new(code: &str, name: &str) -> Self {
        RawTerritory {
            code: code.to_string(),
            alt: None,
            name: name.to_string(),
            draft: DraftLevel::Approved,
        }
    }

    /// Builder pattern: mark as an alternative name form
    pub fn with_alt(mut self, alt: &str) -> Self {
        self.alt = Some(alt.to_string());
        self
    }

    /// Builder pattern: set draft level
    pub fn with_draft(mut self, draft: DraftLevel) -> Self {
        self.draft = draft;
        self
    }
}

/// `<currency iso4217=".." tender=".." from=".." to=".."/>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrency {
    pub code: String,
    pub tender: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub draft: DraftLevel,
}

impl RawCurrency {
    pub fn new(code: &str) -> Self {
        RawCurrency {
            code: code.to_string(),
            tender: None,
            from: None,
            to: None,
            draft: DraftLevel::Approved,
        }
    }

    /// Builder pattern: set tender flag
    pub fn with_tender(mut self, tender: &str) -> Self {
        self.tender = Some(tender.to_string());
        self
    }

    /// Builder pattern: set valid-until marker
    pub fn with_to(mut self, to: &str) -> Self {
        self.to = Some(to.to_string());
        self
    }

    /// Builder pattern: set draft level
    pub fn with_draft(mut self, draft: DraftLevel) -> Self {
        self.draft = draft;
        self
    }

    /// Only an explicit `tender="false"` disqualifies
    pub fn is_tender(&self) -> bool {
        self.tender.as_deref() != Some("false")
    }

    /// No `to` marker (or an empty one) means still in use
    pub fn is_current(&self) -> bool {
        self.to.as_deref().map_or(true, str::is_empty)
    }
}

/// `<region iso3166="..">` with its currency history in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrencyRegion {
    pub region: String,
    pub currencies: Vec<RawCurrency>,
}

impl RawCurrencyRegion {
    pub fn new(region: &str, currencies: Vec<RawCurrency>) -> Self {
        RawCurrencyRegion {
            region: region.to_string(),
            currencies,
        }
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// Identity of the decoded archive, for provenance in the generated file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveInfo {
    /// File (or directory) name, without parent directories
    pub file_name: String,
    /// SHA-256 of the locale member followed by the supplemental member
    pub content_sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub source: ArchiveInfo,
    pub territories: Vec<RawTerritory>,
    pub currency_regions: Vec<RawCurrencyRegion>,
}

impl Dataset {
    /// Drop every entry published at a less confident level than `level`
    pub fn set_draft_level(&mut self, level: DraftLevel) {
        let before = self.territories.len();
        self.territories.retain(|t| t.draft <= level);
        for region in &mut self.currency_regions {
            region.currencies.retain(|c| c.draft <= level);
        }
        debug!(
            "draft filter {:?}: {} territories dropped",
            level,
            before - self.territories.len()
        );
    }
}

// ============================================================================
// DECODER
// ============================================================================

pub struct CldrDecoder {
    locale: String,
}

impl CldrDecoder {
    pub fn new(locale: &str) -> Self {
        CldrDecoder {
            locale: locale.to_string(),
        }
    }

    /// Archive member holding the display names for the configured locale
    pub fn locale_member(&self) -> String {
        format!("common/main/{}.xml", self.locale)
    }

    /// Decode a zip archive or an unpacked archive directory
    pub fn decode(&self, path: &Path) -> Result<Dataset> {
        let open_err = |source| GenError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(open_err)?;
        let locale_member = self.locale_member();

        let (locale_xml, supplemental_xml) = if metadata.is_dir() {
            (
                read_dir_member(path, &locale_member)?,
                read_dir_member(path, SUPPLEMENTAL_MEMBER)?,
            )
        } else {
            let bytes = fs::read(path).map_err(open_err)?;
            let mut archive =
                ZipArchive::new(Cursor::new(bytes)).map_err(|e| GenError::decode(path, e))?;
            (
                read_zip_member(&mut archive, path, &locale_member)?,
                read_zip_member(&mut archive, path, SUPPLEMENTAL_MEMBER)?,
            )
        };

        let territories = parse_territories(&locale_xml)
            .map_err(|e| GenError::decode(path, format!("{}: {}", locale_member, e)))?;
        let currency_regions = parse_currency_regions(&supplemental_xml)
            .map_err(|e| GenError::decode(path, format!("{}: {}", SUPPLEMENTAL_MEMBER, e)))?;

        let mut hasher = Sha256::new();
        hasher.update(locale_xml.as_bytes());
        hasher.update(supplemental_xml.as_bytes());

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        debug!(
            "{}: {} territories, {} currency regions",
            file_name,
            territories.len(),
            currency_regions.len()
        );

        Ok(Dataset {
            source: ArchiveInfo {
                file_name,
                content_sha256: format!("{:x}", hasher.finalize()),
            },
            territories,
            currency_regions,
        })
    }
}

fn read_dir_member(dir: &Path, member: &str) -> Result<String> {
    let member_path = dir.join(member);
    if !member_path.is_file() {
        return Err(GenError::decode(dir, format!("missing {}", member)));
    }
    fs::read_to_string(&member_path)
        .map_err(|e| GenError::decode(dir, format!("{}: {}", member, e)))
}

fn read_zip_member(
    archive: &mut ZipArchive<Cursor<Vec<u8>>>,
    path: &Path,
    member: &str,
) -> Result<String> {
    // Official archives have no prefix, repackaged ones often add a top directory
    let nested = format!("/{}", member);
    let name = archive
        .file_names()
        .find(|n| *n == member || n.ends_with(&nested))
        .map(str::to_owned)
        .ok_or_else(|| GenError::decode(path, format!("missing {}", member)))?;

    let mut file = archive
        .by_name(&name)
        .map_err(|e| GenError::decode(path, format!("{}: {}", name, e)))?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| GenError::decode(path, format!("{}: {}", name, e)))?;
    Ok(xml)
}

// ============================================================================
// XML EXTRACTION
// ============================================================================

fn attr(start: &BytesStart, name: &str) -> std::result::Result<Option<String>, quick_xml::Error> {
    match start.try_get_attribute(name)? {
        Some(a) => Ok(Some(a.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn path_ends_with(stack: &[Vec<u8>], tail: &[&str]) -> bool {
    stack.len() >= tail.len()
        && stack[stack.len() - tail.len()..]
            .iter()
            .zip(tail)
            .all(|(have, want)| have.as_slice() == want.as_bytes())
}

/// Territory names under `ldml/localeDisplayNames/territories`
pub fn parse_territories(xml: &str) -> std::result::Result<Vec<RawTerritory>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<RawTerritory> = None;
    let mut territories = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == b"territory"
                    && path_ends_with(&stack, &["localeDisplayNames", "territories"])
                {
                    current = Some(RawTerritory {
                        code: attr(&e, "type")?.unwrap_or_default(),
                        alt: attr(&e, "alt")?,
                        name: String::new(),
                        draft: DraftLevel::from_attr(attr(&e, "draft")?.as_deref()),
                    });
                }
                stack.push(e.name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"territory"
                    && path_ends_with(&stack, &["localeDisplayNames", "territories"])
                {
                    debug!(
                        "{}: territory without a name, skipped",
                        attr(&e, "type")?.unwrap_or_default()
                    );
                }
            }
            Event::Text(t) => {
                if let Some(territory) = current.as_mut() {
                    territory.name.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if let Some(territory) = current.as_mut() {
                    territory.name.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(_) => {
                let closed = stack.pop();
                if closed.as_deref() == Some(b"territory".as_slice()) {
                    if let Some(territory) = current.take() {
                        territories.push(territory);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(territories)
}

/// Currency history under `supplementalData/currencyData/region`
pub fn parse_currency_regions(
    xml: &str,
) -> std::result::Result<Vec<RawCurrencyRegion>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<RawCurrencyRegion> = None;
    let mut regions = Vec::new();

    loop {
        let (e, empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => {
                let closed = stack.pop();
                if closed.as_deref() == Some(b"region".as_slice()) {
                    if let Some(region) = current.take() {
                        regions.push(region);
                    }
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        match e.name().as_ref() {
            b"region" if path_ends_with(&stack, &["supplementalData", "currencyData"]) => {
                let region = RawCurrencyRegion {
                    region: attr(&e, "iso3166")?.unwrap_or_default(),
                    currencies: Vec::new(),
                };
                if empty {
                    regions.push(region);
                } else {
                    current = Some(region);
                }
            }
            b"currency" if path_ends_with(&stack, &["currencyData", "region"]) => {
                if let Some(region) = current.as_mut() {
                    region.currencies.push(RawCurrency {
                        code: attr(&e, "iso4217")?.unwrap_or_default(),
                        tender: attr(&e, "tender")?,
                        from: attr(&e, "from")?,
                        to: attr(&e, "to")?,
                        draft: DraftLevel::from_attr(attr(&e, "draft")?.as_deref()),
                    });
                }
            }
            _ => {}
        }

        if !empty {
            stack.push(e.name().as_ref().to_vec());
        }
    }

    Ok(regions)
}
