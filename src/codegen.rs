// 🖨️ Dataset Serializer
// Renders the country table as a Rust source file and writes it atomically

use crate::cldr::ArchiveInfo;
use crate::error::{GenError, Result};
use crate::territory::{CountryRecord, CountryTable};
use handlebars::{Handlebars, RenderError};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Codes deliberately removed from the table, with the reason shown in the
/// generated documentation
pub const REMOVED_CODES: &[(&str, &str)] = &[("QO", "duplicate of UM"), ("ZZ", "unknown")];

const TEMPLATE: &str = r#"// Code generated by "country-gen {{file}}"; DO NOT EDIT.

/// Country information from Unicode CLDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub currencies: &'static [&'static str],
}

/// Countries from Unicode CLDR, sorted by code.
///
/// Source: {{file}}
/// Content SHA-256: {{sha256}}
///
/// The following codes are removed:
{{#each removed}}///     {{code}} ({{reason}})
{{/each}}pub static COUNTRIES: &[(&str, Country)] = &[
{{#each countries}}    ({{code}}, Country { code: {{code}}, name: {{name}}, currencies: &[{{currencies}}] }),
{{/each}}];
"#;

/// One table row, with every value already a Rust literal
#[derive(Debug, Serialize)]
struct CountryRow {
    code: String,
    name: String,
    currencies: String,
}

impl CountryRow {
    fn from_record(record: &CountryRecord) -> Self {
        CountryRow {
            code: rust_str(&record.code),
            name: rust_str(&record.name),
            currencies: record
                .currencies
                .iter()
                .map(|c| rust_str(c))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Quoted and escaped Rust string literal
fn rust_str(value: &str) -> String {
    format!("{:?}", value)
}

/// Records sorted by code, independent of the table's iteration order
pub fn sorted_records(countries: &CountryTable) -> Vec<&CountryRecord> {
    let mut records: Vec<&CountryRecord> = countries.values().collect();
    records.sort_by(|a, b| a.code.cmp(&b.code));
    records
}

/// Render the generated source file. Same input, same bytes.
pub fn render_countries(
    source: &ArchiveInfo,
    countries: &CountryTable,
) -> std::result::Result<String, RenderError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    let rows: Vec<CountryRow> = sorted_records(countries)
        .into_iter()
        .map(CountryRow::from_record)
        .collect();
    let removed: Vec<_> = REMOVED_CODES
        .iter()
        .map(|(code, reason)| json!({ "code": code, "reason": reason }))
        .collect();

    let data = json!({
        "file": source.file_name,
        "sha256": source.content_sha256,
        "removed": removed,
        "countries": rows,
    });

    handlebars.render_template(TEMPLATE, &data)
}

/// Write `contents` to `path` via a temporary file in the same directory.
/// On failure nothing is left at `path`.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| GenError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // NamedTempFile is created 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn source() -> ArchiveInfo {
        ArchiveInfo {
            file_name: "cldr-common-33.0.zip".to_string(),
            content_sha256: "ab".repeat(32),
        }
    }

    fn sample() -> CountryTable {
        let mut fr = CountryRecord::new("FR", "France");
        fr.currencies.push("EUR".to_string());
        let mut pa = CountryRecord::new("PA", "Panama");
        pa.currencies.push("PAB".to_string());
        pa.currencies.push("USD".to_string());
        let ci = CountryRecord::new("CI", "Côte d’Ivoire \"quoted\"");
        let aq = CountryRecord::new("AQ", "Antarctica");

        [fr, pa, ci, aq]
            .into_iter()
            .map(|r| (r.code.clone(), r))
            .collect()
    }

    #[test]
    fn test_header_and_provenance() {
        let out = render_countries(&source(), &sample()).unwrap();

        assert!(out.starts_with(
            "// Code generated by \"country-gen cldr-common-33.0.zip\"; DO NOT EDIT.\n"
        ));
        assert!(out.contains("/// Source: cldr-common-33.0.zip\n"));
        assert!(out.contains(&format!("/// Content SHA-256: {}\n", "ab".repeat(32))));
        assert!(out.contains("///     QO (duplicate of UM)\n///     ZZ (unknown)\n"));
    }

    #[test]
    fn test_rows_are_sorted_and_escaped() {
        let out = render_countries(&source(), &sample()).unwrap();

        let expected = concat!(
            "pub static COUNTRIES: &[(&str, Country)] = &[\n",
            "    (\"AQ\", Country { code: \"AQ\", name: \"Antarctica\", currencies: &[] }),\n",
            "    (\"CI\", Country { code: \"CI\", name: \"Côte d’Ivoire \\\"quoted\\\"\", currencies: &[] }),\n",
            "    (\"FR\", Country { code: \"FR\", name: \"France\", currencies: &[\"EUR\"] }),\n",
            "    (\"PA\", Country { code: \"PA\", name: \"Panama\", currencies: &[\"PAB\", \"USD\"] }),\n",
            "];\n",
        );
        assert!(out.ends_with(expected), "{}", out);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_countries(&source(), &sample()).unwrap();

        // rebuild the table so the hash map gets a fresh random state
        for _ in 0..8 {
            let b = render_countries(&source(), &sample()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_empty_table() {
        let out = render_countries(&source(), &CountryTable::new()).unwrap();
        assert!(out.ends_with("pub static COUNTRIES: &[(&str, Country)] = &[\n];\n"));
    }

    #[test]
    fn test_write_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.rs");

        write_artifact(&path, "pub static X: u8 = 1;\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "pub static X: u8 = 1;\n");

        // overwrite in place
        write_artifact(&path, "pub static X: u8 = 2;\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "pub static X: u8 = 2;\n");

        // only the artifact, no temp files left over
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_artifact_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/countries.rs");

        let err = write_artifact(&path, "x").unwrap_err();

        assert!(matches!(err, GenError::OutputWrite { .. }));
        assert!(!path.exists());
    }
}
