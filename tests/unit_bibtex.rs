// Unit tests for reading BibTeX exports.
//
// A realistic export with mixed entry styles, LaTeX markup in abstracts,
// and the entries the analysis step has to skip.

use std::io::Write;

use litsynth::bibtex::{parse, read_file};

const EXPORT: &str = r#"
% Exported from a reference manager
@String{jiot = "IEEE Internet of Things Journal"}

@Article{mueller2022twin,
  author   = {M{\"u}ller, Anna and Garc{\'\i}a, Luis},
  title    = {{OPC UA} based Digital Twins for Brownfield Plants},
  journal  = jiot,
  year     = {2022},
  abstract = {We present an \emph{OPC-UA} gateway that exposes
              legacy PLCs to an MQTT broker.  Latency stays below 50\,ms
              in 95\% of requests.},
  keywords = {OPC UA; MQTT},
}

@InProceedings{chen2021edge,
  title     = "Edge Analytics with Kafka",
  booktitle = {Proc. IECON},
  year      = 2021
}

@comment{jabref-meta: databaseType:bibtex;}
"#;

// ============================================================
// Parsing an export
// ============================================================

#[test]
fn parses_entries_and_skips_meta_blocks() {
    let entries = parse(EXPORT);
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["mueller2022twin", "chen2021edge"]);
    assert_eq!(entries[0].entry_type, "article");
    assert_eq!(entries[1].entry_type, "inproceedings");
}

#[test]
fn abstract_is_plain_text() {
    let entries = parse(EXPORT);
    let abstract_text = entries[0].abstract_text().unwrap();
    assert!(abstract_text.starts_with("We present an OPC-UA gateway"));
    assert!(abstract_text.contains("below 50 ms in 95% of requests."));
    assert!(!abstract_text.contains('\n'));
    assert!(!abstract_text.contains("  "));
}

#[test]
fn author_accents_are_decoded() {
    let entries = parse(EXPORT);
    assert_eq!(
        entries[0].field("author"),
        Some("Müller, Anna and García, Luis")
    );
    assert_eq!(
        entries[0].title(),
        Some("OPC UA based Digital Twins for Brownfield Plants")
    );
}

#[test]
fn entry_without_abstract_is_reported_as_missing() {
    let entries = parse(EXPORT);
    assert_eq!(entries[1].title(), Some("Edge Analytics with Kafka"));
    assert_eq!(entries[1].abstract_text(), None);
}

// ============================================================
// Files
// ============================================================

#[test]
fn read_file_parses_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();
    let entries = read_file(file.path()).unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn read_file_missing_path_names_file() {
    let err = read_file(std::path::Path::new("/nonexistent/refs.bib")).unwrap_err();
    assert!(err.to_string().contains("refs.bib"));
}

#[test]
fn empty_file_has_no_entries() {
    assert!(parse("").is_empty());
}
