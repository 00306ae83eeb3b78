/// Record merging with the default and schema-derived multivalued tables
use kgx::graph::{PropertyMap, PropertyValue};
use kgx::merge::{prepare_data_dict, MultivaluedTable, PropertyMerger};
use kgx::schema::ModelToolkit;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

fn record(json: &str) -> PropertyMap {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_identity_conflict_keeps_first() {
    let merged = prepare_data_dict(
        &record(r#"{"biolink:id": "A"}"#),
        &record(r#"{"biolink:id": "B"}"#),
        true,
    );
    assert_eq!(merged, record(r#"{"biolink:id": "A"}"#));
}

/// Log output collected in memory
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn merge_with_log(d1: &str, d2: &str) -> (PropertyMap, String) {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(log.clone())
        .finish();
    let merged = tracing::subscriber::with_default(subscriber, || {
        prepare_data_dict(&record(d1), &record(d2), true)
    });
    (merged, log.contents())
}

#[test]
fn test_identity_conflict_is_logged() {
    let (merged, output) = merge_with_log(r#"{"biolink:id": "A"}"#, r#"{"biolink:id": "B"}"#);
    assert_eq!(merged, record(r#"{"biolink:id": "A"}"#));
    assert!(output.contains("Not overwriting core property biolink:id"));
    assert!(output.contains("keeping A, discarding B"));

    let (merged, output) = merge_with_log(r#"{"biolink:id": "A"}"#, r#"{"biolink:id": "A"}"#);
    assert_eq!(merged, record(r#"{"biolink:id": "A"}"#));
    assert!(!output.contains("Not overwriting core property"));
}

#[test]
fn test_category_union() {
    let merged = prepare_data_dict(
        &record(r#"{"biolink:category": ["X"]}"#),
        &record(r#"{"biolink:category": ["Y"]}"#),
        true,
    );
    assert_eq!(merged["biolink:category"], PropertyValue::from(vec!["X", "Y"]));

    let merged = prepare_data_dict(
        &record(r#"{"biolink:category": ["X"]}"#),
        &record(r#"{"biolink:category": ["X"]}"#),
        true,
    );
    assert_eq!(merged["biolink:category"], PropertyValue::from(vec!["X"]));
}

#[test]
fn test_full_records() {
    let d1 = record(
        r#"{"id": "HGNC:11603", "name": "TBX4", "category": ["biolink:Gene"],
            "provided_by": ["gene-source"], "score": 0.5}"#,
    );
    let d2 = record(
        r#"{"id": "HGNC:11603", "name": "T-box 4", "category": ["biolink:NamedThing"],
            "provided_by": "other-source", "taxon": "NCBITaxon:9606"}"#,
    );

    let merged = prepare_data_dict(&d1, &d2, false);
    let expected = record(
        r#"{"id": "HGNC:11603", "name": "T-box 4",
            "category": ["biolink:Gene", "biolink:NamedThing"],
            "provided_by": ["gene-source", "other-source"], "score": 0.5,
            "taxon": "NCBITaxon:9606"}"#,
    );
    assert_eq!(merged, expected);
    assert_eq!(
        serde_json::to_string(&merged).unwrap(),
        serde_json::to_string(&expected).unwrap()
    );
}

#[test]
fn test_schema_derived_table() {
    let toolkit = ModelToolkit::builtin().unwrap();
    let table = MultivaluedTable::from_toolkit(&toolkit);
    let merger = PropertyMerger::new(&table);

    let merged = merger.merge(
        &record(r#"{"biolink:has_evidence": "ECO:1", "biolink:subject": "HGNC:1"}"#),
        &record(r#"{"biolink:has_evidence": "ECO:2", "biolink:subject": "HGNC:2"}"#),
        false,
    );
    assert_eq!(merged["biolink:has_evidence"], PropertyValue::from(vec!["ECO:1", "ECO:2"]));
    assert_eq!(merged["biolink:subject"], PropertyValue::from("HGNC:1"));
}
