//! Integration tests for gazette-store
//!
//! These tests cover the marker, contract and dead-letter tables end to end.

use gazette_domain::traits::{ContractSink, DeadLetterLog, ProcessedTracker};
use gazette_domain::{ContractRecord, DeadLetter, FailureStage, ProcessedMarker};
use gazette_store::{SqliteStore, StoreError};

fn sample_record(code: &str) -> ContractRecord {
    ContractRecord {
        contract_type: "Contrato".to_string(),
        contract_number: "012/2024".to_string(),
        municipality: "Manacapuru".to_string(),
        contractor_tax_id: "12.345.678/0001-90".to_string(),
        contractor_name: "Construtora Rio Negro Ltda".to_string(),
        contract_object: "Reforma da escola municipal".to_string(),
        contract_value: "R$ 150.000,00".to_string(),
        identifier_code: code.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_unknown_document_is_not_processed() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert!(!store.is_processed("doc-1").unwrap());
    assert!(store.marker("doc-1").unwrap().is_none());
}

#[test]
fn test_mark_and_check_processed() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let marker = ProcessedMarker {
        document_id: "doc-1".to_string(),
        processed_at: 1_700_000_000,
    };
    store.mark_processed(marker.clone()).unwrap();

    assert!(store.is_processed("doc-1").unwrap());
    assert!(!store.is_processed("doc-2").unwrap());
    assert_eq!(store.marker("doc-1").unwrap(), Some(marker));
}

#[test]
fn test_marker_is_never_overwritten() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .mark_processed(ProcessedMarker {
            document_id: "doc-1".to_string(),
            processed_at: 100,
        })
        .unwrap();

    let result = store.mark_processed(ProcessedMarker {
        document_id: "doc-1".to_string(),
        processed_at: 200,
    });
    assert!(matches!(result, Err(StoreError::AlreadyMarked(ref id)) if id == "doc-1"));
    assert_eq!(store.marker("doc-1").unwrap().unwrap().processed_at, 100);
}

#[test]
fn test_save_and_read_back_contract() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let record = sample_record("ABC123XYZ");
    store.save(record.clone()).unwrap();

    let stored = store.contracts_by_code("ABC123XYZ").unwrap();
    assert_eq!(stored, vec![record]);
    assert_eq!(store.contract_count().unwrap(), 1);
}

#[test]
fn test_save_is_insert_only() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    // Same code twice: the sink does not deduplicate
    store.save(sample_record("ABC123XYZ")).unwrap();
    store.save(sample_record("ABC123XYZ")).unwrap();

    assert_eq!(store.contracts_by_code("ABC123XYZ").unwrap().len(), 2);
}

#[test]
fn test_record_dead_letters() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    store
        .record(DeadLetter::new("doc-1", "ABC123XYZ", FailureStage::Parse, "expected value at line 1"))
        .unwrap();
    store
        .record(DeadLetter::new("doc-1", "DEF456UVW", FailureStage::Extraction, "timeout"))
        .unwrap();
    store
        .record(DeadLetter::new("doc-2", "GHI789RST", FailureStage::Persist, "disk full"))
        .unwrap();

    let letters = store.dead_letters("doc-1").unwrap();
    assert_eq!(letters.len(), 2);
    assert_eq!(letters[0].act_code, "ABC123XYZ");
    assert_eq!(letters[0].stage, FailureStage::Parse);
    assert_eq!(letters[1].stage, FailureStage::Extraction);
}

#[test]
fn test_markers_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gazette.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.mark_processed(ProcessedMarker::now("doc-1")).unwrap();
        store.save(sample_record("ABC123XYZ")).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert!(store.is_processed("doc-1").unwrap());
    assert_eq!(store.contract_count().unwrap(), 1);
}

#[test]
fn test_open_existing_does_not_create_missing_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.db");

    let result = SqliteStore::open_existing(&path);

    assert!(matches!(result, Err(StoreError::NotFound(_))));
    assert!(!path.exists());
}

#[test]
fn test_open_existing_reads_markers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gazette.db");
    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.mark_processed(ProcessedMarker::now("doc-1")).unwrap();
    }

    let store = SqliteStore::open_existing(&path).unwrap();

    assert!(store.is_processed("doc-1").unwrap());
    assert!(store.marker("doc-2").unwrap().is_none());
}
