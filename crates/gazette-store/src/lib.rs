//! Gazette Storage Layer
//!
//! Implements the `ProcessedTracker`, `ContractSink` and `DeadLetterLog`
//! traits on top of SQLite.
//!
//! # Tables
//!
//! - `contract_records`: the 14 contract fields, insert-only
//! - `processed_documents`: `(document_id, processed_at)` markers
//! - `dead_letters`: per-act failures keyed by `(document_id, act_code)`
//!
//! # Examples
//!
//! ```no_run
//! use gazette_store::SqliteStore;
//! use gazette_domain::traits::ProcessedTracker;
//!
//! let store = SqliteStore::new("gazette.db").unwrap();
//! assert!(!store.is_processed("doc-1").unwrap());
//! ```

#![warn(missing_docs)]

use gazette_domain::traits::{ContractSink, DeadLetterLog, ProcessedTracker};
use gazette_domain::{ContractRecord, DeadLetter, FailureStage, ProcessedMarker};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The store file does not exist
    #[error("Store not found: {0}")]
    NotFound(String),

    /// A marker already exists for the document
    #[error("Document already marked as processed: {0}")]
    AlreadyMarked(String),
}

const INSERT_CONTRACT: &str = "INSERT INTO contract_records (
        contract_type, contract_number, addendum_number, municipality,
        contractor_tax_id, contractor_name, contract_object, contract_value,
        term, start_date, end_date, source_url, publication_date, identifier_code
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";

const SELECT_CONTRACT: &str = "SELECT
        contract_type, contract_number, addendum_number, municipality,
        contractor_tax_id, contractor_name, contract_object, contract_value,
        term, start_date, end_date, source_url, publication_date, identifier_code
    FROM contract_records";

/// SQLite-based destination store
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. The pipeline is single-writer, so
/// one store per batch run is enough.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an existing store read-only
    ///
    /// Never creates the file or the schema, so a mistyped path is reported
    /// instead of silently yielding an empty store.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Create the tables if they do not exist yet
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ContractRecord> {
        Ok(ContractRecord {
            contract_type: row.get(0)?,
            contract_number: row.get(1)?,
            addendum_number: row.get(2)?,
            municipality: row.get(3)?,
            contractor_tax_id: row.get(4)?,
            contractor_name: row.get(5)?,
            contract_object: row.get(6)?,
            contract_value: row.get(7)?,
            term: row.get(8)?,
            start_date: row.get(9)?,
            end_date: row.get(10)?,
            source_url: row.get(11)?,
            publication_date: row.get(12)?,
            identifier_code: row.get(13)?,
        })
    }

    /// Records carrying the given identifier code, in insertion order
    pub fn contracts_by_code(&self, code: &str) -> Result<Vec<ContractRecord>, StoreError> {
        let sql = format!("{} WHERE identifier_code = ?1 ORDER BY rowid", SELECT_CONTRACT);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![code], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Total number of stored contract records
    pub fn contract_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contract_records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Marker for the document, if one was written
    pub fn marker(&self, document_id: &str) -> Result<Option<ProcessedMarker>, StoreError> {
        let marker = self
            .conn
            .query_row(
                "SELECT document_id, processed_at FROM processed_documents WHERE document_id = ?1",
                params![document_id],
                |row| {
                    Ok(ProcessedMarker {
                        document_id: row.get(0)?,
                        processed_at: row.get::<_, i64>(1)? as u64,
                    })
                },
            )
            .optional()?;
        Ok(marker)
    }

    /// Dead letters recorded for one document, oldest first
    pub fn dead_letters(&self, document_id: &str) -> Result<Vec<DeadLetter>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT document_id, act_code, stage, reason, recorded_at
             FROM dead_letters WHERE document_id = ?1 ORDER BY rowid",
        )?;

        let rows = stmt
            .query_map(params![document_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(document_id, act_code, stage, reason, recorded_at)| {
                let stage = FailureStage::parse(&stage).map_err(StoreError::InvalidData)?;
                Ok(DeadLetter {
                    document_id,
                    act_code,
                    stage,
                    reason,
                    recorded_at: recorded_at as u64,
                })
            })
            .collect()
    }
}

impl ProcessedTracker for SqliteStore {
    type Error = StoreError;

    fn is_processed(&self, document_id: &str) -> Result<bool, Self::Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM processed_documents WHERE document_id = ?1",
            params![document_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn mark_processed(&mut self, marker: ProcessedMarker) -> Result<(), Self::Error> {
        if self.is_processed(&marker.document_id)? {
            return Err(StoreError::AlreadyMarked(marker.document_id));
        }

        self.conn.execute(
            "INSERT INTO processed_documents (document_id, processed_at) VALUES (?1, ?2)",
            params![&marker.document_id, marker.processed_at as i64],
        )?;
        debug!(document_id = %marker.document_id, "Wrote processed marker");
        Ok(())
    }
}

impl ContractSink for SqliteStore {
    type Error = StoreError;

    fn save(&mut self, record: ContractRecord) -> Result<(), Self::Error> {
        record.validate().map_err(StoreError::InvalidData)?;

        let v = record.values();
        self.conn.execute(
            INSERT_CONTRACT,
            params![v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8], v[9], v[10], v[11], v[12], v[13]],
        )?;
        debug!(code = %record.identifier_code, "Saved contract record");
        Ok(())
    }
}

impl DeadLetterLog for SqliteStore {
    type Error = StoreError;

    fn record(&mut self, letter: DeadLetter) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO dead_letters (document_id, act_code, stage, reason, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &letter.document_id,
                &letter.act_code,
                letter.stage.as_str(),
                &letter.reason,
                letter.recorded_at as i64,
            ],
        )?;
        Ok(())
    }
}
