use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fetched record.
pub type RecordId = Uuid;

/// Unique identifier for a finished bundle.
pub type BundleId = Uuid;

/// A single unit of data produced by a source.
///
/// The payload itself is schemaless JSON — sources decide what shape their
/// records take, actions reshape them, bundlers persist them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fetched_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl Record {
    /// Create a record stamped with the current time.
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            fetched_at: Utc::now(),
            data,
        }
    }
}

/// An ordered set of records from a single source fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Name of the source (or action) that produced this batch.
    pub source: String,
    pub records: Vec<Record>,
}

impl Batch {
    pub fn new(source: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    /// An empty batch attributed to the given producer.
    pub fn empty(source: impl Into<String>) -> Self {
        Self::new(source, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The final artifact of a pipeline run: every batch that survived the
/// transform stages, grouped under one label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub id: BundleId,
    pub created_at: DateTime<Utc>,
    pub label: String,
    pub batches: Vec<Batch>,
}

impl Bundle {
    pub fn new(label: impl Into<String>, batches: Vec<Batch>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            label: label.into(),
            batches,
        }
    }

    /// Total record count across all batches.
    pub fn record_count(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }
}
