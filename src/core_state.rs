//! Shared application state for the admin API.
//!
//! `CoreState` is built once at startup and wrapped in `Arc`. Handlers
//! open their own connection per request; the only shared mutable piece
//! is the audit buffer.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::db;

/// Maximum audit buffer size before flush.
const AUDIT_BUFFER_CAPACITY: usize = 100;

/// Audit rows older than this are pruned on flush.
const AUDIT_RETENTION_DAYS: i64 = 90;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    /// Record store location.
    db_path: PathBuf,
    /// Audit log for admin data access.
    audit: AuditLogger,
}

impl CoreState {
    /// Create state backed by the database at `db_path`.
    ///
    /// Opens the store once so migrations are applied before the server
    /// accepts requests.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(CoreError::DataDir)?;
            }
        }
        let conn = db::open_database(&db_path)?;
        let schema_version = db::schema_version(&conn)?;
        tracing::info!(path = %db_path.display(), schema_version, "Record store ready");
        Ok(Self {
            db_path,
            audit: AuditLogger::new(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection to the record store.
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }

    // ── Audit ───────────────────────────────────────────────

    /// Record an access event; flushes to SQLite when the buffer fills.
    pub fn log_access(&self, source: AccessSource, action: &str, entity: &str) {
        if self.audit.log(source, action, entity) {
            if let Err(e) = self.flush_and_prune_audit() {
                tracing::warn!(error = %e, "Audit flush failed");
            }
        }
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.entries()
    }

    /// Flush buffered audit entries and prune expired rows.
    pub fn flush_and_prune_audit(&self) -> Result<(), CoreError> {
        let conn = self.open_db()?;
        self.audit.flush_to_db(&conn)?;
        let pruned = db::repository::prune_audit_log(&conn, AUDIT_RETENTION_DAYS)?;
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned expired audit entries");
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
    #[error("Cannot create data directory: {0}")]
    DataDir(std::io::Error),
}

// ═══════════════════════════════════════════════════════════
// Access source tracking
// ═══════════════════════════════════════════════════════════

/// Who touched the data, for audit logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessSource {
    /// Authenticated admin; `fingerprint` is a short prefix of the token hash.
    Admin { fingerprint: String },
    /// Request rejected before authentication succeeded.
    Anonymous,
}

impl std::fmt::Display for AccessSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin { fingerprint } => write!(f, "admin:{fingerprint}"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Audit logger
// ═══════════════════════════════════════════════════════════

/// In-memory audit log buffer. Entries are flushed to SQLite
/// when the buffer reaches capacity or on explicit flush.
pub struct AuditLogger {
    buffer: Mutex<Vec<AuditEntry>>,
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub source: AccessSource,
    pub action: String,
    pub entity: String,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(Vec::with_capacity(AUDIT_BUFFER_CAPACITY)),
        }
    }

    /// Log an access event to the in-memory buffer.
    /// Returns `true` if the buffer has reached flush threshold.
    pub fn log(&self, source: AccessSource, action: &str, entity: &str) -> bool {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push(AuditEntry {
                timestamp: chrono::Utc::now(),
                source,
                action: action.to_string(),
                entity: entity.to_string(),
            });
            buf.len() >= AUDIT_BUFFER_CAPACITY
        } else {
            false
        }
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.buffer
            .lock()
            .map(|buf| buf.clone())
            .unwrap_or_default()
    }

    pub fn drain(&self) -> Vec<AuditEntry> {
        self.buffer
            .lock()
            .map(|mut buf| buf.drain(..).collect())
            .unwrap_or_default()
    }

    /// Write buffered entries to `audit_log`. Timestamps use SQLite's
    /// `datetime()` text format so retention pruning compares correctly.
    pub fn flush_to_db(&self, conn: &rusqlite::Connection) -> Result<usize, CoreError> {
        let entries = self.drain();
        if entries.is_empty() {
            return Ok(0);
        }

        let tuples: Vec<(String, String, String, String)> = entries
            .iter()
            .map(|e| {
                (
                    e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    e.source.to_string(),
                    e.action.clone(),
                    e.entity.clone(),
                )
            })
            .collect();

        let count = tuples.len();
        db::repository::insert_audit_entries(conn, &tuples)?;

        tracing::debug!(count, "Flushed audit entries to database");
        Ok(count)
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
