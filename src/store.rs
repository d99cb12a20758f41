// weelog - store.rs
//
// SQLite persistence for imported log records.
//
// One table, all text-typed except the surrogate key. Records are append
// only: this system never updates or deletes rows. An import run executes
// inside a single transaction so a mid-run abort (malformed line, I/O
// failure) leaves prior state untouched.

use crate::core::import::{self, RecordSink};
use crate::core::model::{EventKind, ImportSummary, LogRecord, NewRecord};
use crate::util::error::{Result, StoreError};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql, Transaction};
use std::path::Path;

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        network TEXT,
        channel TEXT,
        timestamp TEXT,
        log_type TEXT,
        nick TEXT,
        message TEXT
    )";

const INSERT_SQL: &str = "
    INSERT INTO logs (network, channel, timestamp, log_type, nick, message)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_COLUMNS: &str = "id, network, channel, timestamp, log_type, nick, message";

// Stored as the text label so the column is greppable with plain sqlite3.
impl ToSql for EventKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for EventKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;
        EventKind::from_label(label)
            .ok_or_else(|| FromSqlError::Other(format!("unknown log_type '{label}'").into()))
    }
}

// =============================================================================
// Search filter
// =============================================================================

/// Optional search filters, AND-combined when applied.
///
/// All matching is on the stored text: `query` and `date` are substring
/// matches (LIKE), the rest are exact. No filters means an unconstrained
/// select.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Substring match on message text.
    pub query: Option<String>,

    /// Exact channel name.
    pub channel: Option<String>,

    /// Exact nick (post-normalization, so no prestige glyphs).
    pub nick: Option<String>,

    /// Exact log type (ACTION or MESSAGE).
    pub log_type: Option<EventKind>,

    /// Substring match on the timestamp string; a crude date filter.
    pub date: Option<String>,
}

impl SearchFilter {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.channel.is_none()
            && self.nick.is_none()
            && self.log_type.is_none()
            && self.date.is_none()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the SQLite database holding imported records.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if absent) the database file at `path`.
    pub fn open(path: &Path) -> Result<Store> {
        let conn = Connection::open(path).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(db = %path.display(), "Database opened");
        Ok(Store { conn })
    }

    /// Open an in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Store> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open {
            path: ":memory:".into(),
            source: e,
        })?;
        Ok(Store { conn })
    }

    /// Create the `logs` table if it does not exist. Safe to call any
    /// number of times.
    pub fn init(&self) -> Result<()> {
        self.conn
            .execute(CREATE_TABLE_SQL, [])
            .map_err(|e| StoreError::Sql {
                operation: "create table",
                source: e,
            })?;
        tracing::debug!("Schema initialised");
        Ok(())
    }

    /// Import every eligible log file under `root` into this store.
    ///
    /// All inserts run in one transaction, committed only when the whole
    /// directory imports cleanly; any error rolls everything back.
    pub fn import_directory(&mut self, root: &Path) -> Result<ImportSummary> {
        let tx = self.conn.transaction().map_err(|e| StoreError::Sql {
            operation: "begin transaction",
            source: e,
        })?;

        let summary = {
            let mut sink = TxSink { tx: &tx };
            import::import_directory(root, &mut sink)?
        };

        tx.commit().map_err(|e| StoreError::Sql {
            operation: "commit",
            source: e,
        })?;

        Ok(summary)
    }

    /// Search stored records with the given filters, ordered by timestamp
    /// ascending (lexicographic on the stored string, not calendar-aware).
    ///
    /// Zero matches is a valid empty result, not an error.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<LogRecord>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(query) = &filter.query {
            conditions.push("message LIKE ?");
            params.push(format!("%{query}%"));
        }
        if let Some(channel) = &filter.channel {
            conditions.push("channel = ?");
            params.push(channel.clone());
        }
        if let Some(nick) = &filter.nick {
            conditions.push("nick = ?");
            params.push(nick.clone());
        }
        if let Some(log_type) = filter.log_type {
            conditions.push("log_type = ?");
            params.push(log_type.label().to_string());
        }
        if let Some(date) = &filter.date {
            conditions.push("timestamp LIKE ?");
            params.push(format!("%{date}%"));
        }

        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM logs");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY timestamp ASC");

        tracing::debug!(sql = %sql, params = params.len(), "Running search");

        let mut stmt = self.conn.prepare(&sql).map_err(|e| StoreError::Sql {
            operation: "prepare search",
            source: e,
        })?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                Ok(LogRecord {
                    id: row.get(0)?,
                    network: row.get(1)?,
                    channel: row.get(2)?,
                    timestamp: row.get(3)?,
                    log_type: row.get(4)?,
                    nick: row.get(5)?,
                    message: row.get(6)?,
                })
            })
            .map_err(|e| StoreError::Sql {
                operation: "search",
                source: e,
            })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| StoreError::Sql {
                operation: "read row",
                source: e,
            })?);
        }
        Ok(records)
    }
}

/// Record sink over an open import transaction.
struct TxSink<'a, 'conn> {
    tx: &'a Transaction<'conn>,
}

impl RecordSink for TxSink<'_, '_> {
    fn append(&mut self, record: &NewRecord) -> Result<()> {
        let mut stmt = self
            .tx
            .prepare_cached(INSERT_SQL)
            .map_err(|e| StoreError::Sql {
                operation: "prepare insert",
                source: e,
            })?;
        stmt.execute(rusqlite::params![
            record.network,
            record.channel,
            record.timestamp,
            record.log_type,
            record.nick,
            record.message,
        ])
        .map_err(|e| StoreError::Sql {
            operation: "insert",
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str, channel: &str, kind: EventKind, nick: &str, msg: &str) -> NewRecord {
        NewRecord {
            network: "libera".to_string(),
            channel: channel.to_string(),
            timestamp: timestamp.to_string(),
            log_type: kind,
            nick: nick.to_string(),
            message: msg.to_string(),
        }
    }

    fn seeded_store() -> Store {
        let mut store = Store::open_in_memory().unwrap();
        store.init().unwrap();
        let tx = store.conn.transaction().unwrap();
        {
            let mut sink = TxSink { tx: &tx };
            for rec in [
                record("2024-01-15 10:00:02", "#rust", EventKind::Message, "alice", "borrow checker"),
                record("2024-01-15 10:00:01", "#rust", EventKind::Action, "bob", "waves"),
                record("2024-01-16 09:00:00", "#python", EventKind::Message, "carol", "whitespace"),
            ] {
                sink.append(&rec).unwrap();
            }
        }
        tx.commit().unwrap();
        store
    }

    #[test]
    fn test_init_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store.init().unwrap();
        store.init().unwrap();
        assert!(store.search(&SearchFilter::default()).unwrap().is_empty());
    }

    /// Re-running init must not drop existing rows.
    #[test]
    fn test_init_preserves_existing_rows() {
        let store = seeded_store();
        store.init().unwrap();
        assert_eq!(store.search(&SearchFilter::default()).unwrap().len(), 3);
    }

    /// No filters: unconstrained select, ordered by timestamp ascending.
    #[test]
    fn test_unfiltered_search_ordered_by_timestamp() {
        let store = seeded_store();
        let results = store.search(&SearchFilter::default()).unwrap();
        let timestamps: Vec<_> = results.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(
            timestamps,
            vec![
                "2024-01-15 10:00:01",
                "2024-01-15 10:00:02",
                "2024-01-16 09:00:00"
            ]
        );
    }

    #[test]
    fn test_message_substring_filter() {
        let store = seeded_store();
        let results = store
            .search(&SearchFilter {
                query: Some("borrow".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].nick, "alice");
    }

    #[test]
    fn test_channel_and_type_combined() {
        let store = seeded_store();
        let results = store
            .search(&SearchFilter {
                channel: Some("#rust".to_string()),
                log_type: Some(EventKind::Message),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message, "borrow checker");
    }

    #[test]
    fn test_nick_exact_filter() {
        let store = seeded_store();
        let results = store
            .search(&SearchFilter {
                nick: Some("bob".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].log_type, EventKind::Action);
    }

    /// The date filter is a substring match on the timestamp string.
    #[test]
    fn test_date_substring_filter() {
        let store = seeded_store();
        let results = store
            .search(&SearchFilter {
                date: Some("2024-01-16".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].channel, "#python");
    }

    /// Zero matches is a valid empty result.
    #[test]
    fn test_no_matches_is_empty_not_error() {
        let store = seeded_store();
        let results = store
            .search(&SearchFilter {
                nick: Some("nobody".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(SearchFilter::default().is_empty());
        assert!(!SearchFilter {
            date: Some("2024".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
