// weelog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep the causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all weelog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum WeelogError {
    /// Log directory scanning failed.
    Discovery(DiscoveryError),

    /// Log line parsing failed.
    Parse(ParseError),

    /// SQLite storage failed.
    Store(StoreError),

    /// Search result export failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for WeelogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Store(e) => write!(f, "Storage error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for WeelogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Discovery(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to log directory scanning.
///
/// Filenames that simply fail the `irc.<network>.<channel>.weechatlog`
/// grammar are NOT errors; they are silently skipped and counted in the
/// import summary.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The log directory does not exist.
    RootNotFound { path: PathBuf },

    /// The log directory path is not a directory.
    NotADirectory { path: PathBuf },

    /// Walkdir traversal error (wraps individual entry access failures).
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Log directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Log path '{}' is not a directory", path.display())
            }
            Self::Traversal { path, source } => {
                write!(f, "Error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for WeelogError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to log line parsing.
///
/// A malformed line aborts the entire import run: it indicates a format
/// assumption violation worth surfacing immediately rather than silently
/// dropping data. The run-level transaction guarantees no partial commit.
#[derive(Debug)]
pub enum ParseError {
    /// A line does not conform to the tab-field grammar.
    MalformedLine {
        file: PathBuf,
        line_number: u64,
        reason: LineError,
    },

    /// I/O error while reading a log file.
    Io { file: PathBuf, source: io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine {
                file,
                line_number,
                reason,
            } => write!(f, "'{}' line {line_number}: {reason}", file.display()),
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedLine { reason, .. } => Some(reason),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for WeelogError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// Why a single raw line failed classification.
///
/// Produced by the pure classifier, which knows nothing about files; the
/// importer wraps it into `ParseError::MalformedLine` with path context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// The line has fewer than two tab characters, so it cannot be split
    /// into timestamp, marker, and rest.
    TooFewFields { tabs_found: usize },

    /// A join/part line whose payload has no space between nick and text.
    MissingNickSeparator { marker: String },
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { tabs_found } => write!(
                f,
                "expected at least 2 tab-separated fields, found {tabs_found} tab(s)"
            ),
            Self::MissingNickSeparator { marker } => write!(
                f,
                "'{marker}' line has no space separating nick from text"
            ),
        }
    }
}

impl std::error::Error for LineError {}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors related to SQLite storage.
///
/// Underlying rusqlite failures (disk full, permissions, lock contention)
/// are not specific to this domain and are surfaced unmodified as the
/// `source` of these variants.
#[derive(Debug)]
pub enum StoreError {
    /// Opening the database file failed.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// A SQL statement failed.
    Sql {
        operation: &'static str,
        source: rusqlite::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open database '{}': {source}", path.display())
            }
            Self::Sql { operation, source } => {
                write!(f, "SQL {operation} failed: {source}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sql { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for WeelogError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to search result export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The export path's extension is not a supported format.
    UnsupportedFormat { path: PathBuf },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::UnsupportedFormat { path } => write!(
                f,
                "Unsupported export format for '{}': use a .csv or .json extension",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::UnsupportedFormat { .. } => None,
        }
    }
}

impl From<ExportError> for WeelogError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for weelog results.
pub type Result<T> = std::result::Result<T, WeelogError>;
