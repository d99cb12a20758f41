// weelog - core/export.rs
//
// CSV and JSON export of search results.
// Core layer: writes to any Write trait object; the CLI decides the
// destination file and picks the format from its extension.

use crate::core::model::LogRecord;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export format, chosen from the destination file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick a format from the destination path's extension
    /// (case-insensitive). Unknown extensions are an error rather than a
    /// silent default.
    pub fn from_path(path: &Path) -> Result<ExportFormat, ExportError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Export records to `path`, format chosen from the extension.
/// Returns the number of records written.
pub fn export_to_path(records: &[LogRecord], path: &Path) -> Result<usize, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    match format {
        ExportFormat::Csv => export_csv(records, file, path),
        ExportFormat::Json => export_json(records, file, path),
    }
}

/// Export records to CSV.
///
/// Writes: timestamp, network, channel, log_type, nick, message.
pub fn export_csv<W: Write>(
    records: &[LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Header
    csv_writer
        .write_record(["timestamp", "network", "channel", "log_type", "nick", "message"])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.timestamp.as_str(),
                record.network.as_str(),
                record.channel.as_str(),
                record.log_type.label(),
                record.nick.as_str(),
                record.message.as_str(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export records to JSON (array of objects).
pub fn export_json<W: Write>(
    records: &[LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::EventKind;
    use std::path::PathBuf;

    fn make_record(id: i64, nick: &str, message: &str) -> LogRecord {
        LogRecord {
            id,
            network: "libera".to_string(),
            channel: "#rust".to_string(),
            timestamp: "2024-01-15 10:00:00".to_string(),
            log_type: EventKind::Message,
            nick: nick.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_csv_export() {
        let records = vec![
            make_record(1, "alice", "hello"),
            make_record(2, "bob", "commas, included"),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("timestamp,network,channel,log_type,nick,message"));
        assert!(output.contains("alice,hello"));
        assert!(output.contains("\"commas, included\""));
    }

    #[test]
    fn test_json_export() {
        let records = vec![make_record(1, "alice", "hello")];
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"nick\": \"alice\""));
        assert!(output.contains("\"log_type\": \"MESSAGE\""));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("a.csv")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("a.JSON")).unwrap(),
            ExportFormat::Json
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("a.txt")),
            Err(ExportError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            ExportFormat::from_path(Path::new("noext")),
            Err(ExportError::UnsupportedFormat { .. })
        ));
    }
}
