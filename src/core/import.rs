// weelog - core/import.rs
//
// Directory importer: drives the line classifier over each eligible file
// and streams persistable records into a sink, one line at a time. Nothing
// is buffered per directory, so memory stays bounded for large logs.
//
// A malformed line aborts the whole run. The caller wraps the run in a
// single store transaction, so an abort leaves prior state untouched.

use crate::core::classify::classify;
use crate::core::discovery::{scan_directory, EligibleFile};
use crate::core::model::{ImportSummary, NewRecord};
use crate::util::constants;
use crate::util::error::{ParseError, Result};
use std::io::BufRead;
use std::path::Path;

/// Append-only destination for imported records.
///
/// The store implements this over a transaction; tests implement it over a
/// plain Vec.
pub trait RecordSink {
    fn append(&mut self, record: &NewRecord) -> Result<()>;
}

/// Strip channel-membership prestige glyphs (`+`, `@`, `%`) from both ends
/// of a nick. The glyphs indicate channel role, not identity.
pub fn normalize_nick(nick: &str) -> &str {
    nick.trim_matches(constants::PRESTIGE_GLYPHS)
}

/// Import every eligible log file under `root` into `sink`.
///
/// Files are processed one at a time; each file handle is released before
/// the next file is opened. Returns a summary of the run.
pub fn import_directory(root: &Path, sink: &mut dyn RecordSink) -> Result<ImportSummary> {
    let outcome = scan_directory(root)?;

    let mut summary = ImportSummary {
        files_skipped: outcome.skipped,
        ..Default::default()
    };

    for file in &outcome.files {
        import_file(file, sink, &mut summary)?;
        summary.files_imported += 1;
    }

    tracing::info!(
        root = %root.display(),
        files_imported = summary.files_imported,
        files_skipped = summary.files_skipped,
        records = summary.records,
        lines = summary.lines_read,
        "Import complete"
    );

    Ok(summary)
}

/// Import a single file's lines into the sink.
///
/// `BufRead::lines` strips the trailing newline and tolerates a final line
/// without one, matching the line grammar the classifier expects.
fn import_file(
    file: &EligibleFile,
    sink: &mut dyn RecordSink,
    summary: &mut ImportSummary,
) -> Result<()> {
    let handle = std::fs::File::open(&file.path).map_err(|e| ParseError::Io {
        file: file.path.clone(),
        source: e,
    })?;
    let reader = std::io::BufReader::new(handle);

    let records_at_start = summary.records;
    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = (idx as u64) + 1;
        let raw_line = line_result.map_err(|e| ParseError::Io {
            file: file.path.clone(),
            source: e,
        })?;
        summary.lines_read += 1;

        let log_line = classify(&raw_line).map_err(|reason| ParseError::MalformedLine {
            file: file.path.clone(),
            line_number,
            reason,
        })?;

        if !log_line.kind.is_persistable() {
            continue;
        }

        sink.append(&NewRecord {
            network: file.identity.network.clone(),
            channel: file.identity.channel.clone(),
            timestamp: log_line.timestamp,
            log_type: log_line.kind,
            nick: normalize_nick(&log_line.nick).to_string(),
            message: log_line.text,
        })?;
        summary.records += 1;
    }

    tracing::debug!(
        file = %file.path.display(),
        records = summary.records - records_at_start,
        "File imported"
    );

    Ok(())
}
