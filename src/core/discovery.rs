// weelog - core/discovery.rs
//
// Log directory scanning and filename identity extraction.
//
// The scan is non-recursive: WeeChat keeps all buffer logs in a single flat
// directory. Entry order is whatever the OS returns; correctness never
// depends on it (search results are ordered by timestamp downstream).

use crate::core::model::FileIdentity;
use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

/// A directory entry that passed the filename grammar and is ready to be
/// imported, together with the identity derived from its name.
#[derive(Debug, Clone)]
pub struct EligibleFile {
    pub path: PathBuf,
    pub identity: FileIdentity,
}

/// Result of scanning a log directory.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Files whose name matched the grammar, in directory order.
    pub files: Vec<EligibleFile>,

    /// Entries skipped because their name failed the grammar. Skips are
    /// expected (server buffers, core buffer logs, stray files) and are
    /// never an error.
    pub skipped: usize,
}

/// Derive the (network, channel) identity from a log filename.
///
/// The filename grammar is fixed: `irc.<network>.<channel>.weechatlog`,
/// at least four dot-separated segments. The channel may itself contain
/// dots, so everything between the network segment and the extension is
/// rejoined with `.`. Returns `None` when the name is not import-eligible:
/// too few segments, wrong prefix or extension, or a server buffer
/// (network segment literally `server`).
pub fn parse_identity(file_name: &str) -> Option<FileIdentity> {
    let segments: Vec<&str> = file_name.split('.').collect();
    if segments.len() < constants::MIN_FILENAME_SEGMENTS {
        return None;
    }
    if segments[0] != constants::FILENAME_PREFIX {
        return None;
    }
    let network = segments[1];
    if network == constants::SERVER_BUFFER_NETWORK {
        return None;
    }
    if segments[segments.len() - 1] != constants::FILENAME_EXTENSION {
        return None;
    }
    Some(FileIdentity {
        network: network.to_string(),
        channel: segments[2..segments.len() - 1].join("."),
    })
}

/// Scan `root` for importable log files.
///
/// # Fatal errors
/// Returns `Err` only if the root path is invalid (`RootNotFound`,
/// `NotADirectory`) or an entry cannot be read at all (`Traversal`).
/// Filenames failing the grammar are counted, not reported.
pub fn scan_directory(root: &Path) -> Result<ScanOutcome, DiscoveryError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    }

    let mut files = Vec::new();
    let mut skipped = 0usize;

    // min_depth(1) excludes the root itself; max_depth(1) keeps the scan
    // non-recursive.
    for entry_result in walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry_result.map_err(|e| DiscoveryError::Traversal {
            path: root.to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            skipped += 1;
            continue;
        }

        // Non-UTF-8 filenames cannot match the grammar.
        let file_name = match entry.file_name().to_str() {
            Some(n) => n,
            None => {
                tracing::debug!(path = %entry.path().display(), "Skipped: non-UTF-8 filename");
                skipped += 1;
                continue;
            }
        };

        match parse_identity(file_name) {
            Some(identity) => {
                tracing::debug!(
                    file = file_name,
                    network = %identity.network,
                    channel = %identity.channel,
                    "File eligible for import"
                );
                files.push(EligibleFile {
                    path: entry.path().to_path_buf(),
                    identity,
                });
            }
            None => {
                tracing::trace!(file = file_name, "Skipped: filename grammar mismatch");
                skipped += 1;
            }
        }
    }

    tracing::debug!(
        root = %root.display(),
        eligible = files.len(),
        skipped,
        "Directory scan complete"
    );

    Ok(ScanOutcome { files, skipped })
}
