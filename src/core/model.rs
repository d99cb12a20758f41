// weelog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no SQL.
// These types are the shared vocabulary across all layers.

use serde::{Serialize, Serializer};

// =============================================================================
// Event kind
// =============================================================================

/// The six kinds of event a WeeChat log line can encode, distinguished by
/// the literal value of the line's marker field.
///
/// Only `Action` and `Message` carry actor-addressed chat content and are
/// persisted; the other kinds are recognised so the importer can drop them
/// deliberately rather than tripping over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A /me action line (marker `" *"`).
    Action,
    /// Server informational line (marker `"--"`).
    ServerInfo,
    /// Client informational line (empty marker).
    ClientInfo,
    /// A nick joined the channel (marker `"-->"`).
    Join,
    /// A nick left the channel (marker `"<--"`).
    Part,
    /// Ordinary chat line (the marker field is the speaking nick).
    Message,
}

impl EventKind {
    /// Text label stored in the `log_type` column and printed in results.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Action => "ACTION",
            EventKind::ServerInfo => "SERVER INFO",
            EventKind::ClientInfo => "CLIENT INFO",
            EventKind::Join => "JOIN",
            EventKind::Part => "PART",
            EventKind::Message => "MESSAGE",
        }
    }

    /// Look up a kind from its stored text label.
    pub fn from_label(label: &str) -> Option<EventKind> {
        match label {
            "ACTION" => Some(EventKind::Action),
            "SERVER INFO" => Some(EventKind::ServerInfo),
            "CLIENT INFO" => Some(EventKind::ClientInfo),
            "JOIN" => Some(EventKind::Join),
            "PART" => Some(EventKind::Part),
            "MESSAGE" => Some(EventKind::Message),
            _ => None,
        }
    }

    /// Whether lines of this kind are written to the store.
    pub fn is_persistable(&self) -> bool {
        matches!(self, EventKind::Action | EventKind::Message)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Serialised as the stored text label so JSON exports match the database
// and the printed output.
impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

// =============================================================================
// Log line (normalised output of classification)
// =============================================================================

/// A single classified log line, before file identity is attached.
///
/// Ephemeral: produced one per input line, filtered and mapped into a
/// `NewRecord` by the importer, never stored directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// The raw timestamp field, kept as an opaque sortable string.
    pub timestamp: String,

    /// Event kind derived from the marker field.
    pub kind: EventKind,

    /// The actor (speaking or acting nick). Empty for server/client info
    /// lines, which have no actor.
    pub nick: String,

    /// Message text. May be empty for an action with no payload.
    pub text: String,
}

// =============================================================================
// File identity
// =============================================================================

/// The (network, channel) pair derived from a log filename of the form
/// `irc.<network>.<channel-with-dots-allowed>.weechatlog`.
///
/// Derived once per source file and constant across all records from that
/// file. Never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    pub network: String,
    pub channel: String,
}

// =============================================================================
// Records
// =============================================================================

/// A record ready for insertion, before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub network: String,
    pub channel: String,
    pub timestamp: String,
    pub log_type: EventKind,
    pub nick: String,
    pub message: String,
}

/// A persisted log record as read back from the store. Immutable once
/// written; this system never updates or deletes rows.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Surrogate key assigned by SQLite.
    pub id: i64,

    pub network: String,
    pub channel: String,

    /// Opaque sortable timestamp string; never parsed into a calendar type.
    pub timestamp: String,

    pub log_type: EventKind,

    /// Actor nick with prestige glyphs already stripped.
    pub nick: String,

    pub message: String,
}

// =============================================================================
// Import summary
// =============================================================================

/// Summary statistics for a completed import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Files whose name matched the grammar and were read.
    pub files_imported: usize,

    /// Directory entries skipped because their name failed the grammar.
    pub files_skipped: usize,

    /// Records emitted to the sink (ACTION and MESSAGE lines only).
    pub records: usize,

    /// Total lines read across all imported files.
    pub lines_read: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for kind in [
            EventKind::Action,
            EventKind::ServerInfo,
            EventKind::ClientInfo,
            EventKind::Join,
            EventKind::Part,
            EventKind::Message,
        ] {
            assert_eq!(EventKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(EventKind::from_label("NOTICE"), None);
    }

    #[test]
    fn test_only_action_and_message_persist() {
        assert!(EventKind::Action.is_persistable());
        assert!(EventKind::Message.is_persistable());
        assert!(!EventKind::ServerInfo.is_persistable());
        assert!(!EventKind::ClientInfo.is_persistable());
        assert!(!EventKind::Join.is_persistable());
        assert!(!EventKind::Part.is_persistable());
    }

    #[test]
    fn test_kind_serialises_as_label() {
        let json = serde_json::to_string(&EventKind::ServerInfo).unwrap();
        assert_eq!(json, "\"SERVER INFO\"");
    }
}
