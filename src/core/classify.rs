// weelog - core/classify.rs
//
// Per-line classifier for the WeeChat log format.
// Core layer: pure function over a single raw line, no I/O.
//
// Format note: the second tab-delimited field is overloaded. For control
// lines it is a fixed marker (" *", "--", "-->", "<--", or empty); for
// ordinary chat it is the speaking nick. The two cases can only be told
// apart by literal value, so the dispatch below matches literals in a fixed
// priority order. Do not replace this with a nick-detection heuristic.

use crate::core::model::{EventKind, LogLine};
use crate::util::constants;
use crate::util::error::LineError;

/// Classify one raw log line into a typed `LogLine`.
///
/// The line (after stripping a trailing newline, which the importer's
/// line reader already does) must split on its first two tab characters
/// into `timestamp`, `marker`, and `rest`; `rest` may itself contain tabs.
///
/// Splitting rules per kind:
/// - ACTION degrades gracefully when `rest` has no space: the whole payload
///   becomes the nick and the text is empty.
/// - JOIN and PART are stricter: a payload without a space is malformed.
///   This asymmetry is a property of the source format; preserve it.
pub fn classify(raw_line: &str) -> Result<LogLine, LineError> {
    let (timestamp, after_ts) = match raw_line.split_once('\t') {
        Some(parts) => parts,
        None => return Err(LineError::TooFewFields { tabs_found: 0 }),
    };
    let (marker, rest) = match after_ts.split_once('\t') {
        Some(parts) => parts,
        None => return Err(LineError::TooFewFields { tabs_found: 1 }),
    };

    let (kind, nick, text) = match marker {
        constants::MARKER_ACTION => {
            // No space: the action consists of the nick alone.
            let (nick, text) = rest.split_once(' ').unwrap_or((rest, ""));
            (EventKind::Action, nick, text)
        }
        constants::MARKER_SERVER_INFO => (EventKind::ServerInfo, "", rest),
        "" => (EventKind::ClientInfo, "", rest),
        constants::MARKER_JOIN | constants::MARKER_PART => {
            let kind = if marker == constants::MARKER_JOIN {
                EventKind::Join
            } else {
                EventKind::Part
            };
            let (nick, text) = rest.split_once(' ').ok_or_else(|| {
                LineError::MissingNickSeparator {
                    marker: marker.to_string(),
                }
            })?;
            (kind, nick, text)
        }
        // Any other marker value is the nick of an ordinary chat line.
        nick => (EventKind::Message, nick, rest),
    };

    Ok(LogLine {
        timestamp: timestamp.to_string(),
        kind,
        nick: nick.to_string(),
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(line: &str) -> LogLine {
        classify(line).expect("line should classify")
    }

    #[test]
    fn test_action_line() {
        let line = ok("2024-01-15 14:30:22\t *\talice waves at everyone");
        assert_eq!(line.kind, EventKind::Action);
        assert_eq!(line.timestamp, "2024-01-15 14:30:22");
        assert_eq!(line.nick, "alice");
        assert_eq!(line.text, "waves at everyone");
    }

    /// ACTION with no space in the payload degrades gracefully: the whole
    /// payload is the nick, the text is empty.
    #[test]
    fn test_action_without_space_degrades() {
        let line = ok("2024-01-15 14:30:22\t *\tshrugs");
        assert_eq!(line.kind, EventKind::Action);
        assert_eq!(line.nick, "shrugs");
        assert_eq!(line.text, "");
    }

    #[test]
    fn test_server_info_line() {
        let line = ok("2024-01-15 14:30:22\t--\tirc: disconnected from server");
        assert_eq!(line.kind, EventKind::ServerInfo);
        assert_eq!(line.nick, "");
        assert_eq!(line.text, "irc: disconnected from server");
    }

    #[test]
    fn test_client_info_line() {
        let line = ok("2024-01-15 14:30:22\t\tBuffer opened");
        assert_eq!(line.kind, EventKind::ClientInfo);
        assert_eq!(line.nick, "");
        assert_eq!(line.text, "Buffer opened");
    }

    #[test]
    fn test_join_line() {
        let line = ok("2024-01-15 14:30:22\t-->\tbob (~bob@host) has joined #rust");
        assert_eq!(line.kind, EventKind::Join);
        assert_eq!(line.nick, "bob");
        assert_eq!(line.text, "(~bob@host) has joined #rust");
    }

    #[test]
    fn test_part_line() {
        let line = ok("2024-01-15 14:30:22\t<--\tbob (~bob@host) has left #rust");
        assert_eq!(line.kind, EventKind::Part);
        assert_eq!(line.nick, "bob");
        assert_eq!(line.text, "(~bob@host) has left #rust");
    }

    /// JOIN/PART are stricter than ACTION: a payload with no space is
    /// malformed rather than degrading.
    #[test]
    fn test_join_without_space_is_malformed() {
        let result = classify("2024-01-15 14:30:22\t-->\tbob");
        assert_eq!(
            result,
            Err(LineError::MissingNickSeparator {
                marker: "-->".to_string()
            })
        );
    }

    #[test]
    fn test_part_without_space_is_malformed() {
        let result = classify("2024-01-15 14:30:22\t<--\tbob");
        assert!(matches!(
            result,
            Err(LineError::MissingNickSeparator { .. })
        ));
    }

    /// Ordinary chat: the marker field IS the nick, never to be confused
    /// with the four reserved markers.
    #[test]
    fn test_message_marker_is_nick() {
        let line = ok("2024-01-15 14:30:22\talice\thello world");
        assert_eq!(line.kind, EventKind::Message);
        assert_eq!(line.nick, "alice");
        assert_eq!(line.text, "hello world");
    }

    /// A nick that merely resembles a marker ("*" without the leading space,
    /// "---") is still an ordinary message; dispatch is by exact literal.
    #[test]
    fn test_marker_lookalikes_are_messages() {
        let line = ok("ts\t*\tnot an action");
        assert_eq!(line.kind, EventKind::Message);
        assert_eq!(line.nick, "*");

        let line = ok("ts\t---\ttriple dash nick");
        assert_eq!(line.kind, EventKind::Message);
        assert_eq!(line.nick, "---");
    }

    /// Splitting stops after two tabs: tabs inside the message survive.
    #[test]
    fn test_rest_may_contain_tabs() {
        let line = ok("ts\talice\tcol1\tcol2\tcol3");
        assert_eq!(line.kind, EventKind::Message);
        assert_eq!(line.text, "col1\tcol2\tcol3");
    }

    #[test]
    fn test_too_few_tabs_is_malformed() {
        assert_eq!(
            classify("no tabs at all"),
            Err(LineError::TooFewFields { tabs_found: 0 })
        );
        assert_eq!(
            classify("2024-01-15\tonly one tab"),
            Err(LineError::TooFewFields { tabs_found: 1 })
        );
        assert_eq!(
            classify(""),
            Err(LineError::TooFewFields { tabs_found: 0 })
        );
    }

    /// Empty rest after a message marker: empty text, not an error.
    #[test]
    fn test_empty_message_text() {
        let line = ok("ts\talice\t");
        assert_eq!(line.kind, EventKind::Message);
        assert_eq!(line.text, "");
    }
}
