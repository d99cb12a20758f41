// weelog - util/constants.rs
//
// Single source of truth for all named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "weelog";

/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log filename grammar
//
// WeeChat names channel log files `irc.<network>.<channel>.weechatlog`,
// where the channel itself may contain dots. Server buffers use the literal
// network segment "server" and carry no channel content worth indexing.
// =============================================================================

/// First dot-separated segment of an importable filename.
pub const FILENAME_PREFIX: &str = "irc";

/// Required extension segment (the last dot-separated segment).
pub const FILENAME_EXTENSION: &str = "weechatlog";

/// Network segment value that marks a server buffer; never imported.
pub const SERVER_BUFFER_NETWORK: &str = "server";

/// Minimum number of dot-separated filename segments:
/// `irc` + network + at least one channel segment + extension.
pub const MIN_FILENAME_SEGMENTS: usize = 4;

// =============================================================================
// Line markers
//
// The second tab-delimited field of a log line is either one of these fixed
// control markers or, for ordinary chat lines, the speaking nick itself.
// =============================================================================

/// Marker for /me action lines.
pub const MARKER_ACTION: &str = " *";

/// Marker for server informational lines.
pub const MARKER_SERVER_INFO: &str = "--";

/// Marker for join lines.
pub const MARKER_JOIN: &str = "-->";

/// Marker for part/quit lines.
pub const MARKER_PART: &str = "<--";

/// Channel-membership prestige glyphs stripped from nicks before persistence
/// (voice `+`, op `@`, half-op `%`). Not part of the nick's identity.
pub const PRESTIGE_GLYPHS: &[char] = &['+', '@', '%'];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
