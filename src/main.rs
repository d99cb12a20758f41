// weelog - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Subcommand dispatch: init / parse / search

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use weelog::core::export;
use weelog::core::model::{EventKind, LogRecord};
use weelog::store::{SearchFilter, Store};
use weelog::util;
use weelog::util::error::Result;

/// weelog - WeeChat log importer and query tool.
///
/// Point weelog at a WeeChat log directory to normalise chat lines into a
/// SQLite database, then search it by text, nick, channel, date, or type.
#[derive(Parser, Debug)]
#[command(name = "weelog", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialise the SQLite database.
    Init {
        /// SQLite database file.
        #[arg(long)]
        db: PathBuf,
    },

    /// Parse WeeChat logs and store them in the database.
    Parse {
        /// Directory containing WeeChat logs.
        #[arg(long)]
        logs: PathBuf,

        /// SQLite database file.
        #[arg(long)]
        db: PathBuf,
    },

    /// Search stored WeeChat logs.
    Search {
        /// SQLite database file.
        #[arg(long)]
        db: PathBuf,

        /// Substring to match in message text.
        #[arg(long)]
        query: Option<String>,

        /// Exact nick to match.
        #[arg(long)]
        nick: Option<String>,

        /// Exact channel to match.
        #[arg(long)]
        channel: Option<String>,

        /// Substring to match in the timestamp (crude date filter).
        #[arg(long)]
        date: Option<String>,

        /// Log type filter: ACTION or MESSAGE (case-insensitive).
        #[arg(long = "type", value_parser = parse_log_type)]
        log_type: Option<EventKind>,

        /// Also write results to this file (.csv or .json).
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

/// Parse the --type value. Only the two persistable kinds are valid;
/// input is case-normalised to upper before matching.
fn parse_log_type(value: &str) -> std::result::Result<EventKind, String> {
    match value.to_uppercase().as_str() {
        "ACTION" => Ok(EventKind::Action),
        "MESSAGE" => Ok(EventKind::Message),
        other => Err(format!(
            "invalid log type '{other}': expected ACTION or MESSAGE"
        )),
    }
}

fn main() {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    if let Err(e) = run(cli.command) {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { db } => {
            let store = Store::open(&db)?;
            store.init()?;
            println!("Database initialized: {}", db.display());
        }
        Command::Parse { logs, db } => {
            let mut store = Store::open(&db)?;
            // Idempotent, so a missing `init` run never trips the import.
            store.init()?;
            let summary = store.import_directory(&logs)?;
            println!("WeeChat logs parsed and stored in: {}", db.display());
            println!(
                "{} records from {} files ({} entries skipped).",
                summary.records, summary.files_imported, summary.files_skipped
            );
        }
        Command::Search {
            db,
            query,
            nick,
            channel,
            date,
            log_type,
            export,
        } => {
            let store = Store::open(&db)?;
            let filter = SearchFilter {
                query,
                channel,
                nick,
                log_type,
                date,
            };
            let results = store.search(&filter)?;

            if results.is_empty() {
                println!("No matching logs found.");
            } else {
                print_records(&results);
            }

            if let Some(path) = export {
                let count = export::export_to_path(&results, &path)?;
                println!("Exported {count} records to {}", path.display());
            }
        }
    }
    Ok(())
}

/// Print records in the readable one-line format.
fn print_records(records: &[LogRecord]) {
    for r in records {
        println!(
            "[{}] {} ({}) <{}>: {}",
            r.timestamp, r.channel, r.log_type, r.nick, r.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// --type is case-normalised to upper before matching.
    #[test]
    fn test_parse_log_type_case_insensitive() {
        assert_eq!(parse_log_type("ACTION").unwrap(), EventKind::Action);
        assert_eq!(parse_log_type("message").unwrap(), EventKind::Message);
        assert_eq!(parse_log_type("Message").unwrap(), EventKind::Message);
    }

    /// Only the two persistable kinds are valid filter values.
    #[test]
    fn test_parse_log_type_rejects_other_kinds() {
        assert!(parse_log_type("JOIN").is_err());
        assert!(parse_log_type("SERVER INFO").is_err());
        assert!(parse_log_type("").is_err());
    }
}
