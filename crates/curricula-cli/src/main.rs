//! Curricula catalog CLI.
//!
//! Provides the `curricula` binary for inspecting a SQLite-backed catalog
//! without running the HTTP server. Every subcommand goes through the same
//! `CatalogService` the server uses, so output matches the API responses.
//!
//! Results are printed as JSON on stdout; diagnostics go to stderr.

use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use curricula_server::error::ApiError;
use curricula_server::service::CatalogService;
use curricula_storage::{KvStore, SqliteStore};

/// Curricula catalog tools.
#[derive(Parser)]
#[command(name = "curricula", about = "Curricula catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Check that subject program lists and link records agree.
    Audit {
        /// Path to the catalog database file.
        #[arg(short, long)]
        db: String,
    },

    /// Print one stored subject record.
    Subject {
        /// Path to the catalog database file.
        #[arg(short, long)]
        db: String,

        /// Subject code.
        #[arg(short, long)]
        code: String,
    },

    /// Print a program's subjects ordered by semester.
    Curriculum {
        /// Path to the catalog database file.
        #[arg(short, long)]
        db: String,

        /// Program code.
        #[arg(short, long)]
        program: String,
    },

    /// Print every subject with its placements.
    List {
        /// Path to the catalog database file.
        #[arg(short, long)]
        db: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Audit { db } => run_audit(&db),
        Commands::Subject { db, code } => {
            with_service(&db, |svc| print_result(svc.get_subject(&code)))
        }
        Commands::Curriculum { db, program } => {
            with_service(&db, |svc| print_result(svc.program_curriculum(&program)))
        }
        Commands::List { db } => with_service(&db, |svc| print_result(svc.list_subjects())),
    };
    process::exit(exit_code);
}

/// Opens the existing database at `db_path` and hands a service over it to `f`.
///
/// Returns 3 if the database is missing or cannot be opened. A mistyped path
/// must never audit a freshly created empty catalog.
fn with_service(db_path: &str, f: impl FnOnce(&CatalogService) -> i32) -> i32 {
    let store: Arc<dyn KvStore> = match SqliteStore::open_existing(db_path) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Error: failed to open database '{}': {}", db_path, e);
            return 3;
        }
    };
    f(&CatalogService::new(store))
}

/// Execute the audit subcommand.
///
/// Returns exit code: 0 = consistent, 2 = inconsistencies found,
/// 3 = I/O error.
fn run_audit(db_path: &str) -> i32 {
    with_service(db_path, |svc| {
        let report = match svc.audit() {
            Ok(report) => report,
            Err(e) => return report_error(&e),
        };
        print_json(&report);

        if report.is_consistent() {
            0
        } else {
            eprintln!(
                "Found {} missing link(s) and {} orphan link(s)",
                report.missing_links.len(),
                report.orphan_links.len()
            );
            2
        }
    })
}

/// Prints a successful result, or reports the error.
///
/// Returns exit code: 0 = success, 1 = not found or invalid input,
/// 3 = I/O error.
fn print_result<T: Serialize>(result: Result<T, ApiError>) -> i32 {
    match result {
        Ok(value) => {
            print_json(&value);
            0
        }
        Err(e) => report_error(&e),
    }
}

fn report_error(err: &ApiError) -> i32 {
    match err {
        ApiError::NotFound(msg) | ApiError::BadRequest(msg) => {
            eprintln!("Error: {}", msg);
            1
        }
        ApiError::InternalError(msg) => {
            eprintln!("I/O error: {}", msg);
            3
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize result: {}\"}}", e));
    println!("{}", json);
}
