//! User-facing error message formatting.
//!
//! Matches on typed errors (PolarsError variants, io::ErrorKind) in a report's
//! cause chain rather than parsing display strings.

use polars::prelude::PolarsError;
use std::io;
use std::path::Path;

/// Format a PolarsError raised while reading a CSV file.
pub fn user_message_from_polars(err: &PolarsError) -> String {
    use polars::prelude::PolarsError as PE;

    match err {
        PE::IO { error, msg } => {
            user_message_from_io(error.as_ref(), msg.as_ref().map(|m| m.as_ref()))
        }
        PE::NoData(msg) => format!("No data: {}", msg),
        PE::ComputeError(msg) => format!("Could not parse CSV: {}", first_line(msg)),
        PE::SchemaMismatch(msg) => format!("Rows do not match the header: {}", msg),
        PE::ShapeMismatch(msg) => format!("Row shape mismatch: {}", msg),
        PE::Duplicate(msg) => format!("Duplicate column name in header: {}", msg),
        PE::Context { error, msg } => {
            let inner = user_message_from_polars(error);
            format!("{}: {}", msg, inner)
        }
        #[allow(unreachable_patterns)]
        _ => err.to_string(),
    }
}

/// Format an io::Error by its ErrorKind.
pub fn user_message_from_io(err: &io::Error, context: Option<&str>) -> String {
    use std::io::ErrorKind;

    let base: String = match err.kind() {
        ErrorKind::NotFound => "File or directory not found.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check read access.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => {
            "Invalid or corrupted data.".to_string()
        }
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        ErrorKind::Interrupted => "Operation interrupted.".to_string(),
        ErrorKind::OutOfMemory => "Out of memory.".to_string(),
        ErrorKind::Other => {
            let msg = err.to_string();
            if msg.contains("Is a directory") {
                return "Path is a directory, not a file.".to_string();
            }
            return if context.is_some() {
                format!("I/O error: {}", msg)
            } else {
                msg
            };
        }
        _ => err.to_string(),
    };

    match context {
        Some(ctx) if !ctx.is_empty() => format!("{} {}", base, ctx),
        _ => base,
    }
}

/// Format a report for the error panel, prefixed with the file that failed.
pub fn user_message_from_report(report: &color_eyre::eyre::Report, path: Option<&Path>) -> String {
    let msg = report
        .chain()
        .find_map(|cause| {
            if let Some(pe) = cause.downcast_ref::<PolarsError>() {
                Some(user_message_from_polars(pe))
            } else {
                cause
                    .downcast_ref::<io::Error>()
                    .map(|io_err| user_message_from_io(io_err, None))
            }
        })
        .unwrap_or_else(|| first_line(&report.to_string()).to_string());

    match path {
        Some(p) => format!("Failed to load {}: {}", p.display(), msg),
        None => msg,
    }
}

fn first_line(msg: &str) -> &str {
    msg.lines()
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("An error occurred")
}
