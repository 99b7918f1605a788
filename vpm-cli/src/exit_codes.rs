//! Exit codes following sysexits.h conventions.
//!
//! Failures are classified from the typed errors in the `anyhow` chain so
//! scripts can tell a bad catalog from a missing file or a dead database.

use vpm_core::{CatalogError, StoreError};

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Catalog content is invalid (bad JSON, duplicate ids, out of range scores).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// Product database unreachable or failing.
/// Maps to EX_UNAVAILABLE from sysexits.h.
pub const UNAVAILABLE: i32 = 69;

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let code = err
            .chain()
            .find_map(|cause| {
                if let Some(catalog) = cause.downcast_ref::<CatalogError>() {
                    Some(catalog_code(catalog))
                } else {
                    cause.downcast_ref::<StoreError>().map(store_code)
                }
            })
            .unwrap_or(GENERAL_ERROR);

        Self {
            code,
            message: Some(format!("{err:#}")),
        }
    }
}

fn catalog_code(err: &CatalogError) -> i32 {
    match err {
        CatalogError::Io { .. } => INPUT_ERROR,
        _ => DATA_ERROR,
    }
}

fn store_code(err: &StoreError) -> i32 {
    match err {
        StoreError::Catalog(catalog) => catalog_code(catalog),
        _ => UNAVAILABLE,
    }
}
