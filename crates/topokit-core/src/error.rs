// ── Core error types ──
//
// Hard failures only. Validation findings are reported through
// `validate::ValidationReport` and never surface here.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid topology document {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Ingestion errors ─────────────────────────────────────────────
    #[error("Interface '{interface}' at {location} refers to unknown node {reference}")]
    UnresolvedNode {
        interface: String,
        location: String,
        reference: String,
    },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
