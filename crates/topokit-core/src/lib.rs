// topokit-core: Topology model and the pipeline around it.
//
// Rows come in through `table`, become a `Document` through `ingest`, are
// checked by `validate`, go back out to rows through `export`, and are
// compared for semantic equivalence by `compare`.

pub mod compare;
pub mod error;
pub mod export;
pub mod ingest;
pub mod model;
pub mod table;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use compare::{Comparison, OrderPolicy};
pub use error::CoreError;
pub use export::{ExportOptions, ExportStyle};
pub use ingest::ingest;
pub use table::{Located, RowSet, Table, TableKind, TablePaths};
pub use validate::{Issue, IssueKind, RowRef, Severity, ValidationReport};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    DEFAULT_SCHEMA, Document, Interface, Ipv4Cidr, MacAddr, Network, NetworkDefaults, NetworkId,
    Node, NodeConfig, NodeId,
};
