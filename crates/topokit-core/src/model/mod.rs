// ── Topology domain model ──
//
// The canonical in-memory representation of a topology. Field names on
// the wire follow the document format (camelCase, `type`, `$schema`);
// optional values that are empty are never stored.

pub mod address;
pub mod document;
pub mod network;
pub mod node;

mod de;

// ── Re-exports ──────────────────────────────────────────────────────

pub use address::{AddressError, Ipv4Cidr, MacAddr};
pub use document::{DEFAULT_SCHEMA, Document};
pub use network::{NetworkDefaults, Network, NetworkId};
pub use node::{Interface, Node, NodeConfig, NodeId};
