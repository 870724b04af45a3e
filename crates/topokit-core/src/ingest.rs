// ── Ingestion: row sets -> Document ──
//
// Permissive by construction. Every row becomes part of the model, values
// that do not parse are dropped, and the only hard failure is an interface
// whose owning node cannot be found. Correctness checks live in `validate`.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::model::{Document, Interface, Network, NetworkDefaults, Node, NodeConfig, NodeId};
use crate::table::rows::cell;
use crate::table::{InterfaceRow, Located, NetworkRow, NodeRow, RowSet, TableKind};

// ── Cell parsers ────────────────────────────────────────────────────

/// Parse an integer cell; absent, blank or non-integer cells yield `None`.
pub fn parse_int(raw: Option<&String>) -> Option<i64> {
    cell(raw).and_then(|s| s.parse().ok())
}

/// Parse a node id cell. Only positive integers count as explicit ids.
pub fn parse_node_id(raw: Option<&String>) -> Option<NodeId> {
    cell(raw)
        .and_then(|s| s.parse::<NodeId>().ok())
        .filter(|&id| id > 0)
}

/// Split a `;`-separated tag list, dropping empty entries.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn text(raw: Option<&String>) -> Option<String> {
    cell(raw).map(str::to_owned)
}

// ── Identity ────────────────────────────────────────────────────────

/// Hands out node ids for rows that do not carry one.
///
/// The counter starts at 1 and only advances when an id is actually handed
/// out. Explicit ids pass through untouched, so an auto-assigned id may
/// collide with a later explicit one; only validation reports that.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: NodeId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, explicit: Option<NodeId>) -> NodeId {
        explicit.unwrap_or_else(|| {
            let id = self.next;
            self.next += 1;
            id
        })
    }
}

/// Lookup table from node id and node name to a slot in a node list.
///
/// Later entries shadow earlier ones under the same key.
#[derive(Debug, Default)]
pub struct NodeIndex {
    by_id: HashMap<NodeId, usize>,
    by_name: HashMap<String, usize>,
}

impl NodeIndex {
    pub fn insert(&mut self, id: NodeId, name: Option<&str>, slot: usize) {
        self.by_id.insert(id, slot);
        if let Some(name) = name {
            self.by_name.insert(name.to_owned(), slot);
        }
    }

    pub fn by_id(&self, id: NodeId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// By id when the row carries one, by name otherwise. An id that
    /// matches nothing does not fall back to the name.
    pub fn resolve(&self, id: Option<NodeId>, name: Option<&str>) -> Option<usize> {
        match id {
            Some(id) => self.by_id(id),
            None => name.and_then(|n| self.by_name(n)),
        }
    }
}

/// How an interface row names its owner.
pub fn node_reference(row: &InterfaceRow) -> String {
    match (cell(row.node_id.as_ref()), cell(row.node_name.as_ref())) {
        (Some(id), Some(name)) => format!("id {id} / name '{name}'"),
        (Some(id), None) => format!("id {id}"),
        (None, Some(name)) => format!("name '{name}'"),
        (None, None) => "(none)".into(),
    }
}

// ── Row conversion ──────────────────────────────────────────────────

fn build_node(id: NodeId, row: &NodeRow) -> Node {
    let mut node = Node::new(
        id,
        cell(row.name.as_ref()).unwrap_or_default(),
        cell(row.kind.as_ref()).unwrap_or_default(),
    );
    node.description = text(row.description.as_ref());
    node.config = NodeConfig::new(
        text(row.template_name.as_ref()),
        text(row.os_type.as_ref()),
        parse_tags(cell(row.tags.as_ref())),
    );
    node
}

fn build_interface(row: &InterfaceRow) -> Interface {
    Interface {
        name: cell(row.name.as_ref()).unwrap_or_default().to_owned(),
        network_id: parse_int(row.network_id.as_ref()),
        ipv4_addr: text(row.ipv4_addr.as_ref()),
        mac_addr: text(row.mac_addr.as_ref()),
    }
}

fn build_network(located: &Located<NetworkRow>) -> Network {
    let row = &located.row;
    let mut net = Network::new(
        parse_int(row.id.as_ref()),
        cell(row.name.as_ref()).unwrap_or_default(),
    );
    if let Some(kind) = cell(row.kind.as_ref()) {
        kind.clone_into(&mut net.kind);
    }
    net.maximum_bandwidth = parse_int(row.maximum_bandwidth.as_ref());
    net.defaults = NetworkDefaults::from_values(row.defaults().map(parse_int));

    if net.id.is_none() && cell(row.id.as_ref()).is_some() {
        tracing::warn!(line = located.line, "dropping non-integer network id");
    }
    net
}

// ── Entry point ─────────────────────────────────────────────────────

/// Build a document from the three row sets.
///
/// Fails only when an interface row resolves to no node, in which case no
/// document is produced at all.
pub fn ingest(rows: &RowSet, schema: impl Into<String>) -> Result<Document, CoreError> {
    let mut ids = IdAllocator::new();
    let mut index = NodeIndex::default();
    let mut nodes = Vec::with_capacity(rows.nodes.len());

    for (slot, located) in rows.nodes.iter().enumerate() {
        let id = ids.assign(parse_node_id(located.row.id.as_ref()));
        let node = build_node(id, &located.row);
        index.insert(id, Some(node.name.as_str()), slot);
        nodes.push(node);
    }

    for located in &rows.interfaces {
        let row = &located.row;
        let slot = index
            .resolve(
                parse_node_id(row.node_id.as_ref()),
                cell(row.node_name.as_ref()),
            )
            .ok_or_else(|| CoreError::UnresolvedNode {
                interface: cell(row.name.as_ref()).unwrap_or_default().to_owned(),
                location: format!("{} line {}", TableKind::Interfaces, located.line),
                reference: node_reference(row),
            })?;
        if let Some(node) = nodes.get_mut(slot) {
            node.interfaces.push(build_interface(row));
        }
    }

    let networks = rows.networks.iter().map(build_network).collect();

    let doc = Document {
        schema: schema.into(),
        nodes,
        networks,
    };
    tracing::debug!(
        nodes = doc.nodes.len(),
        interfaces = doc.interface_count(),
        networks = doc.networks.len(),
        "ingested topology"
    );
    Ok(doc)
}
