// ── Inverse serialization: Document -> tables ──

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{Document, Interface, Network, NetworkDefaults, Node};
use crate::table::{InterfaceRow, NetworkRow, NodeRow, RowSet, Table};

/// Column layout of exported tables.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportStyle {
    /// Every documented column, absent values as empty cells.
    #[default]
    Fixed,
    /// Fixed, with trailing all-empty columns trimmed.
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub style: ExportStyle,
    /// Keep the redundant `node_name` column on interface rows.
    pub include_node_name: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            style: ExportStyle::Fixed,
            include_node_name: true,
        }
    }
}

fn text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn number(value: Option<i64>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

fn node_row(node: &Node) -> NodeRow {
    let config = node.config.as_ref();
    NodeRow {
        id: Some(node.id.to_string()),
        name: text(&node.name),
        kind: text(&node.kind),
        template_name: config.and_then(|c| c.template_name.clone()),
        os_type: config.and_then(|c| c.os_type.clone()),
        tags: config.and_then(|c| text(&c.joined_tags())),
        description: node.description.clone(),
    }
}

fn interface_row(owner: &Node, iface: &Interface) -> InterfaceRow {
    InterfaceRow {
        node_id: Some(owner.id.to_string()),
        node_name: text(&owner.name),
        name: text(&iface.name),
        network_id: number(iface.network_id),
        ipv4_addr: iface.ipv4_addr.clone(),
        mac_addr: iface.mac_addr.clone(),
    }
}

fn network_row(net: &Network) -> NetworkRow {
    let [bandwidth, latency, jitter, loss, corruption, mtu] = net
        .defaults
        .as_ref()
        .map(NetworkDefaults::values)
        .unwrap_or_default()
        .map(number);
    NetworkRow {
        id: number(net.id),
        name: text(&net.name),
        kind: text(&net.kind),
        maximum_bandwidth: number(net.maximum_bandwidth),
        bandwidth,
        latency,
        jitter,
        loss,
        corruption,
        mtu,
    }
}

/// Flatten a document into the three row sets, in document order.
///
/// Interface rows always carry the owning node's id, and its name too.
pub fn row_set(doc: &Document) -> RowSet {
    RowSet::from_rows(
        doc.nodes.iter().map(node_row).collect(),
        doc.nodes
            .iter()
            .flat_map(|n| n.interfaces.iter().map(move |i| interface_row(n, i)))
            .collect(),
        doc.networks.iter().map(network_row).collect(),
    )
}

/// Render a document as the nodes, interfaces and networks tables.
///
/// A document with no interfaces or networks yields header-only tables.
pub fn export(doc: &Document, opts: ExportOptions) -> [Table; 3] {
    let mut tables = row_set(doc).to_tables();
    let [_, interfaces, _] = &mut tables;
    if !opts.include_node_name {
        interfaces.drop_column("node_name");
    }
    if opts.style == ExportStyle::Compact {
        for table in &mut tables {
            table.trim_trailing_empty_columns();
        }
    }
    tracing::debug!(
        style = %opts.style,
        include_node_name = opts.include_node_name,
        "exported tables"
    );
    tables
}

/// Export into `dir`, creating it if needed. Returns the files written.
///
/// All three tables are rendered before any file is touched.
pub fn write_tables(
    doc: &Document,
    opts: ExportOptions,
    dir: &Path,
) -> Result<Vec<PathBuf>, CoreError> {
    let rendered = export(doc, opts)
        .into_iter()
        .map(|table| Ok((dir.join(table.kind.file_name()), table.to_csv_string()?)))
        .collect::<Result<Vec<_>, CoreError>>()?;

    std::fs::create_dir_all(dir).map_err(|source| CoreError::Write {
        path: dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::with_capacity(rendered.len());
    for (path, body) in rendered {
        std::fs::write(&path, body).map_err(|source| CoreError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote table");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::NodeConfig;
    use crate::table::TableKind;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        let mut r1 = Node::new(1, "r1", "router");
        r1.config = NodeConfig::new(None, None, vec!["core".into(), "edge".into()]);
        r1.interfaces.push(Interface {
            name: "eth0".into(),
            network_id: Some(10),
            ipv4_addr: Some("10.0.0.1/24".into()),
            mac_addr: None,
        });
        let mut lan = Network::new(Some(10), "lan");
        lan.defaults = NetworkDefaults::from_values([None, Some(5), None, None, None, None]);
        Document {
            nodes: vec![r1],
            networks: vec![lan],
            ..Document::default()
        }
    }

    #[test]
    fn fixed_keeps_every_column() {
        let [nodes, interfaces, networks] = export(&sample(), ExportOptions::default());
        assert_eq!(nodes.headers, NodeRow::COLUMNS);
        assert_eq!(nodes.rows[0], ["1", "r1", "router", "", "", "core;edge", ""]);
        assert_eq!(interfaces.rows[0], ["1", "r1", "eth0", "10", "10.0.0.1/24", ""]);
        assert_eq!(
            networks.rows[0],
            ["10", "lan", "unmanaged", "", "", "5", "", "", "", ""]
        );
    }

    #[test]
    fn compact_trims_trailing_columns() {
        let opts = ExportOptions {
            style: ExportStyle::Compact,
            include_node_name: false,
        };
        let [nodes, interfaces, networks] = export(&sample(), opts);
        assert_eq!(nodes.headers, ["id", "name", "type", "templateName", "osType", "tags"]);
        assert_eq!(interfaces.headers, ["node_id", "name", "networkId", "ipv4Addr"]);
        assert_eq!(interfaces.rows[0], ["1", "eth0", "10", "10.0.0.1/24"]);
        assert_eq!(networks.headers.last().map(String::as_str), Some("defaults.latency"));
    }

    #[test]
    fn empty_document_gives_header_only_tables() {
        let tables = export(&Document::default(), ExportOptions::default());
        for table in &tables {
            assert!(table.rows.is_empty());
            assert_eq!(table.headers.len(), table.kind.columns().len());
        }
        assert_eq!(tables[1].kind, TableKind::Interfaces);
    }

    #[test]
    fn write_tables_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let written = write_tables(&sample(), ExportOptions::default(), &out).unwrap();
        assert_eq!(written.len(), 3);
        let nodes = std::fs::read_to_string(out.join("nodes.csv")).unwrap();
        assert_eq!(
            nodes,
            "id,name,type,templateName,osType,tags,description\n1,r1,router,,,core;edge,\n"
        );
    }

    #[test]
    fn style_parses_from_lowercase() {
        assert_eq!("compact".parse::<ExportStyle>().unwrap(), ExportStyle::Compact);
        assert_eq!(ExportStyle::Fixed.to_string(), "fixed");
    }
}
