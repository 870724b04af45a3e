// ── Raw tabular rows ──
//
// One struct per input table, every cell kept as the optional string it
// was read as. Nothing here is interpreted: ingestion and validation each
// read these rows independently.

use serde::{Deserialize, Serialize};

/// Trimmed, non-empty contents of a cell.
pub fn cell(raw: Option<&String>) -> Option<&str> {
    raw.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn owned(value: Option<&str>) -> String {
    value.unwrap_or_default().to_owned()
}

/// A row of the nodes table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "templateName", default)]
    pub template_name: Option<String>,
    #[serde(rename = "osType", default)]
    pub os_type: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NodeRow {
    pub const COLUMNS: [&'static str; 7] = [
        "id",
        "name",
        "type",
        "templateName",
        "osType",
        "tags",
        "description",
    ];

    /// Cells in [`Self::COLUMNS`] order, absent cells as `""`.
    pub fn record(&self) -> Vec<String> {
        [
            &self.id,
            &self.name,
            &self.kind,
            &self.template_name,
            &self.os_type,
            &self.tags,
            &self.description,
        ]
        .into_iter()
        .map(|c| owned(cell(c.as_ref())))
        .collect()
    }
}

/// A row of the interfaces table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRow {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "networkId", default)]
    pub network_id: Option<String>,
    #[serde(rename = "ipv4Addr", default)]
    pub ipv4_addr: Option<String>,
    #[serde(rename = "macAddr", default)]
    pub mac_addr: Option<String>,
}

impl InterfaceRow {
    pub const COLUMNS: [&'static str; 6] = [
        "node_id",
        "node_name",
        "name",
        "networkId",
        "ipv4Addr",
        "macAddr",
    ];

    pub fn record(&self) -> Vec<String> {
        [
            &self.node_id,
            &self.node_name,
            &self.name,
            &self.network_id,
            &self.ipv4_addr,
            &self.mac_addr,
        ]
        .into_iter()
        .map(|c| owned(cell(c.as_ref())))
        .collect()
    }
}

/// A row of the networks table. The six `defaults.*` columns are flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "maximumBandwidth", default)]
    pub maximum_bandwidth: Option<String>,
    #[serde(rename = "defaults.bandwidth", default)]
    pub bandwidth: Option<String>,
    #[serde(rename = "defaults.latency", default)]
    pub latency: Option<String>,
    #[serde(rename = "defaults.jitter", default)]
    pub jitter: Option<String>,
    #[serde(rename = "defaults.loss", default)]
    pub loss: Option<String>,
    #[serde(rename = "defaults.corruption", default)]
    pub corruption: Option<String>,
    #[serde(rename = "defaults.mtu", default)]
    pub mtu: Option<String>,
}

impl NetworkRow {
    pub const COLUMNS: [&'static str; 10] = [
        "id",
        "name",
        "type",
        "maximumBandwidth",
        "defaults.bandwidth",
        "defaults.latency",
        "defaults.jitter",
        "defaults.loss",
        "defaults.corruption",
        "defaults.mtu",
    ];

    /// The `defaults.*` cells in `NetworkDefaults::FIELDS` order.
    pub fn defaults(&self) -> [Option<&String>; 6] {
        [
            self.bandwidth.as_ref(),
            self.latency.as_ref(),
            self.jitter.as_ref(),
            self.loss.as_ref(),
            self.corruption.as_ref(),
            self.mtu.as_ref(),
        ]
    }

    pub fn record(&self) -> Vec<String> {
        let mut out = vec![
            owned(cell(self.id.as_ref())),
            owned(cell(self.name.as_ref())),
            owned(cell(self.kind.as_ref())),
            owned(cell(self.maximum_bandwidth.as_ref())),
        ];
        out.extend(self.defaults().into_iter().map(|c| owned(cell(c))));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_trims_and_drops_blank() {
        assert_eq!(cell(Some(&"  r1 ".to_owned())), Some("r1"));
        assert_eq!(cell(Some(&"   ".to_owned())), None);
        assert_eq!(cell(None), None);
    }

    #[test]
    fn records_follow_column_order() {
        let row = NetworkRow {
            id: Some("10".into()),
            name: Some("lan".into()),
            mtu: Some("1500".into()),
            ..NetworkRow::default()
        };
        let record = row.record();
        assert_eq!(record.len(), NetworkRow::COLUMNS.len());
        assert_eq!(record[0], "10");
        assert_eq!(record[9], "1500");
        assert!(record[2..9].iter().all(String::is_empty));
    }
}
