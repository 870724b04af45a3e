// ── Node and interface domain types ──

use serde::{Deserialize, Serialize};

use super::de;
use super::network::NetworkId;

/// Node identifier. Always positive once ingested.
pub type NodeId = u64;

/// Optional per-node provisioning hints.
///
/// Only built through [`NodeConfig::new`], which refuses to produce a block
/// with nothing in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::blank_as_none"
    )]
    pub template_name: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::blank_as_none"
    )]
    pub os_type: Option<String>,

    /// Set semantics, stored in input order.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "de::tags"
    )]
    pub tags: Vec<String>,
}

impl NodeConfig {
    /// Build a config block, or `None` when every field is empty.
    pub fn new(
        template_name: Option<String>,
        os_type: Option<String>,
        tags: Vec<String>,
    ) -> Option<Self> {
        let cfg = Self {
            template_name,
            os_type,
            tags,
        };
        (!cfg.is_empty()).then_some(cfg)
    }

    pub fn is_empty(&self) -> bool {
        self.template_name.is_none() && self.os_type.is_none() && self.tags.is_empty()
    }

    /// Tags re-joined into their tabular form.
    pub fn joined_tags(&self) -> String {
        self.tags.join(";")
    }
}

/// A network interface, owned by exactly one [`Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    #[serde(default)]
    pub name: String,

    /// Weak reference into the network id space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<NetworkId>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::blank_as_none"
    )]
    pub ipv4_addr: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::blank_as_none"
    )]
    pub mac_addr: Option<String>,
}

/// The canonical Node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    /// Owned interfaces, in input row order.
    #[serde(default)]
    pub interfaces: Vec<Interface>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::blank_as_none"
    )]
    pub description: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::node_config"
    )]
    pub config: Option<NodeConfig>,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            interfaces: Vec::new(),
            description: None,
            config: None,
        }
    }
}
