// ── Network domain types ──

use serde::{Deserialize, Serialize};

use super::de;

/// Network identifier.
pub type NetworkId = i64;

/// Network type used when a row does not name one.
const DEFAULT_NETWORK_TYPE: &str = "unmanaged";

fn default_network_type() -> String {
    DEFAULT_NETWORK_TYPE.into()
}

/// Link characteristics applied to every interface on a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corruption: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i64>,
}

impl NetworkDefaults {
    /// Field names, in column order.
    pub const FIELDS: [&'static str; 6] =
        ["bandwidth", "latency", "jitter", "loss", "corruption", "mtu"];

    /// Build a defaults block from values in [`Self::FIELDS`] order, or
    /// `None` when all of them are absent.
    pub fn from_values(values: [Option<i64>; 6]) -> Option<Self> {
        let [bandwidth, latency, jitter, loss, corruption, mtu] = values;
        let defaults = Self {
            bandwidth,
            latency,
            jitter,
            loss,
            corruption,
            mtu,
        };
        (!defaults.is_empty()).then_some(defaults)
    }

    /// Values in [`Self::FIELDS`] order.
    pub fn values(&self) -> [Option<i64>; 6] {
        [
            self.bandwidth,
            self.latency,
            self.jitter,
            self.loss,
            self.corruption,
            self.mtu,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(Option::is_none)
    }
}

/// The canonical Network type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Required by validation, tolerated as absent by ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NetworkId>,

    #[serde(default)]
    pub name: String,

    #[serde(
        rename = "type",
        default = "default_network_type",
        deserialize_with = "network_type"
    )]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_bandwidth: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<NetworkDefaults>,
}

fn network_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(de::blank_as_none(deserializer)?.unwrap_or_else(default_network_type))
}

impl Network {
    pub fn new(id: Option<NetworkId>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: default_network_type(),
            maximum_bandwidth: None,
            defaults: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_type_defaults_to_unmanaged() {
        let net: Network = serde_json::from_str(r#"{"id": 10, "name": "lan"}"#).unwrap();
        assert_eq!(net.kind, "unmanaged");

        let net: Network =
            serde_json::from_str(r#"{"id": 10, "name": "lan", "type": null}"#).unwrap();
        assert_eq!(net.kind, "unmanaged");
    }

    #[test]
    fn defaults_block_only_when_something_is_set() {
        assert!(NetworkDefaults::from_values([None; 6]).is_none());

        let d = NetworkDefaults::from_values([None, Some(20), None, None, None, Some(1500)])
            .unwrap();
        assert_eq!(d.latency, Some(20));
        assert_eq!(d.mtu, Some(1500));
        assert_eq!(
            serde_json::to_value(d).unwrap(),
            serde_json::json!({"latency": 20, "mtu": 1500})
        );
    }
}
