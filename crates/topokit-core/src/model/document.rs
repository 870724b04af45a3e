// ── Topology document: the unit of serialization and comparison ──

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::network::Network;
use super::node::Node;
use crate::error::CoreError;

/// Schema reference written when the caller does not supply one.
pub const DEFAULT_SCHEMA: &str = "https://portal.mipn.co.uk/topologyschema-01/schema#";

fn default_schema() -> String {
    DEFAULT_SCHEMA.into()
}

/// Root aggregate: schema reference, nodes (with their interfaces) and networks.
///
/// The schema string is carried through verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$schema", default = "default_schema")]
    pub schema: String,

    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub networks: Vec<Network>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            nodes: Vec::new(),
            networks: Vec::new(),
        }
    }
}

impl Document {
    pub fn interface_count(&self) -> usize {
        self.nodes.iter().map(|n| n.interfaces.len()).sum()
    }

    // ── Forward serialization ────────────────────────────────────────

    /// Render the canonical form: two-space indented JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|source| CoreError::Json {
            path: origin.to_owned(),
            source,
        })
    }

    /// Load a canonical document from disk.
    pub fn read(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw, &path.display().to_string())
    }

    /// Serialize fully in memory, then write in one call, so a failure
    /// never leaves a half-written document behind.
    pub fn write(&self, path: &Path) -> Result<(), CoreError> {
        let rendered = self.to_json_pretty().map_err(|source| CoreError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, rendered).map_err(|source| CoreError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            nodes = self.nodes.len(),
            networks = self.networks.len(),
            "wrote topology document"
        );
        Ok(())
    }
}
