// ── Lenient deserializers for documents written by other producers ──

use serde::{Deserialize, Deserializer};

use super::node::NodeConfig;

/// Deserialize an optional string, treating `""` (after trimming) like `null`.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Joined(String),
}

/// Deserialize `tags` from either a list of strings or a `;`-joined string.
pub(crate) fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TagsRepr>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(TagsRepr::Joined(s)) => crate::ingest::parse_tags(Some(s.as_str())),
        Some(TagsRepr::List(items)) => items
            .into_iter()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .collect(),
    })
}

/// Deserialize a `config` block, treating one with no non-empty field like `null`.
pub(crate) fn node_config<'de, D>(deserializer: D) -> Result<Option<NodeConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NodeConfig>::deserialize(deserializer)?.filter(|cfg| !cfg.is_empty()))
}
