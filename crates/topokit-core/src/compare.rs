// ── Semantic comparison of topology documents ──
//
// Works on the raw JSON tree rather than the typed model, so documents from
// other producers (different key order, optional fields spelled as null or
// "", tags as a string or a list) can be compared as-is.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::ingest::parse_tags;
use crate::model::NetworkDefaults;

/// Whether the order of entity lists matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderPolicy {
    /// `nodes`, `networks` and `interfaces` compare position by position.
    #[default]
    Strict,
    /// Entity lists compare as multisets.
    Unordered,
}

impl OrderPolicy {
    pub fn from_ignore_order(ignore_order: bool) -> Self {
        if ignore_order {
            Self::Unordered
        } else {
            Self::Strict
        }
    }
}

const ENTITY_LISTS: [&str; 3] = ["nodes", "networks", "interfaces"];

/// Normalize a document tree so that representation-only differences vanish.
///
/// - `null`, blank strings, empty lists and empty objects are dropped;
/// - `tags` become a sorted list of distinct non-empty strings;
/// - a present `defaults` object always carries its six fields, empty ones
///   as `null`, and is never dropped;
/// - under [`OrderPolicy::Unordered`] entity lists are sorted.
pub fn normalize(value: &Value, policy: OrderPolicy) -> Value {
    normalize_in(value, None, policy).unwrap_or(Value::Null)
}

/// `None` means empty-equivalent.
fn normalize_in(value: &Value, key: Option<&str>, policy: OrderPolicy) -> Option<Value> {
    match (key, value) {
        (Some("tags"), _) => return normalize_tags(value),
        (Some("defaults"), Value::Object(map)) => return Some(normalize_defaults(map, policy)),
        _ => {}
    }

    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Object(map) => {
            let out: Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| {
                    normalize_in(v, Some(k.as_str()), policy).map(|v| (k.clone(), v))
                })
                .collect();
            (!out.is_empty()).then_some(Value::Object(out))
        }
        Value::Array(items) => {
            let mut out: Vec<Value> = items
                .iter()
                .map(|v| normalize_in(v, None, policy).unwrap_or(Value::Null))
                .collect();
            if policy == OrderPolicy::Unordered && key.is_some_and(|k| ENTITY_LISTS.contains(&k)) {
                out.sort_by_cached_key(Value::to_string);
            }
            (!out.is_empty()).then_some(Value::Array(out))
        }
        other => Some(other.clone()),
    }
}

fn normalize_tags(value: &Value) -> Option<Value> {
    let mut tags: Vec<String> = match value {
        Value::String(s) => parse_tags(Some(s.as_str())),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.trim().to_owned()),
                other => Some(other.to_string()),
            })
            .filter(|t| !t.is_empty())
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    };
    tags.sort();
    tags.dedup();
    (!tags.is_empty()).then(|| Value::Array(tags.into_iter().map(Value::String).collect()))
}

fn normalize_defaults(map: &Map<String, Value>, policy: OrderPolicy) -> Value {
    let mut out = Map::new();
    for field in NetworkDefaults::FIELDS {
        let value = map
            .get(field)
            .and_then(|v| normalize_in(v, Some(field), policy))
            .unwrap_or(Value::Null);
        out.insert(field.to_owned(), value);
    }
    for (k, v) in map {
        if !out.contains_key(k) {
            if let Some(v) = normalize_in(v, Some(k.as_str()), policy) {
                out.insert(k.clone(), v);
            }
        }
    }
    Value::Object(out)
}

/// Outcome of comparing two documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub equivalent: bool,
    /// Normalized left tree.
    pub left: Value,
    /// Normalized right tree.
    pub right: Value,
}

impl Comparison {
    /// Unified line diff of the two normalized trees, or `None` when they
    /// are equivalent.
    pub fn diff(&self, left_label: &str, right_label: &str) -> Option<String> {
        if self.equivalent {
            return None;
        }
        let left = pretty(&self.left);
        let right = pretty(&self.right);
        let diff = similar::TextDiff::from_lines(&left, &right);
        Some(
            diff.unified_diff()
                .context_radius(3)
                .header(left_label, right_label)
                .to_string(),
        )
    }
}

fn pretty(value: &Value) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    out.push('\n');
    out
}

/// Compare two document trees under the given order policy.
pub fn compare(left: &Value, right: &Value, policy: OrderPolicy) -> Comparison {
    let left = normalize(left, policy);
    let right = normalize(right, policy);
    let equivalent = left == right;
    tracing::debug!(equivalent, ?policy, "compared documents");
    Comparison {
        equivalent,
        left,
        right,
    }
}

/// Read a file as an untyped JSON tree.
pub fn load_value(path: &Path) -> Result<Value, CoreError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CoreError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn compare_files(
    left: &Path,
    right: &Path,
    policy: OrderPolicy,
) -> Result<Comparison, CoreError> {
    Ok(compare(&load_value(left)?, &load_value(right)?, policy))
}
