// ── Validation over raw rows ──
//
// Three passes (nodes, networks, interfaces) over the same row set, each
// pushing into one shared report. No pass stops early: every row is
// scanned and every violation is reported in a single run. Rows are never
// modified.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::ingest::{IdAllocator, NodeIndex};
use crate::model::{Document, Ipv4Cidr, MacAddr, NetworkDefaults, NetworkId, NodeId};
use crate::table::rows::cell;
use crate::table::{RowSet, TableKind};

// ── Report types ────────────────────────────────────────────────────

/// Flat taxonomy of findings. Each kind carries a fixed severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum IssueKind {
    /// A required field is missing or malformed.
    StructuralError,
    /// An interface points at a node or network that does not exist.
    ReferentialError,
    /// Id collision, or an interface name repeated within one node.
    DuplicateError,
    /// Node or network name collision.
    DuplicateWarning,
    /// Malformed CIDR or MAC address.
    FormatError,
    /// A value that ingestion will silently drop or override.
    IgnoredValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::DuplicateWarning | Self::IgnoredValue => Severity::Warning,
            Self::StructuralError
            | Self::ReferentialError
            | Self::DuplicateError
            | Self::FormatError => Severity::Error,
        }
    }
}

/// Source row locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRef {
    pub table: TableKind,
    pub line: u64,
}

impl RowRef {
    pub fn new(table: TableKind, line: u64) -> Self {
        Self { table, line }
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line {}", self.table, self.line)
    }
}

/// A single finding: what kind, where, and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub location: RowRef,
    pub message: String,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Errors and warnings, each in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    pub fn push(&mut self, kind: IssueKind, location: RowRef, message: impl Into<String>) {
        let issue = Issue {
            kind,
            location,
            message: message.into(),
        };
        match kind.severity() {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// No errors. Warnings never make a report invalid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors first, then warnings.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(&self.warnings)
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues().filter(|i| i.kind == kind).count()
    }

    /// E.g. `2 errors, 1 warning`.
    pub fn summary(&self) -> String {
        fn plural(n: usize, word: &str) -> String {
            if n == 1 {
                format!("{n} {word}")
            } else {
                format!("{n} {word}s")
            }
        }
        format!(
            "{}, {}",
            plural(self.errors.len(), "error"),
            plural(self.warnings.len(), "warning")
        )
    }
}

// ── Entry points ────────────────────────────────────────────────────

/// Validate three row sets.
pub fn validate(rows: &RowSet) -> ValidationReport {
    let mut v = Validator::new(rows);
    v.node_pass();
    v.network_pass();
    v.interface_pass();
    tracing::debug!(
        errors = v.report.errors.len(),
        warnings = v.report.warnings.len(),
        "validation finished"
    );
    v.report
}

/// Validate a canonical document by checking its fixed-mode rows.
///
/// Locators refer to the rows the document would export to.
pub fn validate_document(doc: &Document) -> ValidationReport {
    validate(&crate::export::row_set(doc))
}

// ── Passes ──────────────────────────────────────────────────────────

struct Validator<'a> {
    rows: &'a RowSet,
    report: ValidationReport,
    nodes: NodeIndex,
    /// Effective id and name of every node row, by slot.
    node_labels: Vec<(NodeId, Option<&'a str>)>,
    network_ids: HashSet<NetworkId>,
}

impl<'a> Validator<'a> {
    fn new(rows: &'a RowSet) -> Self {
        Self {
            rows,
            report: ValidationReport::default(),
            nodes: NodeIndex::default(),
            node_labels: Vec::with_capacity(rows.nodes.len()),
            network_ids: HashSet::new(),
        }
    }

    fn node_pass(&mut self) {
        let mut ids = IdAllocator::new();
        let mut seen_ids: HashMap<NodeId, u64> = HashMap::new();
        let mut seen_names: HashMap<&str, u64> = HashMap::new();

        let rows = self.rows;
        for (slot, located) in rows.nodes.iter().enumerate() {
            let at = RowRef::new(TableKind::Nodes, located.line);
            let row = &located.row;
            let name = cell(row.name.as_ref());

            if name.is_none() {
                self.report
                    .push(IssueKind::StructuralError, at, "node name is required");
            }
            if cell(row.kind.as_ref()).is_none() {
                self.report
                    .push(IssueKind::StructuralError, at, "node type is required");
            }

            let explicit = cell(row.id.as_ref()).and_then(|raw| match raw.parse::<NodeId>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    self.report.push(
                        IssueKind::StructuralError,
                        at,
                        format!("node id '{raw}' is not a positive integer"),
                    );
                    None
                }
            });
            let id = ids.assign(explicit);

            if let Some(first) = seen_ids.get(&id) {
                let origin = if explicit.is_some() { "" } else { " (auto-assigned)" };
                self.report.push(
                    IssueKind::DuplicateError,
                    at,
                    format!("duplicate node id {id}{origin}, first used on line {first}"),
                );
            } else {
                seen_ids.insert(id, located.line);
            }

            if let Some(name) = name {
                if let Some(first) = seen_names.get(name) {
                    self.report.push(
                        IssueKind::DuplicateWarning,
                        at,
                        format!("duplicate node name '{name}', first used on line {first}"),
                    );
                } else {
                    seen_names.insert(name, located.line);
                }
            }

            self.nodes.insert(id, name, slot);
            self.node_labels.push((id, name));
        }
    }

    fn network_pass(&mut self) {
        let mut seen_ids: HashMap<NetworkId, u64> = HashMap::new();
        let mut seen_names: HashMap<&str, u64> = HashMap::new();

        let rows = self.rows;
        for located in &rows.networks {
            let at = RowRef::new(TableKind::Networks, located.line);
            let row = &located.row;

            match cell(row.id.as_ref()) {
                None => self
                    .report
                    .push(IssueKind::StructuralError, at, "network id is required"),
                Some(raw) => match raw.parse::<NetworkId>() {
                    Err(_) => self.report.push(
                        IssueKind::StructuralError,
                        at,
                        format!("network id '{raw}' is not an integer"),
                    ),
                    Ok(id) => {
                        if let Some(first) = seen_ids.get(&id) {
                            self.report.push(
                                IssueKind::DuplicateError,
                                at,
                                format!("duplicate network id {id}, first used on line {first}"),
                            );
                        } else {
                            seen_ids.insert(id, located.line);
                        }
                        self.network_ids.insert(id);
                    }
                },
            }

            match cell(row.name.as_ref()) {
                None => self
                    .report
                    .push(IssueKind::StructuralError, at, "network name is required"),
                Some(name) => {
                    if let Some(first) = seen_names.get(name) {
                        self.report.push(
                            IssueKind::DuplicateWarning,
                            at,
                            format!("duplicate network name '{name}', first used on line {first}"),
                        );
                    } else {
                        seen_names.insert(name, located.line);
                    }
                }
            }

            let numeric = std::iter::once(("maximumBandwidth", row.maximum_bandwidth.as_ref()))
                .chain(NetworkDefaults::FIELDS.into_iter().zip(row.defaults()));
            for (column, raw) in numeric {
                if let Some(raw) = cell(raw) {
                    if raw.parse::<i64>().is_err() {
                        let column = if column == "maximumBandwidth" {
                            column.to_owned()
                        } else {
                            format!("defaults.{column}")
                        };
                        self.report.push(
                            IssueKind::IgnoredValue,
                            at,
                            format!("{column} '{raw}' is not an integer and will be ignored"),
                        );
                    }
                }
            }
        }
    }

    /// Resolve the owning node of an interface row, reporting what fails.
    fn resolve_owner(
        &mut self,
        at: RowRef,
        node_id: Option<&str>,
        node_name: Option<&str>,
    ) -> Option<usize> {
        let explicit = node_id.and_then(|raw| match raw.parse::<NodeId>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                self.report.push(
                    IssueKind::StructuralError,
                    at,
                    format!("node_id '{raw}' is not a positive integer"),
                );
                None
            }
        });

        match (explicit, node_name) {
            (Some(id), name) => {
                let Some(slot) = self.nodes.by_id(id) else {
                    self.report.push(
                        IssueKind::ReferentialError,
                        at,
                        format!("node_id {id} does not match any node"),
                    );
                    return None;
                };
                let owner_name = self.node_labels.get(slot).and_then(|(_, n)| *n);
                if let Some(name) = name {
                    if owner_name != Some(name) {
                        self.report.push(
                            IssueKind::IgnoredValue,
                            at,
                            format!(
                                "node_name '{name}' ignored: node_id {id} refers to '{}'",
                                owner_name.unwrap_or_default()
                            ),
                        );
                    }
                }
                Some(slot)
            }
            (None, Some(name)) => {
                let slot = self.nodes.by_name(name);
                if slot.is_none() {
                    self.report.push(
                        IssueKind::ReferentialError,
                        at,
                        format!("node_name '{name}' does not match any node"),
                    );
                }
                slot
            }
            (None, None) => {
                if node_id.is_none() {
                    self.report.push(
                        IssueKind::StructuralError,
                        at,
                        "interface must reference its node through node_id or node_name",
                    );
                }
                None
            }
        }
    }

    fn interface_pass(&mut self) {
        let mut seen: HashMap<(usize, &str), u64> = HashMap::new();

        let rows = self.rows;
        for located in &rows.interfaces {
            let at = RowRef::new(TableKind::Interfaces, located.line);
            let row = &located.row;

            let owner = self.resolve_owner(
                at,
                cell(row.node_id.as_ref()),
                cell(row.node_name.as_ref()),
            );

            let name = cell(row.name.as_ref());
            if name.is_none() {
                self.report
                    .push(IssueKind::StructuralError, at, "interface name is required");
            }

            if let (Some(slot), Some(name)) = (owner, name) {
                if let Some(first) = seen.get(&(slot, name)) {
                    let (id, node_name) = self.node_labels.get(slot).copied().unwrap_or_default();
                    self.report.push(
                        IssueKind::DuplicateError,
                        at,
                        format!(
                            "duplicate interface '{name}' on node {id} ('{}'), first used on line {first}",
                            node_name.unwrap_or_default()
                        ),
                    );
                } else {
                    seen.insert((slot, name), located.line);
                }
            }

            if let Some(raw) = cell(row.network_id.as_ref()) {
                match raw.parse::<NetworkId>() {
                    Err(_) => self.report.push(
                        IssueKind::StructuralError,
                        at,
                        format!("networkId '{raw}' is not an integer"),
                    ),
                    Ok(id) if !self.network_ids.contains(&id) => self.report.push(
                        IssueKind::ReferentialError,
                        at,
                        format!("networkId {id} does not match any network"),
                    ),
                    Ok(_) => {}
                }
            }

            if let Some(raw) = cell(row.ipv4_addr.as_ref()) {
                if let Err(e) = raw.parse::<Ipv4Cidr>() {
                    self.report
                        .push(IssueKind::FormatError, at, format!("ipv4Addr: {e}"));
                }
            }

            if let Some(raw) = cell(row.mac_addr.as_ref()) {
                if let Err(e) = raw.parse::<MacAddr>() {
                    self.report
                        .push(IssueKind::FormatError, at, format!("macAddr: {e}"));
                }
            }
        }
    }
}
