// ── Tabular side of the pipeline ──
//
// `RowSet` is what gets read from (or reconstructed as) the three CSV
// tables; `Table` is a plain header + string grid ready to be written.

pub mod rows;

mod io;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use io::{read_rows, read_rows_from};
pub use rows::{InterfaceRow, NetworkRow, NodeRow};

use crate::error::CoreError;

/// Which of the three input tables a row belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TableKind {
    Nodes,
    Interfaces,
    Networks,
}

impl TableKind {
    /// Full documented column set, in order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Nodes => &NodeRow::COLUMNS,
            Self::Interfaces => &InterfaceRow::COLUMNS,
            Self::Networks => &NetworkRow::COLUMNS,
        }
    }

    /// Conventional file name used by `export`.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Nodes => "nodes.csv",
            Self::Interfaces => "interfaces.csv",
            Self::Networks => "networks.csv",
        }
    }
}

/// A row together with the line it came from (the header is line 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<T> {
    pub line: u64,
    pub row: T,
}

impl<T> Located<T> {
    pub fn new(line: u64, row: T) -> Self {
        Self { line, row }
    }

    /// Number rows as they would appear in a file: first data row is line 2.
    pub fn enumerate(rows: impl IntoIterator<Item = T>) -> Vec<Self> {
        (2..).zip(rows).map(|(line, row)| Self::new(line, row)).collect()
    }
}

/// Locations of the three input tables.
#[derive(Debug, Clone)]
pub struct TablePaths {
    pub nodes: PathBuf,
    pub interfaces: PathBuf,
    pub networks: PathBuf,
}

impl TablePaths {
    /// The three conventional file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            nodes: dir.join(TableKind::Nodes.file_name()),
            interfaces: dir.join(TableKind::Interfaces.file_name()),
            networks: dir.join(TableKind::Networks.file_name()),
        }
    }
}

/// The three row sets of one topology, read wholly into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    pub nodes: Vec<Located<NodeRow>>,
    pub interfaces: Vec<Located<InterfaceRow>>,
    pub networks: Vec<Located<NetworkRow>>,
}

impl RowSet {
    pub fn read(paths: &TablePaths) -> Result<Self, CoreError> {
        let set = Self {
            nodes: read_rows(&paths.nodes)?,
            interfaces: read_rows(&paths.interfaces)?,
            networks: read_rows(&paths.networks)?,
        };
        tracing::debug!(
            nodes = set.nodes.len(),
            interfaces = set.interfaces.len(),
            networks = set.networks.len(),
            "read row sets"
        );
        Ok(set)
    }

    /// Build a row set from unlocated rows, numbering them like a file would.
    pub fn from_rows(
        nodes: Vec<NodeRow>,
        interfaces: Vec<InterfaceRow>,
        networks: Vec<NetworkRow>,
    ) -> Self {
        Self {
            nodes: Located::enumerate(nodes),
            interfaces: Located::enumerate(interfaces),
            networks: Located::enumerate(networks),
        }
    }

    /// Render as full-width tables (every documented column).
    pub fn to_tables(&self) -> [Table; 3] {
        [
            Table::new(
                TableKind::Nodes,
                self.nodes.iter().map(|r| r.row.record()).collect(),
            ),
            Table::new(
                TableKind::Interfaces,
                self.interfaces.iter().map(|r| r.row.record()).collect(),
            ),
            Table::new(
                TableKind::Networks,
                self.networks.iter().map(|r| r.row.record()).collect(),
            ),
        ]
    }
}

/// A header row plus string cells, ready to be written as CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub kind: TableKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// A table carrying the full column set of `kind`.
    pub fn new(kind: TableKind, rows: Vec<Vec<String>>) -> Self {
        Self {
            kind,
            headers: kind.columns().iter().map(|&c| c.to_owned()).collect(),
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Remove a column by header name. Returns whether it was present.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.headers.remove(idx);
        for row in &mut self.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
        true
    }

    /// Trim trailing columns that are empty in every row.
    ///
    /// Scans right to left and stops, inclusive, at the first column holding
    /// any non-empty cell. At least the first column always survives, so the
    /// table is never headerless.
    pub fn trim_trailing_empty_columns(&mut self) {
        let keep = (0..self.headers.len())
            .rev()
            .find(|&idx| {
                self.rows
                    .iter()
                    .any(|row| row.get(idx).is_some_and(|c| !c.is_empty()))
            })
            .map_or(1, |idx| idx + 1)
            .min(self.headers.len());

        self.headers.truncate(keep);
        for row in &mut self.rows {
            row.truncate(keep);
        }
    }

    pub fn to_csv_string(&self) -> Result<String, CoreError> {
        io::table_to_string(self)
    }
}
