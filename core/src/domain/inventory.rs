//! Inventory snapshots and the builder that produces them.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::{ListeningProcess, ParsedRecord, PortRange};

// ============================================================================
// Inventory
// ============================================================================

/// A point-in-time, deduplicated set of listening processes.
///
/// Entries are kept sorted by port (then pid) and the `(port, pid)` pair is
/// unique, so two snapshots of an unchanged system compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    processes: Vec<ListeningProcess>,
}

impl Inventory {
    /// Build from entries whose `(port, pid)` keys are already unique.
    fn from_unique(mut processes: Vec<ListeningProcess>) -> Self {
        processes.sort_by_key(|p| p.key());
        Self { processes }
    }

    /// All entries, sorted by port.
    pub fn processes(&self) -> &[ListeningProcess] {
        &self.processes
    }

    /// Iterate entries in port order.
    pub fn iter(&self) -> std::slice::Iter<'_, ListeningProcess> {
        self.processes.iter()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Entries listening on `port`.
    pub fn on_port(&self, port: u16) -> impl Iterator<Item = &ListeningProcess> {
        self.processes.iter().filter(move |p| p.port() == port)
    }

    /// Check whether the snapshot holds the given listener.
    pub fn contains(&self, port: u16, pid: u32) -> bool {
        self.processes.iter().any(|p| p.key() == (port, pid))
    }

    /// The `(port, pid)` key set, used for change detection.
    pub fn keys(&self) -> BTreeSet<(u16, u32)> {
        self.processes.iter().map(ListeningProcess::key).collect()
    }

    /// Compare against an earlier snapshot by key set.
    pub fn diff(&self, previous: &Inventory) -> InventoryDiff {
        let before = previous.keys();
        let after = self.keys();

        InventoryDiff {
            started: self
                .processes
                .iter()
                .filter(|p| !before.contains(&p.key()))
                .cloned()
                .collect(),
            stopped: previous
                .processes
                .iter()
                .filter(|p| !after.contains(&p.key()))
                .cloned()
                .collect(),
        }
    }
}

impl IntoIterator for Inventory {
    type Item = ListeningProcess;
    type IntoIter = std::vec::IntoIter<ListeningProcess>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a ListeningProcess;
    type IntoIter = std::slice::Iter<'a, ListeningProcess>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

// ============================================================================
// InventoryDiff
// ============================================================================

/// Listeners that appeared or disappeared between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryDiff {
    /// Present now, absent before.
    pub started: Vec<ListeningProcess>,
    /// Present before, absent now.
    pub stopped: Vec<ListeningProcess>,
}

impl InventoryDiff {
    pub fn is_empty(&self) -> bool {
        self.started.is_empty() && self.stopped.is_empty()
    }
}

// ============================================================================
// InventoryBuilder
// ============================================================================

/// Filters parsed records into a port range and deduplicates on `(port, pid)`.
///
/// Range validation is not done here: any `PortRange` value is accepted,
/// including a single-port one.
#[derive(Debug, Clone, Copy)]
pub struct InventoryBuilder {
    range: PortRange,
}

impl InventoryBuilder {
    pub fn new(range: PortRange) -> Self {
        Self { range }
    }

    /// Keep in-range records, first occurrence of each `(port, pid)` wins.
    ///
    /// Input order is preserved, which lets callers resolve names only for
    /// the records that survive.
    pub fn select(&self, records: impl IntoIterator<Item = ParsedRecord>) -> Vec<ParsedRecord> {
        let mut seen: HashSet<(u16, u32)> = HashSet::new();

        records
            .into_iter()
            .filter(|r| self.range.contains(r.port))
            .filter(|r| seen.insert(r.key()))
            .collect()
    }

    /// Build an inventory, labelling unnamed records `PID-<pid>`.
    pub fn build(&self, records: impl IntoIterator<Item = ParsedRecord>) -> Inventory {
        let processes = self
            .select(records)
            .into_iter()
            .map(|mut record| {
                let name = record
                    .name
                    .take()
                    .unwrap_or_else(|| ListeningProcess::placeholder_name(record.pid));
                ListeningProcess::from_record(record, name)
            })
            .collect();

        Inventory::from_unique(processes)
    }

    /// Assemble an inventory from records that already went through
    /// [`select`](Self::select), paired with their resolved names.
    pub fn assemble(&self, named: impl IntoIterator<Item = (ParsedRecord, String)>) -> Inventory {
        let mut seen: HashSet<(u16, u32)> = HashSet::new();

        let processes = named
            .into_iter()
            .filter(|(record, _)| self.range.contains(record.port) && seen.insert(record.key()))
            .map(|(record, name)| ListeningProcess::from_record(record, name))
            .collect();

        Inventory::from_unique(processes)
    }
}
