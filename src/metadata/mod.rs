//! # Signal Metadata
//!
//! Classifies the variables of a DAE dump by naming convention and extracts
//! the metadata each signal exchange role needs:
//!
//! - **Read / Overwrite** blocks yield an [`InstanceRecord`] (unit, description
//!   and, for overwrites, bounds) keyed by the block's basename.
//! - **KPI** signals are grouped by category, zone-scoped categories being
//!   parameterized with the zone they belong to.

mod instance;
mod kpi;

pub use instance::extract_instance;
pub use kpi::{extract_kpi, resolve_zone, ZONE_SCOPED_CATEGORIES};

use crate::error::Result;
use crate::tree::Document;
use indexmap::IndexMap;
use serde::Serialize;

const READ_MARKER: &str = "boptestRead";
const OVERWRITE_MARKER: &str = "boptestOverwrite";
const KPI_MARKER: &str = "KPIs";

/// Direction of a signal exchange block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeKind {
    Read,
    Overwrite,
}

impl ExchangeKind {
    /// Suffix of the block's signal node (`.y` for reads, `.u` for overwrites)
    pub fn signal_suffix(self) -> &'static str {
        match self {
            ExchangeKind::Read => ".y",
            ExchangeKind::Overwrite => ".u",
        }
    }
}

/// Role of a variable in the signal exchange contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalRole {
    Exchange(ExchangeKind),
    Kpi,
}

impl SignalRole {
    /// Classify a variable by its dotted name.
    ///
    /// Markers are tested in a fixed order (read, overwrite, KPI) and the first
    /// match wins. Returns `None` for variables outside the contract.
    pub fn classify(name: &str) -> Option<Self> {
        if name.contains(READ_MARKER) {
            Some(SignalRole::Exchange(ExchangeKind::Read))
        } else if name.contains(OVERWRITE_MARKER) {
            Some(SignalRole::Exchange(ExchangeKind::Overwrite))
        } else if name.contains(KPI_MARKER) {
            Some(SignalRole::Kpi)
        } else {
            None
        }
    }
}

/// Metadata of one Read or Overwrite block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceRecord {
    pub unit: String,
    pub description: String,
    /// Present only for overwrite blocks
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// Basename -> record, in first-seen order
pub type InstanceMap = IndexMap<String, InstanceRecord>;

/// Category key -> generated output identifiers, in first-seen order
pub type SignalGroups = IndexMap<String, Vec<String>>;

/// The Overwrite and Read instance maps
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instances {
    pub overwrite: InstanceMap,
    pub read: InstanceMap,
}

impl Instances {
    fn map_mut(&mut self, kind: ExchangeKind) -> &mut InstanceMap {
        match kind {
            ExchangeKind::Read => &mut self.read,
            ExchangeKind::Overwrite => &mut self.overwrite,
        }
    }

    /// Insert a record. An existing entry for the same basename is replaced
    /// in place (last write wins, original position kept).
    pub fn insert(
        &mut self,
        kind: ExchangeKind,
        basename: String,
        record: InstanceRecord,
    ) -> Option<InstanceRecord> {
        self.map_mut(kind).insert(basename, record)
    }

    pub fn is_empty(&self) -> bool {
        self.overwrite.is_empty() && self.read.is_empty()
    }
}

/// Everything extracted from one DAE dump
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalMetadata {
    pub instances: Instances,
    pub signals: SignalGroups,
}

/// Classify every variable of `doc` and extract its metadata.
///
/// Variables are visited in document order, which fixes the order of every
/// signal group list. The first extraction error aborts the whole pass.
pub fn extract_signal_metadata(doc: &Document) -> Result<SignalMetadata> {
    let mut metadata = SignalMetadata::default();

    for var in doc.variables() {
        let Some(name) = var.name() else {
            tracing::warn!("[METADATA] Skipping <variable> without a name attribute");
            continue;
        };
        let Some(role) = SignalRole::classify(name) else {
            continue;
        };
        tracing::debug!("[METADATA] {} classified as {:?}", name, role);

        match role {
            SignalRole::Exchange(kind) => {
                let (basename, record) = extract_instance(doc, name, kind)?;
                if metadata
                    .instances
                    .insert(kind, basename.clone(), record)
                    .is_some()
                {
                    tracing::debug!("[METADATA] Replaced earlier {:?} entry for {}", kind, basename);
                }
            }
            SignalRole::Kpi => {
                let (category, output) = extract_kpi(doc, var, name)?;
                metadata.signals.entry(category).or_default().push(output);
            }
        }
    }

    tracing::info!(
        "[METADATA] {} overwrite, {} read, {} KPI groups",
        metadata.instances.overwrite.len(),
        metadata.instances.read.len(),
        metadata.signals.len()
    );

    Ok(metadata)
}

/// Dotted path with its final segment removed (`"a.b.c"` -> `"a.b"`)
pub fn basename(path: &str) -> &str {
    path.rsplit_once('.').map_or("", |(base, _)| base)
}

/// Text after the first `"` up to the next one (or the end of the string)
pub(crate) fn first_quoted(s: &str) -> Option<&str> {
    let (_, rest) = s.split_once('"')?;
    Some(rest.split_once('"').map_or(rest, |(quoted, _)| quoted))
}
