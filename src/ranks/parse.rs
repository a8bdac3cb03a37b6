use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use super::dataset::IterationSnapshot;
use super::error::{Result, VisError};

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawSnapshot {
    pub(super) iteration: u64,
    pub(super) ranks: Vec<f64>,
}

/// Validates the raw payload and returns the snapshots sorted by iteration.
pub(super) fn parse_snapshots(raw: &Value) -> Result<Vec<IterationSnapshot>> {
    let entries = raw
        .as_array()
        .ok_or_else(|| VisError::malformed("expected a sequence of iteration snapshots"))?;

    if entries.is_empty() {
        return Err(VisError::malformed("dataset contains no snapshots"));
    }

    let mut snapshots = Vec::with_capacity(entries.len());
    let mut seen = HashSet::with_capacity(entries.len());
    let mut node_count = None;

    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            return Err(VisError::malformed(format!(
                "entry {index} is not an object"
            )));
        }

        let raw_entry = RawSnapshot::deserialize(entry)
            .map_err(|error| VisError::malformed(format!("entry {index}: {error}")))?;

        if raw_entry.ranks.is_empty() {
            return Err(VisError::malformed(format!(
                "entry {index} (iteration {}) has no ranks",
                raw_entry.iteration
            )));
        }

        match node_count {
            None => node_count = Some(raw_entry.ranks.len()),
            Some(expected) if expected != raw_entry.ranks.len() => {
                return Err(VisError::malformed(format!(
                    "entry {index} (iteration {}) has {} ranks, expected {expected}",
                    raw_entry.iteration,
                    raw_entry.ranks.len()
                )));
            }
            Some(_) => {}
        }

        if !seen.insert(raw_entry.iteration) {
            return Err(VisError::malformed(format!(
                "entry {index} repeats iteration {}",
                raw_entry.iteration
            )));
        }

        snapshots.push(IterationSnapshot {
            iteration: raw_entry.iteration,
            ranks: raw_entry.ranks,
        });
    }

    snapshots.sort_by_key(|snapshot| snapshot.iteration);
    Ok(snapshots)
}
