use serde_json::Value;
use tracing::debug;

use super::error::{Result, VisError};
use super::parse::parse_snapshots;

/// Ranks recorded for every node at one iteration of the upstream algorithm.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationSnapshot {
    pub iteration: u64,
    pub ranks: Vec<f64>,
}

impl IterationSnapshot {
    pub fn node_count(&self) -> usize {
        self.ranks.len()
    }
}

/// Immutable, validated sequence of snapshots sorted by iteration.
///
/// Every snapshot holds the same number of ranks and iteration keys are unique.
#[derive(Clone, Debug)]
pub struct Dataset {
    snapshots: Vec<IterationSnapshot>,
    node_count: usize,
}

impl Dataset {
    pub fn load(raw: &Value) -> Result<Self> {
        let snapshots = parse_snapshots(raw)?;
        let node_count = snapshots
            .first()
            .map(IterationSnapshot::node_count)
            .ok_or_else(|| VisError::malformed("dataset contains no snapshots"))?;

        debug!(
            snapshots = snapshots.len(),
            node_count, "validated rank dataset"
        );

        Ok(Self {
            snapshots,
            node_count,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|error| VisError::malformed(format!("invalid JSON: {error}")))?;
        Self::load(&raw)
    }

    /// Resolves a snapshot by its iteration key, not by position.
    pub fn snapshot_at(&self, iteration: u64) -> Result<&IterationSnapshot> {
        self.position_of(iteration)
            .map(|position| &self.snapshots[position])
            .ok_or(VisError::UnknownIteration(iteration))
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    pub fn snapshots(&self) -> &[IterationSnapshot] {
        &self.snapshots
    }

    pub fn first(&self) -> &IterationSnapshot {
        &self.snapshots[0]
    }

    /// Smallest and largest recorded iteration, for bounding external controls.
    pub fn iteration_range(&self) -> (u64, u64) {
        let min = self.snapshots[0].iteration;
        let max = self.snapshots[self.snapshots.len() - 1].iteration;
        (min, max)
    }

    pub fn iterations(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.snapshots.iter().map(|snapshot| snapshot.iteration)
    }

    pub fn position_of(&self, iteration: u64) -> Option<usize> {
        self.snapshots
            .binary_search_by_key(&iteration, |snapshot| snapshot.iteration)
            .ok()
    }

    /// Recorded iteration closest to `value`; ties resolve to the lower iteration.
    pub fn nearest_iteration(&self, value: u64) -> u64 {
        let upper = self
            .snapshots
            .partition_point(|snapshot| snapshot.iteration < value);

        if upper == 0 {
            return self.snapshots[0].iteration;
        }
        if upper == self.snapshots.len() {
            return self.snapshots[upper - 1].iteration;
        }

        let below = self.snapshots[upper - 1].iteration;
        let above = self.snapshots[upper].iteration;
        if above - value < value - below {
            above
        } else {
            below
        }
    }

    /// Rank of one node across every recorded iteration.
    pub fn rank_history(&self, node: usize) -> Vec<(u64, f64)> {
        self.snapshots
            .iter()
            .filter_map(|snapshot| {
                snapshot
                    .ranks
                    .get(node)
                    .map(|rank| (snapshot.iteration, *rank))
            })
            .collect()
    }

    /// Largest absolute rank change between `iteration` and the snapshot before it.
    pub fn max_delta(&self, iteration: u64) -> Result<Option<f64>> {
        let position = self
            .position_of(iteration)
            .ok_or(VisError::UnknownIteration(iteration))?;
        if position == 0 {
            return Ok(None);
        }

        let previous = &self.snapshots[position - 1];
        let current = &self.snapshots[position];
        let delta = previous
            .ranks
            .iter()
            .zip(&current.ranks)
            .map(|(before, after)| (after - before).abs())
            .fold(0.0_f64, f64::max);
        Ok(Some(delta))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Dataset {
        Dataset::load(&json!([
            {"iteration": 0, "ranks": [0.2, 0.8, 0.5]},
            {"iteration": 3, "ranks": [0.3, 0.6, 0.5]},
            {"iteration": 7, "ranks": [0.35, 0.55, 0.5]},
        ]))
        .expect("valid dataset")
    }

    #[test]
    fn node_count_matches_every_snapshot() {
        let payloads = [
            json!([{"iteration": 0, "ranks": [0.5]}]),
            json!([
                {"iteration": 1, "ranks": [0.1, 0.2, 0.3, 0.4]},
                {"iteration": 2, "ranks": [0.4, 0.3, 0.2, 0.1]},
            ]),
            json!([
                {"iteration": 5, "ranks": [0.0, 1.0]},
                {"iteration": 0, "ranks": [1.0, 0.0]},
                {"iteration": 9, "ranks": [0.5, 0.5]},
            ]),
        ];

        for payload in payloads {
            let dataset = Dataset::load(&payload).expect("valid dataset");
            for snapshot in dataset.snapshots() {
                assert_eq!(dataset.node_count(), snapshot.ranks.len());
            }
        }
    }

    #[test]
    fn snapshot_lookup_uses_iteration_key() {
        let dataset = sample();
        let snapshot = dataset.snapshot_at(3).expect("iteration 3 exists");
        assert_eq!(snapshot.ranks, vec![0.3, 0.6, 0.5]);

        // position 1 exists, iteration 1 does not
        assert_eq!(dataset.snapshot_at(1), Err(VisError::UnknownIteration(1)));
    }

    #[test]
    fn iteration_range_spans_recorded_keys() {
        assert_eq!(sample().iteration_range(), (0, 7));
        assert_eq!(sample().iterations().collect::<Vec<_>>(), vec![0, 3, 7]);
    }

    #[test]
    fn nearest_iteration_snaps_to_recorded_keys() {
        let dataset = sample();
        assert_eq!(dataset.nearest_iteration(0), 0);
        assert_eq!(dataset.nearest_iteration(1), 0);
        assert_eq!(dataset.nearest_iteration(2), 3);
        assert_eq!(dataset.nearest_iteration(5), 3);
        assert_eq!(dataset.nearest_iteration(6), 7);
        assert_eq!(dataset.nearest_iteration(100), 7);
    }

    #[test]
    fn rank_history_follows_one_node() {
        assert_eq!(
            sample().rank_history(1),
            vec![(0, 0.8), (3, 0.6), (7, 0.55)]
        );
        assert!(sample().rank_history(9).is_empty());
    }

    #[test]
    fn max_delta_measures_convergence() {
        let dataset = sample();
        assert_eq!(dataset.max_delta(0), Ok(None));

        let delta = dataset.max_delta(3).expect("known").expect("has predecessor");
        assert!((delta - 0.2).abs() < 1e-12);

        let delta = dataset.max_delta(7).expect("known").expect("has predecessor");
        assert!((delta - 0.05).abs() < 1e-12);

        assert_eq!(dataset.max_delta(4), Err(VisError::UnknownIteration(4)));
    }

    #[test]
    fn invalid_json_text_is_malformed() {
        assert!(matches!(
            Dataset::from_json_str("[{\"iteration\": 0,"),
            Err(VisError::MalformedDataset(_))
        ));
    }

    #[test]
    fn parses_json_text() {
        let dataset =
            Dataset::from_json_str(r#"[{"iteration": 2, "ranks": [0.2, 0.8]}]"#).expect("valid");
        assert_eq!(dataset.first().iteration, 2);
        assert_eq!(dataset.snapshot_count(), 1);
    }
}
