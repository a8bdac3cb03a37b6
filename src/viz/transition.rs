use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::ranks::{Dataset, Result};

use super::mapper::{CoordinateMapper, NodeFrame, PlotBounds};
use super::registry::NodeRegistry;

pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Rendering collaborator that draws nodes and animates them between frames.
///
/// `animate_to` must redirect an in-flight animation from its current visual state toward
/// the new frame instead of queueing behind it.
pub trait RenderSurface {
    fn animate_to(&mut self, frame: NodeFrame, duration: Duration);
}

/// Owns the session's dataset and nodes and moves them between iterations.
#[derive(Clone, Debug)]
pub struct TransitionController {
    dataset: Dataset,
    mapper: CoordinateMapper,
    registry: NodeRegistry,
    current_iteration: u64,
    duration: Duration,
}

impl TransitionController {
    /// Builds the initial node set from the first recorded snapshot.
    pub fn new(dataset: Dataset, bounds: PlotBounds, duration: Duration) -> Result<Self> {
        let mapper = CoordinateMapper::new(bounds, dataset.node_count());
        let first = dataset.first();
        let registry = NodeRegistry::initialize(first, &mapper)?;
        let current_iteration = first.iteration;

        debug!(
            nodes = registry.len(),
            iteration = current_iteration,
            "initialized node registry"
        );

        Ok(Self {
            dataset,
            mapper,
            registry,
            current_iteration,
            duration,
        })
    }

    /// Retargets every node toward the ranks recorded at `iteration`.
    ///
    /// An unknown iteration is reported without touching any node.
    pub fn transition_to<S>(&mut self, iteration: u64, surface: &mut S) -> Result<()>
    where
        S: RenderSurface + ?Sized,
    {
        if iteration == self.current_iteration {
            trace!(iteration, "iteration already selected");
            return Ok(());
        }

        let snapshot = self.dataset.snapshot_at(iteration).inspect_err(|error| {
            warn!(%error, "rejected iteration selection");
        })?;

        self.registry.apply(snapshot, &self.mapper)?;
        for node in self.registry.current_nodes() {
            surface.animate_to(node.frame(), self.duration);
        }

        debug!(
            from = self.current_iteration,
            to = iteration,
            duration_ms = self.duration.as_millis() as u64,
            "transition started"
        );
        self.current_iteration = iteration;
        Ok(())
    }

    pub fn frames(&self) -> Vec<NodeFrame> {
        self.registry.frames()
    }

    pub fn current_iteration(&self) -> u64 {
        self.current_iteration
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }
}
