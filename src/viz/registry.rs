use crate::ranks::{IterationSnapshot, Result, VisError};

use super::mapper::{CoordinateMapper, NodeFrame, RankColor};

/// Live visual entity for one rank position. Identity is the index into `ranks`.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: usize,
    pub rank: f64,
    pub x: f64,
    pub y: f64,
    pub color: RankColor,
}

impl Node {
    pub fn frame(&self) -> NodeFrame {
        NodeFrame {
            id: self.id,
            x: self.x,
            y: self.y,
            color: self.color,
        }
    }

    fn update(&mut self, rank: f64, mapper: &CoordinateMapper) {
        let frame = mapper.map_node(self.id, rank);
        self.rank = rank;
        self.x = frame.x;
        self.y = frame.y;
        self.color = frame.color;
    }
}

/// Session-scoped set of nodes. The node count is fixed at initialization.
#[derive(Clone, Debug)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
}

impl NodeRegistry {
    pub fn initialize(snapshot: &IterationSnapshot, mapper: &CoordinateMapper) -> Result<Self> {
        check_size(snapshot, mapper.node_count())?;

        let nodes = snapshot
            .ranks
            .iter()
            .enumerate()
            .map(|(index, &rank)| {
                let frame = mapper.map_node(index, rank);
                Node {
                    id: index,
                    rank,
                    x: frame.x,
                    y: frame.y,
                    color: frame.color,
                }
            })
            .collect();

        Ok(Self { nodes })
    }

    /// Nodes in index order.
    pub fn current_nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn frames(&self) -> Vec<NodeFrame> {
        self.nodes.iter().map(Node::frame).collect()
    }

    /// Re-maps every node in place. Nothing is touched when the sizes disagree.
    pub fn apply(&mut self, snapshot: &IterationSnapshot, mapper: &CoordinateMapper) -> Result<()> {
        check_size(snapshot, self.nodes.len())?;

        for (node, &rank) in self.nodes.iter_mut().zip(&snapshot.ranks) {
            node.update(rank, mapper);
        }
        Ok(())
    }
}

fn check_size(snapshot: &IterationSnapshot, expected: usize) -> Result<()> {
    if snapshot.ranks.len() == expected {
        Ok(())
    } else {
        Err(VisError::SizeMismatch {
            iteration: snapshot.iteration,
            expected,
            actual: snapshot.ranks.len(),
        })
    }
}
