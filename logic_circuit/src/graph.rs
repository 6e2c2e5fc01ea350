use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::CircuitError, gate::GateKind};

/// Index of a node in the circuit arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// What a node computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A gate combining its wired inputs.
    Gate(GateKind),
    /// A value source. Free inputs start unassigned; constants carry their
    /// value from construction.
    Source,
}

/// A vertex of the circuit graph.
///
/// Edges are stored on both endpoints: `inputs` is the evaluation order
/// relation, `outputs` is its back-relation and is used only for path
/// queries and rendering, never for evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    kind: NodeKind,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    /// Current value of a `Source` node; `None` means unassigned. Ignored
    /// for gates.
    value: Option<bool>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Gate kind, if this node is a gate.
    pub fn gate(&self) -> Option<GateKind> {
        match self.kind {
            NodeKind::Gate(kind) => Some(kind),
            NodeKind::Source => None,
        }
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source)
    }

    /// Source value; `None` for an unassigned source. Meaningless for gates.
    pub fn source_value(&self) -> Option<bool> {
        self.value
    }
}

/// An arena of nodes forming one puzzle circuit.
///
/// The circuit owns every node and every edge. One node is designated as
/// the output; the sources the player may drive are tracked in order as
/// free inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    nodes: Vec<Node>,
    free_inputs: Vec<NodeId>,
    output: Option<NodeId>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    pub fn new() -> Self {
        Circuit {
            nodes: vec![],
            free_inputs: vec![],
            output: None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn try_node(&self, id: NodeId) -> Result<&Node, CircuitError> {
        self.nodes.get(id.0).ok_or(CircuitError::UnknownNode(id))
    }

    /// The player-drivable sources, in creation order.
    pub fn free_inputs(&self) -> &[NodeId] {
        &self.free_inputs
    }

    pub fn is_free_input(&self, id: NodeId) -> bool {
        self.free_inputs.contains(&id)
    }

    /// The designated output node.
    pub fn output(&self) -> Result<NodeId, CircuitError> {
        self.output.ok_or(CircuitError::MissingOutput)
    }

    /// Adds an unassigned source and registers it as a free input.
    pub fn add_free_input(&mut self) -> NodeId {
        let id = self.push(NodeKind::Source, None);
        self.free_inputs.push(id);
        id
    }

    /// Adds a source pinned to `value` (not player-drivable).
    pub fn add_const(&mut self, value: bool) -> NodeId {
        self.push(NodeKind::Source, Some(value))
    }

    /// Adds a gate with no inputs wired yet.
    pub fn add_gate(&mut self, kind: GateKind) -> NodeId {
        self.push(NodeKind::Gate(kind), None)
    }

    fn push(&mut self, kind: NodeKind, value: Option<bool>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            inputs: vec![],
            outputs: vec![],
            value,
        });
        id
    }

    /// Wires `provider` as the next input of `consumer`, maintaining the
    /// `outputs` back-relation. Rejects wiring into a source, and a second
    /// input into NOT.
    pub fn connect(&mut self, provider: NodeId, consumer: NodeId) -> Result<(), CircuitError> {
        self.try_node(provider)?;
        let node = self.try_node(consumer)?;
        match node.kind {
            NodeKind::Source => return Err(CircuitError::InputRejected(consumer)),
            NodeKind::Gate(kind) if kind.is_unary() && !node.inputs.is_empty() => {
                return Err(CircuitError::InputRejected(consumer));
            }
            NodeKind::Gate(_) => {}
        }
        self.nodes[consumer.0].inputs.push(provider);
        self.nodes[provider.0].outputs.push(consumer);
        Ok(())
    }

    /// Designates the circuit's output node.
    pub fn set_output(&mut self, id: NodeId) -> Result<(), CircuitError> {
        self.try_node(id)?;
        self.output = Some(id);
        Ok(())
    }

    /// Assigns (or clears) the value of a source node.
    pub fn assign(&mut self, id: NodeId, value: Option<bool>) -> Result<(), CircuitError> {
        if !self.try_node(id)?.is_source() {
            return Err(CircuitError::NotASource(id));
        }
        self.nodes[id.0].value = value;
        Ok(())
    }

    /// Whether every free input currently carries a value.
    pub fn all_free_inputs_assigned(&self) -> bool {
        self.free_inputs
            .iter()
            .all(|&id| self.nodes[id.0].value.is_some())
    }

    /// Shortest path length (in edges) from `from` to `to` following the
    /// `outputs` adjacency, or `None` if `to` is unreachable. Used to bound
    /// the size of injected feedback loops.
    pub fn shortest_path_len(&self, from: NodeId, to: NodeId) -> Option<usize> {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        seen.insert(from);
        queue.push_back((from, 0));
        while let Some((current, dist)) = queue.pop_front() {
            if current == to {
                return Some(dist);
            }
            for &next in self.nodes[current.0].outputs.iter() {
                if seen.insert(next) {
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }
}
