use thiserror::Error;

use crate::graph::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// The fixed-point evaluation stalled with nodes still pending, and the
    /// designated output was among them: a feedback cycle feeds the output.
    #[error("evaluation stalled on a feedback cycle with {pending} node(s) pending")]
    UnresolvedCycle { pending: usize },

    /// Attempted to wire an input into a node that does not accept one
    /// (value sources take none, NOT takes exactly one).
    #[error("node {0} cannot accept another input")]
    InputRejected(NodeId),

    /// Attempted to assign a value to a node that is not a value source.
    #[error("node {0} is not a value source")]
    NotASource(NodeId),

    /// Attempted to drive a node that is not registered as a free input.
    #[error("node {0} is not a free input")]
    NotAFreeInput(NodeId),

    /// The circuit has no designated output node.
    #[error("circuit has no designated output")]
    MissingOutput,

    /// A node id referenced a node outside the arena.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
}
