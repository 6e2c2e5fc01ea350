//! Circuit model and evaluation for the logic gate puzzle.
//!
//! A circuit is a directed graph of gates and value sources, stored in an
//! arena and addressed by [`NodeId`]. The evaluator runs iterative
//! fixed-point passes over tri-state values, so graphs with feedback edges
//! terminate instead of recursing forever.

mod error;
mod eval;
mod gate;
mod graph;

pub use error::CircuitError;
pub use eval::{Evaluation, evaluate};
pub use gate::{GateKind, eval_binary, eval_nary};
pub use graph::{Circuit, Node, NodeId, NodeKind};
