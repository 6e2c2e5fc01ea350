use tracing::trace;

use crate::{
    error::CircuitError,
    gate::eval_nary,
    graph::{Circuit, NodeId, NodeKind},
};

/// Result of one full-graph evaluation pass.
///
/// Values are tri-state: `Some(bit)` for a determined node, `None` for a
/// node that depends on an unassigned free input. Nodes trapped in a
/// feedback cycle outside the output's dependency cone stay uncomputed;
/// [`Evaluation::is_computed`] distinguishes them from indeterminate nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    values: Vec<Option<bool>>,
    computed: Vec<bool>,
    output: NodeId,
    passes: usize,
}

impl Evaluation {
    /// Tri-state value of `id`; `None` when indeterminate or uncomputed.
    pub fn value(&self, id: NodeId) -> Option<bool> {
        self.values[id.0]
    }

    /// Whether `id` was resolved by the fixed-point iteration.
    pub fn is_computed(&self, id: NodeId) -> bool {
        self.computed[id.0]
    }

    /// Tri-state value at the designated output.
    pub fn output_value(&self) -> Option<bool> {
        self.values[self.output.0]
    }

    /// Number of fixed-point passes the evaluation took.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

/// Evaluates the whole circuit by fixed-point iteration.
///
/// Each pass computes every node whose inputs are all computed: sources
/// yield their (possibly unassigned) value, gates fold their inputs, and a
/// gate with any indeterminate input is itself indeterminate. A pass that
/// makes no progress means the remaining nodes sit on a feedback cycle;
/// that is an error only when the designated output is among them,
/// otherwise the cycle is irrelevant to the answer and evaluation stops.
///
/// Acyclic circuits settle in at most `node_count` passes. A recursive
/// descent would be simpler but could not terminate on circuits with
/// feedback edges, which the generator may inject.
pub fn evaluate(circuit: &Circuit) -> Result<Evaluation, CircuitError> {
    let output = circuit.output()?;
    let n = circuit.node_count();
    let mut values: Vec<Option<bool>> = vec![None; n];
    let mut computed = vec![false; n];
    let mut pending = n;
    let mut passes = 0;

    while pending > 0 {
        let mut progressed = false;
        for id in circuit.node_ids() {
            if computed[id.0] {
                continue;
            }
            let node = circuit.node(id);
            match node.kind() {
                NodeKind::Source => {
                    values[id.0] = node.source_value();
                }
                NodeKind::Gate(kind) => {
                    if !node.inputs().iter().all(|input| computed[input.0]) {
                        continue;
                    }
                    // Indeterminate propagates: any unassigned upstream
                    // input makes this gate unassigned too.
                    let inputs: Option<Vec<bool>> =
                        node.inputs().iter().map(|input| values[input.0]).collect();
                    values[id.0] = inputs.map(|inputs| eval_nary(kind, &inputs));
                }
            }
            computed[id.0] = true;
            pending -= 1;
            progressed = true;
        }
        passes += 1;
        if pending > 0 && !progressed {
            if computed[output.0] {
                // The stalled nodes form a cycle the output never reads.
                trace!(pending, "evaluation stalled outside the output cone");
                break;
            }
            return Err(CircuitError::UnresolvedCycle { pending });
        }
    }

    Ok(Evaluation {
        values,
        computed,
        output,
        passes,
    })
}
