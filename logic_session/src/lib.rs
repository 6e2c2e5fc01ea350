//! The runtime wrapper around one puzzle interaction.
//!
//! A [`Session`] owns a circuit for the lifetime of one attempt: the UI
//! layer reports free-input changes, the session re-runs the full
//! evaluation and caches it, and win detection compares the settled output
//! against the stamped answer.

use logic_circuit::{Circuit, CircuitError, Evaluation, NodeId, evaluate};
use tracing::debug;

/// One player interaction over a generated (or hand-authored) circuit.
///
/// Evaluation is recomputed lazily: mutating a free input invalidates the
/// cached [`Evaluation`], and the next query re-runs the fixed-point pass.
/// Queries on an untouched session evaluate once and reuse the result.
#[derive(Debug)]
pub struct Session {
    circuit: Circuit,
    cached: Option<Evaluation>,
}

impl Session {
    pub fn new(circuit: Circuit) -> Self {
        Session {
            circuit,
            cached: None,
        }
    }

    /// Read-only view of the wrapped circuit, for rendering wires.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The player-drivable input handles, in creation order.
    pub fn free_inputs(&self) -> &[NodeId] {
        self.circuit.free_inputs()
    }

    /// Assigns (or clears, with `None`) a free input.
    pub fn set_free_input(
        &mut self,
        id: NodeId,
        value: Option<bool>,
    ) -> Result<(), CircuitError> {
        if !self.circuit.is_free_input(id) {
            return Err(CircuitError::NotAFreeInput(id));
        }
        self.circuit.assign(id, value)?;
        self.cached = None;
        debug!(input = %id, ?value, "free input updated");
        Ok(())
    }

    /// Cycles a free input the way repeated taps do: unassigned → 0 → 1 →
    /// 0 → … (once touched, an input never returns to unassigned). Returns
    /// the new value.
    pub fn toggle_free_input(&mut self, id: NodeId) -> Result<bool, CircuitError> {
        if !self.circuit.is_free_input(id) {
            return Err(CircuitError::NotAFreeInput(id));
        }
        let next = match self.circuit.node(id).source_value() {
            None => false,
            Some(current) => !current,
        };
        self.circuit.assign(id, Some(next))?;
        self.cached = None;
        debug!(input = %id, value = next, "free input toggled");
        Ok(next)
    }

    /// Tri-state value at the designated output: `Some(bit)` when settled,
    /// `None` while any upstream free input is unassigned.
    pub fn current_output(&mut self) -> Result<Option<bool>, CircuitError> {
        Ok(self.evaluation()?.output_value())
    }

    /// Tri-state value of any node, for per-gate UI hints.
    pub fn node_value(&mut self, id: NodeId) -> Result<Option<bool>, CircuitError> {
        self.circuit.try_node(id)?;
        Ok(self.evaluation()?.value(id))
    }

    /// Whether the puzzle is won: every free input assigned and the output
    /// settled at `desired`. An indeterminate output is never solved.
    pub fn is_solved(&mut self, desired: bool) -> Result<bool, CircuitError> {
        if !self.circuit.all_free_inputs_assigned() {
            return Ok(false);
        }
        Ok(self.current_output()? == Some(desired))
    }

    /// Gives the circuit back, e.g. to reuse it for a post-game recap.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    fn evaluation(&mut self) -> Result<&Evaluation, CircuitError> {
        if self.cached.is_none() {
            self.cached = Some(evaluate(&self.circuit)?);
        }
        Ok(self.cached.as_ref().expect("just cached"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_circuit::GateKind;

    fn and_session() -> (Session, NodeId, NodeId) {
        let mut circuit = Circuit::new();
        let a = circuit.add_free_input();
        let b = circuit.add_free_input();
        let and = circuit.add_gate(GateKind::And);
        circuit.connect(a, and).unwrap();
        circuit.connect(b, and).unwrap();
        circuit.set_output(and).unwrap();
        (Session::new(circuit), a, b)
    }

    #[test]
    fn fresh_session_is_indeterminate_and_unsolved() {
        let (mut session, ..) = and_session();
        assert_eq!(session.current_output().unwrap(), None);
        assert!(!session.is_solved(true).unwrap());
        assert!(!session.is_solved(false).unwrap());
    }

    #[test]
    fn assigning_all_inputs_settles_the_output() {
        let (mut session, a, b) = and_session();
        session.set_free_input(a, Some(true)).unwrap();
        assert_eq!(session.current_output().unwrap(), None);
        session.set_free_input(b, Some(true)).unwrap();
        assert_eq!(session.current_output().unwrap(), Some(true));
        assert!(session.is_solved(true).unwrap());

        session.set_free_input(b, Some(false)).unwrap();
        assert_eq!(session.current_output().unwrap(), Some(false));
        assert!(!session.is_solved(true).unwrap());
        assert!(session.is_solved(false).unwrap());
    }

    #[test]
    fn toggle_cycles_unassigned_zero_one_zero() {
        let (mut session, a, _) = and_session();
        assert_eq!(session.toggle_free_input(a).unwrap(), false);
        assert_eq!(session.toggle_free_input(a).unwrap(), true);
        assert_eq!(session.toggle_free_input(a).unwrap(), false);
        assert_eq!(session.toggle_free_input(a).unwrap(), true);
    }

    #[test]
    fn clearing_an_input_reverts_to_indeterminate() {
        let (mut session, a, b) = and_session();
        session.set_free_input(a, Some(true)).unwrap();
        session.set_free_input(b, Some(true)).unwrap();
        assert!(session.is_solved(true).unwrap());
        session.set_free_input(a, None).unwrap();
        assert_eq!(session.current_output().unwrap(), None);
        assert!(!session.is_solved(true).unwrap());
    }

    #[test]
    fn node_value_exposes_intermediate_hints() {
        let mut circuit = Circuit::new();
        let a = circuit.add_free_input();
        let not = circuit.add_gate(GateKind::Not);
        let or = circuit.add_gate(GateKind::Or);
        circuit.connect(a, not).unwrap();
        circuit.connect(not, or).unwrap();
        circuit.connect(a, or).unwrap();
        circuit.set_output(or).unwrap();

        let mut session = Session::new(circuit);
        assert_eq!(session.node_value(not).unwrap(), None);
        session.set_free_input(a, Some(false)).unwrap();
        assert_eq!(session.node_value(not).unwrap(), Some(true));
        assert_eq!(session.node_value(or).unwrap(), Some(true));
    }

    #[test]
    fn rejects_nodes_that_are_not_free_inputs() {
        let (mut session, ..) = and_session();
        let output = session.circuit().output().unwrap();
        assert_eq!(
            session.set_free_input(output, Some(true)),
            Err(CircuitError::NotAFreeInput(output))
        );
        assert_eq!(
            session.toggle_free_input(output),
            Err(CircuitError::NotAFreeInput(output))
        );
    }

    #[test]
    fn constants_are_not_drivable() {
        let mut circuit = Circuit::new();
        let a = circuit.add_free_input();
        let pinned = circuit.add_const(true);
        let and = circuit.add_gate(GateKind::And);
        circuit.connect(a, and).unwrap();
        circuit.connect(pinned, and).unwrap();
        circuit.set_output(and).unwrap();

        let mut session = Session::new(circuit);
        assert_eq!(
            session.set_free_input(pinned, Some(false)),
            Err(CircuitError::NotAFreeInput(pinned))
        );
        session.set_free_input(a, Some(true)).unwrap();
        assert!(session.is_solved(true).unwrap());
    }
}
