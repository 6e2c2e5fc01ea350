use logic_circuit::{Circuit, CircuitError, evaluate};
use tracing::warn;

use crate::error::GenerateError;

/// Free-input count above which exhaustive enumeration is skipped and the
/// circuit is optimistically accepted. Bounds the 2^n sweep.
pub const SOLVE_INPUT_CEILING: usize = 20;

fn assignment(mask: u64, n: usize) -> Vec<bool> {
    (0..n).map(|i| (mask >> i) & 1 == 1).collect()
}

/// Whether some assignment of the free inputs drives the output to
/// `desired`. Early-exits on the first hit. The free inputs are restored to
/// unassigned before returning, also on error.
///
/// Circuits with more than [`SOLVE_INPUT_CEILING`] free inputs are accepted
/// without checking; that is a documented limit, not a correctness claim.
pub fn is_solvable(circuit: &mut Circuit, desired: bool) -> Result<bool, CircuitError> {
    let n = circuit.free_inputs().len();
    if n > SOLVE_INPUT_CEILING {
        warn!(
            free_inputs = n,
            "skipping solvability sweep, accepting optimistically"
        );
        return Ok(true);
    }
    let result = sweep(circuit, n, |output| output == Some(desired));
    restore(circuit)?;
    result.map(|hit| hit.is_some())
}

/// The full truth table over the free inputs: one row per assignment, in
/// mask order, with the tri-state value at the output.
pub fn truth_table(
    circuit: &mut Circuit,
) -> Result<Vec<(Vec<bool>, Option<bool>)>, GenerateError> {
    let n = circuit.free_inputs().len();
    if n > SOLVE_INPUT_CEILING {
        return Err(GenerateError::TooManyFreeInputs { count: n });
    }
    let mut rows = Vec::with_capacity(1 << n);
    let result = (|| -> Result<(), CircuitError> {
        for mask in 0..(1u64 << n) {
            let bits = assignment(mask, n);
            apply(circuit, &bits)?;
            rows.push((bits, evaluate(circuit)?.output_value()));
        }
        Ok(())
    })();
    restore(circuit)?;
    result?;
    Ok(rows)
}

/// Runs `hit` against the output value for every assignment until it
/// returns true; yields the satisfying assignment, if any. Does not restore.
fn sweep(
    circuit: &mut Circuit,
    n: usize,
    hit: impl Fn(Option<bool>) -> bool,
) -> Result<Option<Vec<bool>>, CircuitError> {
    for mask in 0..(1u64 << n) {
        let bits = assignment(mask, n);
        apply(circuit, &bits)?;
        if hit(evaluate(circuit)?.output_value()) {
            return Ok(Some(bits));
        }
    }
    Ok(None)
}

/// The first assignment (in mask order) driving the output to `desired`.
/// Restores the free inputs before returning.
pub fn first_solution(
    circuit: &mut Circuit,
    desired: bool,
) -> Result<Option<Vec<bool>>, CircuitError> {
    let n = circuit.free_inputs().len();
    let result = sweep(circuit, n, |output| output == Some(desired));
    restore(circuit)?;
    result
}

fn apply(circuit: &mut Circuit, bits: &[bool]) -> Result<(), CircuitError> {
    let free: Vec<_> = circuit.free_inputs().to_vec();
    for (&id, &bit) in free.iter().zip(bits) {
        circuit.assign(id, Some(bit))?;
    }
    Ok(())
}

fn restore(circuit: &mut Circuit) -> Result<(), CircuitError> {
    let free: Vec<_> = circuit.free_inputs().to_vec();
    for id in free {
        circuit.assign(id, None)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_circuit::GateKind;

    fn and_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        let a = circuit.add_free_input();
        let b = circuit.add_free_input();
        let and = circuit.add_gate(GateKind::And);
        circuit.connect(a, and).unwrap();
        circuit.connect(b, and).unwrap();
        circuit.set_output(and).unwrap();
        circuit
    }

    #[test]
    fn and_of_two_inputs_is_solvable_for_one() {
        let mut circuit = and_circuit();
        assert!(is_solvable(&mut circuit, true).unwrap());
        assert!(is_solvable(&mut circuit, false).unwrap());
    }

    #[test]
    fn contradiction_is_unsolvable() {
        // x AND (NOT x) can never be 1, whatever x is.
        let mut circuit = Circuit::new();
        let x = circuit.add_free_input();
        let not = circuit.add_gate(GateKind::Not);
        let and = circuit.add_gate(GateKind::And);
        circuit.connect(x, not).unwrap();
        circuit.connect(x, and).unwrap();
        circuit.connect(not, and).unwrap();
        circuit.set_output(and).unwrap();

        assert!(!is_solvable(&mut circuit, true).unwrap());
        assert!(is_solvable(&mut circuit, false).unwrap());
    }

    #[test]
    fn solvability_restores_unassigned_inputs() {
        let mut circuit = and_circuit();
        is_solvable(&mut circuit, true).unwrap();
        assert!(!circuit.all_free_inputs_assigned());
        for &id in circuit.free_inputs() {
            assert_eq!(circuit.node(id).source_value(), None);
        }
    }

    #[test]
    fn truth_table_of_and() {
        let mut circuit = and_circuit();
        let rows = truth_table(&mut circuit).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], (vec![false, false], Some(false)));
        assert_eq!(rows[3], (vec![true, true], Some(true)));
        assert_eq!(rows.iter().filter(|(_, v)| *v == Some(true)).count(), 1);
    }

    #[test]
    fn first_solution_of_and_is_all_ones() {
        let mut circuit = and_circuit();
        assert_eq!(
            first_solution(&mut circuit, true).unwrap(),
            Some(vec![true, true])
        );
    }

    #[test]
    fn cycle_propagates_as_error_and_restores() {
        let mut circuit = Circuit::new();
        let a = circuit.add_free_input();
        let or = circuit.add_gate(GateKind::Or);
        let and = circuit.add_gate(GateKind::And);
        circuit.connect(a, or).unwrap();
        circuit.connect(and, or).unwrap();
        circuit.connect(or, and).unwrap();
        circuit.connect(a, and).unwrap();
        circuit.set_output(or).unwrap();

        assert!(matches!(
            is_solvable(&mut circuit, true),
            Err(CircuitError::UnresolvedCycle { .. })
        ));
        assert_eq!(circuit.node(a).source_value(), None);
    }
}
