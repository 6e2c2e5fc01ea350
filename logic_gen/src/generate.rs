use logic_circuit::{Circuit, CircuitError, GateKind, NodeId};
use rand::Rng;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::{error::GenerateError, profile::DifficultyProfile, solve::is_solvable};

/// Upper bound on generate-validate rounds before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 16;

/// Generates a circuit that the solvability sweep accepts for
/// `desired_output`, retrying with fresh random draws on unsolvable or
/// cycle-stalled builds. Fails fast on a malformed profile and reports
/// [`GenerateError::Exhausted`] once the attempt budget is spent.
pub fn generate<R: Rng>(
    profile: &DifficultyProfile,
    free_input_count: usize,
    desired_output: bool,
    rng: &mut R,
) -> Result<Circuit, GenerateError> {
    profile.validate()?;
    if free_input_count < 1 {
        return Err(GenerateError::InvalidConfiguration(
            "free_input_count must be at least 1".into(),
        ));
    }

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let mut circuit = build(profile, free_input_count, rng);
        match is_solvable(&mut circuit, desired_output) {
            Ok(true) => {
                debug!(
                    attempt,
                    nodes = circuit.node_count(),
                    "accepted generated circuit"
                );
                return Ok(circuit);
            }
            Ok(false) => {
                debug!(attempt, "unsolvable draw, regenerating");
            }
            Err(CircuitError::UnresolvedCycle { pending }) => {
                debug!(attempt, pending, "feedback cycle stalled the output, regenerating");
            }
            Err(other) => return Err(other.into()),
        }
    }
    Err(GenerateError::Exhausted {
        attempts: MAX_GENERATION_ATTEMPTS,
    })
}

/// One layered build, no validation.
///
/// Layer `max_depth` holds the free inputs; layers `max_depth-1` down to 1
/// hold gates wired to the layers below. For each input slot a single
/// uniform draw is partitioned into three bands: fan-out (reuse any node of
/// the layer below), shortcut (two layers below, when that layer exists),
/// and the default band, which prefers lower-layer nodes that no gate has
/// consumed yet so sources do not go dangling unless fan-out rolls them.
fn build<R: Rng>(profile: &DifficultyProfile, free_input_count: usize, rng: &mut R) -> Circuit {
    let depth_max = profile.max_depth;
    let mut circuit = Circuit::new();
    let mut layers: Vec<Vec<NodeId>> = vec![vec![]; depth_max + 1];

    for _ in 0..free_input_count {
        let leaf = circuit.add_free_input();
        layers[depth_max].push(leaf);
    }

    for depth in (1..depth_max).rev() {
        let gate_count = rng.gen_range(profile.min_gates_per_layer..=profile.max_gates_per_layer);
        let fan_out = profile.fan_out_chance.sample(depth);
        let shortcut = profile.shortcut_chance.sample(depth);

        // Default-band pool: lower-layer nodes not yet wired to any gate of
        // this layer.
        let mut unconsumed = layers[depth + 1].clone();

        for _ in 0..gate_count {
            let kind = gate_kind_from_ordinal(rng.gen_range(0..GateKind::COUNT));
            let gate = circuit.add_gate(kind);
            let input_count = if kind.is_unary() {
                1
            } else {
                rng.gen_range(profile.min_inputs..=profile.max_inputs)
            };

            for _ in 0..input_count {
                let roll: f32 = rng.gen();
                let two_below = layers.get(depth + 2).filter(|layer| !layer.is_empty());
                let provider = if roll < fan_out {
                    pick(&layers[depth + 1], rng)
                } else if roll < fan_out + shortcut && two_below.is_some() {
                    pick(two_below.unwrap(), rng)
                } else if !unconsumed.is_empty() {
                    unconsumed.swap_remove(rng.gen_range(0..unconsumed.len()))
                } else {
                    pick(&layers[depth + 1], rng)
                };
                // A gate never rejects a forward wire: sources are only
                // providers here and NOT receives exactly one input.
                circuit
                    .connect(provider, gate)
                    .expect("forward wiring cannot be rejected");
            }
            layers[depth].push(gate);
        }
    }

    // Feedback edges go in after every layer exists: only then can a gate's
    // forward cone reach the shallower target the back edge returns from.
    if profile.allow_loops {
        for depth in (2..depth_max).rev() {
            let chance = profile.loop_chance.sample(depth);
            if rng.gen::<f32>() < chance {
                try_close_loop(&mut circuit, &layers, depth, profile.max_loop_length, rng);
            }
        }
    }

    let top = &layers[1];
    let output = top[rng.gen_range(0..top.len())];
    circuit
        .set_output(output)
        .expect("output chosen from the arena");
    circuit
}

/// Attempts to inject one feedback edge: a gate of the current layer feeds
/// the output cone of a strictly shallower gate, and that shallower gate is
/// wired back as an extra input, closing a cycle. Skipped when no eligible
/// pair exists or the cycle would exceed `max_loop_length` edges.
fn try_close_loop<R: Rng>(
    circuit: &mut Circuit,
    layers: &[Vec<NodeId>],
    depth: usize,
    max_loop_length: usize,
    rng: &mut R,
) {
    let from = layers[depth][rng.gen_range(0..layers[depth].len())];
    let to_depth = rng.gen_range(1..depth);
    let shallow = &layers[to_depth];
    if shallow.is_empty() {
        return;
    }
    let to = shallow[rng.gen_range(0..shallow.len())];
    // NOT already carries its single input; wiring a second one in would be
    // rejected anyway.
    if circuit.node(from).gate().is_some_and(|kind| kind.is_unary()) {
        return;
    }
    // The forward path from..to plus the back edge is the cycle being
    // created; bound its length before committing.
    match circuit.shortest_path_len(from, to) {
        Some(forward) if forward + 1 <= max_loop_length => {
            circuit
                .connect(to, from)
                .expect("loop edge into a non-unary gate");
            debug!(%from, %to, cycle_len = forward + 1, "injected feedback edge");
        }
        _ => {}
    }
}

fn pick<R: Rng>(layer: &[NodeId], rng: &mut R) -> NodeId {
    layer[rng.gen_range(0..layer.len())]
}

/// `GateKind` from its fixed ordinal, for uniform draws.
fn gate_kind_from_ordinal(ordinal: usize) -> GateKind {
    GateKind::iter()
        .nth(ordinal)
        .expect("ordinal drawn below GateKind::COUNT")
}
