use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// A piecewise-linear probability curve keyed by layer depth.
///
/// The difficulty designer tunes chances per depth with a handful of
/// keyframes; depths between keyframes interpolate linearly and depths
/// outside the keyed range clamp to the nearest end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityCurve {
    /// `(depth, chance)` pairs, sorted by depth.
    keys: Vec<(f32, f32)>,
}

impl ProbabilityCurve {
    pub fn new(keys: Vec<(f32, f32)>) -> Self {
        ProbabilityCurve { keys }
    }

    /// A depth-independent chance.
    pub fn constant(chance: f32) -> Self {
        ProbabilityCurve {
            keys: vec![(0.0, chance)],
        }
    }

    /// The chance at `depth`, clamped to the keyed range.
    pub fn sample(&self, depth: usize) -> f32 {
        let depth = depth as f32;
        let first = match self.keys.first() {
            Some(&key) => key,
            None => return 0.0,
        };
        if depth <= first.0 {
            return first.1;
        }
        for window in self.keys.windows(2) {
            let (d0, c0) = window[0];
            let (d1, c1) = window[1];
            if depth <= d1 {
                let t = (depth - d0) / (d1 - d0);
                return c0 + t * (c1 - c0);
            }
        }
        self.keys.last().map(|&(_, c)| c).unwrap_or(0.0)
    }

    fn validate(&self, name: &str) -> Result<(), GenerateError> {
        if self.keys.is_empty() {
            return Err(GenerateError::InvalidConfiguration(format!(
                "{name} curve has no keyframes"
            )));
        }
        if !self.keys.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(GenerateError::InvalidConfiguration(format!(
                "{name} curve keyframes must be strictly increasing in depth"
            )));
        }
        if self.keys.iter().any(|&(_, c)| !(0.0..=1.0).contains(&c)) {
            return Err(GenerateError::InvalidConfiguration(format!(
                "{name} curve chance outside [0, 1]"
            )));
        }
        Ok(())
    }
}

/// Generation parameters for one difficulty tier. Immutable once built;
/// typically deserialized from a config asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Number of layers; layer `max_depth` holds the free inputs.
    pub max_depth: usize,
    /// Input count range per gate (NOT always takes one).
    pub min_inputs: usize,
    pub max_inputs: usize,
    /// Gate count range per layer.
    pub min_gates_per_layer: usize,
    pub max_gates_per_layer: usize,
    /// Chance per input slot to reuse any node of the layer below.
    pub fan_out_chance: ProbabilityCurve,
    /// Chance per input slot to wire two layers down instead of one.
    pub shortcut_chance: ProbabilityCurve,
    /// Whether feedback edges may be injected at all.
    pub allow_loops: bool,
    /// Chance per layer to attempt one feedback edge.
    pub loop_chance: ProbabilityCurve,
    /// Upper bound on the cycle length a feedback edge may close, in edges.
    pub max_loop_length: usize,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        DifficultyProfile {
            max_depth: 4,
            min_inputs: 2,
            max_inputs: 3,
            min_gates_per_layer: 1,
            max_gates_per_layer: 3,
            fan_out_chance: ProbabilityCurve::new(vec![
                (1.0, 0.0),
                (2.0, 0.1),
                (3.0, 0.2),
                (4.0, 0.4),
                (5.0, 0.6),
            ]),
            shortcut_chance: ProbabilityCurve::new(vec![
                (1.0, 0.0),
                (2.0, 0.05),
                (3.0, 0.1),
                (4.0, 0.2),
                (5.0, 0.3),
            ]),
            allow_loops: false,
            loop_chance: ProbabilityCurve::new(vec![
                (1.0, 0.0),
                (2.0, 0.02),
                (3.0, 0.05),
                (4.0, 0.1),
                (5.0, 0.15),
            ]),
            max_loop_length: 3,
        }
    }
}

impl DifficultyProfile {
    /// Fails fast on a malformed profile, before any circuit is built.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.max_depth < 1 {
            return Err(GenerateError::InvalidConfiguration(
                "max_depth must be at least 1".into(),
            ));
        }
        if self.min_inputs < 1 || self.min_inputs > self.max_inputs {
            return Err(GenerateError::InvalidConfiguration(format!(
                "input range [{}, {}] is empty or starts at zero",
                self.min_inputs, self.max_inputs
            )));
        }
        if self.min_gates_per_layer < 1 || self.min_gates_per_layer > self.max_gates_per_layer {
            return Err(GenerateError::InvalidConfiguration(format!(
                "gates-per-layer range [{}, {}] is empty or starts at zero",
                self.min_gates_per_layer, self.max_gates_per_layer
            )));
        }
        if self.allow_loops && self.max_loop_length < 2 {
            return Err(GenerateError::InvalidConfiguration(
                "max_loop_length must be at least 2 when loops are allowed".into(),
            ));
        }
        self.fan_out_chance.validate("fan_out_chance")?;
        self.shortcut_chance.validate("shortcut_chance")?;
        self.loop_chance.validate("loop_chance")?;
        Ok(())
    }
}
