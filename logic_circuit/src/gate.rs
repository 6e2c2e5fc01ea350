use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The gate kinds supported by the puzzle.
///
/// The declaration order is fixed: consumers index sprite/prefab tables by
/// `GateKind as usize`, so reordering variants is a breaking change. The
/// order has no effect on evaluation.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
pub enum GateKind {
    And,
    Nand,
    Or,
    Nor,
    Not,
    Xor,
    Xnor,
}

impl GateKind {
    /// Number of gate kinds, for array-indexed resource tables.
    pub const COUNT: usize = 7;

    /// Whether this kind takes exactly one input.
    pub fn is_unary(&self) -> bool {
        matches!(self, GateKind::Not)
    }
}

/// Evaluates a gate over two inputs. For `Not`, `b` is ignored.
pub fn eval_binary(kind: GateKind, a: bool, b: bool) -> bool {
    match kind {
        GateKind::And => a && b,
        GateKind::Nand => !(a && b),
        GateKind::Or => a || b,
        GateKind::Nor => !(a || b),
        GateKind::Not => !a,
        GateKind::Xor => a ^ b,
        GateKind::Xnor => !(a ^ b),
    }
}

/// Evaluates a gate over an arbitrary number of inputs.
///
/// Empty-input conventions: `And`/`Nand` treat the empty conjunction as 0
/// (so `Nand` of nothing is 1), `Or`/`Nor` treat the empty disjunction as 0,
/// and `Xor`/`Xnor` fold parity from a 0 accumulator (so `Xor` of nothing is
/// 0 and `Xnor` of nothing is 1). `Not` reads only its first input and is 1
/// when no input is present.
pub fn eval_nary(kind: GateKind, inputs: &[bool]) -> bool {
    match kind {
        GateKind::And => !inputs.is_empty() && inputs.iter().all(|&v| v),
        GateKind::Nand => !(!inputs.is_empty() && inputs.iter().all(|&v| v)),
        GateKind::Or => inputs.iter().any(|&v| v),
        GateKind::Nor => !inputs.iter().any(|&v| v),
        GateKind::Not => !inputs.first().copied().unwrap_or(false),
        GateKind::Xor => inputs.iter().fold(false, |acc, &v| acc ^ v),
        GateKind::Xnor => !inputs.iter().fold(false, |acc, &v| acc ^ v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn binary_truth_tables() {
        let table: &[(GateKind, [bool; 4])] = &[
            // outputs for (a, b) = (0,0), (0,1), (1,0), (1,1)
            (GateKind::And, [false, false, false, true]),
            (GateKind::Nand, [true, true, true, false]),
            (GateKind::Or, [false, true, true, true]),
            (GateKind::Nor, [true, false, false, false]),
            (GateKind::Xor, [false, true, true, false]),
            (GateKind::Xnor, [true, false, false, true]),
        ];
        for &(kind, expected) in table {
            for (i, &want) in expected.iter().enumerate() {
                let a = i >= 2;
                let b = i % 2 == 1;
                assert_eq!(eval_binary(kind, a, b), want, "{kind}({a}, {b})");
            }
        }
        assert!(eval_binary(GateKind::Not, false, false));
        assert!(eval_binary(GateKind::Not, false, true));
        assert!(!eval_binary(GateKind::Not, true, false));
    }

    #[test]
    fn nary_matches_binary_on_two_inputs() {
        for kind in GateKind::iter() {
            if kind.is_unary() {
                continue;
            }
            for a in [false, true] {
                for b in [false, true] {
                    assert_eq!(eval_nary(kind, &[a, b]), eval_binary(kind, a, b));
                }
            }
        }
    }

    #[test]
    fn empty_input_conventions() {
        assert!(!eval_nary(GateKind::And, &[]));
        assert!(eval_nary(GateKind::Nand, &[]));
        assert!(!eval_nary(GateKind::Or, &[]));
        assert!(eval_nary(GateKind::Nor, &[]));
        assert!(!eval_nary(GateKind::Xor, &[]));
        assert!(eval_nary(GateKind::Xnor, &[]));
        assert!(eval_nary(GateKind::Not, &[]));
    }

    #[test]
    fn xor_is_parity() {
        assert!(eval_nary(GateKind::Xor, &[true, true, true]));
        assert!(!eval_nary(GateKind::Xor, &[true, true, true, true]));
        assert!(!eval_nary(GateKind::Xnor, &[true, false, false]));
    }

    #[test]
    fn ordinal_order_is_stable() {
        let kinds: Vec<GateKind> = GateKind::iter().collect();
        assert_eq!(kinds.len(), GateKind::COUNT);
        assert_eq!(kinds[0], GateKind::And);
        assert_eq!(kinds[4], GateKind::Not);
        assert_eq!(kinds[6], GateKind::Xnor);
    }
}
