use logic_circuit::CircuitError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The difficulty profile is malformed; no circuit was built.
    #[error("invalid difficulty profile: {0}")]
    InvalidConfiguration(String),

    /// Every generation attempt produced an unsolvable or cyclic circuit.
    #[error("no solvable circuit after {attempts} attempt(s)")]
    Exhausted { attempts: usize },

    /// Too many free inputs to enumerate exhaustively.
    #[error("{count} free inputs exceed the enumeration ceiling")]
    TooManyFreeInputs { count: usize },

    #[error(transparent)]
    Circuit(#[from] CircuitError),
}
