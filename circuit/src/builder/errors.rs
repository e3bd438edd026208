use thiserror::Error;

use crate::types::{SubCircuitId, Variable};

/// Errors that can occur while describing a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitBuilderError {
    /// The requested field is not the one this builder is bound to.
    #[error("Unsupported field: requested modulus {requested}, only {supported} is supported")]
    UnsupportedField { requested: u64, supported: u64 },

    /// A sub-circuit is already registered under this identity.
    #[error("Sub-circuit identity {id} is already registered")]
    SubCircuitIdentityCollision { id: SubCircuitId },

    /// No sub-circuit is registered under this identity.
    #[error("Sub-circuit {id} not found")]
    UnknownSubCircuit { id: SubCircuitId },

    /// A caller-chosen identity falls in the range reserved for fresh sub-circuits.
    #[error("Sub-circuit identity {id} is reserved for fresh sub-circuits")]
    ReservedSubCircuitId { id: SubCircuitId },

    /// Every fresh sub-circuit identity has been handed out.
    #[error("Fresh sub-circuit identities exhausted")]
    SubCircuitIdsExhausted,

    /// The variable was not allocated in the addressed sub-circuit.
    #[error("Variable {var} is not allocated in sub-circuit {id}")]
    VariableNotInScope { var: Variable, id: SubCircuitId },

    /// Every variable identifier has been handed out.
    #[error("Variable identifiers exhausted")]
    VariableIdsExhausted,
}
