use alloc::vec::Vec;

use crate::builder::{BuilderScope, CompileConfig, SubCircuit, SubCircuitRegistry};
use crate::field::FieldContext;
use crate::types::{SubCircuitId, Variable};

/// Finished circuit description, handed to the constraint and layering stages.
///
/// This is the consumed form of a [`Root`](crate::Root): the field binding, the
/// public variables in declaration order, and every registered sub-circuit with
/// its scope, root first.
#[derive(Debug, Clone)]
pub struct CircuitDescription<F> {
    pub field: FieldContext<F>,
    pub config: CompileConfig,
    /// Number of allocated variables, not counting the constant-one wire.
    pub variable_count: u32,
    /// Public variables in declaration order
    pub public_variables: Vec<Variable>,
    pub registry: SubCircuitRegistry,
}

impl<F> CircuitDescription<F> {
    /// The top-level scope (sub-circuit 0).
    pub fn root_scope(&self) -> &BuilderScope {
        self.registry.root().scope()
    }

    pub fn sub_circuit(&self, id: SubCircuitId) -> Option<&SubCircuit> {
        self.registry.lookup(id)
    }

    /// Number of declared inputs of the top-level circuit, public and secret.
    pub fn num_inputs(&self) -> usize {
        self.root_scope().num_external_inputs()
    }

    /// Returns true if `var` was declared public.
    pub fn is_public(&self, var: Variable) -> bool {
        self.public_variables.contains(&var)
    }
}
