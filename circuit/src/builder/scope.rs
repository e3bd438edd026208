//! Per-sub-circuit variable bookkeeping.

use alloc::vec::Vec;

use super::CircuitBuilderError;
use crate::types::{SubCircuitId, Variable, VariableAllocator};

/// Whether an allocation is a declared input of its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allocation {
    /// A declared (public or secret) input; counts towards the scope's external inputs.
    Input,
    /// A value derived inside the scope.
    Internal,
}

/// Variable bookkeeping for one sub-circuit.
///
/// Identifiers are minted by the compilation-wide [`VariableAllocator`], so a
/// scope only records which of them belong to it. Scopes are never shared for
/// concurrent mutation; every mutating method takes `&mut self`.
#[derive(Debug, Clone)]
pub struct BuilderScope {
    id: SubCircuitId,
    /// Fixed at creation.
    one: Variable,
    num_external_inputs: usize,
    /// Every variable allocated in this scope, in allocation order. Strictly
    /// increasing, since ids come from one monotonic counter.
    variables: Vec<Variable>,
    outputs: Vec<Variable>,
}

impl BuilderScope {
    /// Creates an empty scope for sub-circuit `id`.
    pub fn new(id: SubCircuitId) -> Self {
        Self::with_capacity(id, 0)
    }

    /// Creates an empty scope with room for `capacity` variables.
    pub fn with_capacity(id: SubCircuitId, capacity: usize) -> Self {
        Self {
            id,
            one: Variable::ONE,
            num_external_inputs: 0,
            variables: Vec::with_capacity(capacity),
            outputs: Vec::new(),
        }
    }

    /// Mints a fresh variable from `allocator` and records it in this scope.
    ///
    /// Increments the external-input counter iff `kind` is [`Allocation::Input`].
    /// If the allocator is exhausted the scope is left unchanged.
    pub fn allocate(
        &mut self,
        allocator: &mut VariableAllocator,
        kind: Allocation,
    ) -> Result<Variable, CircuitBuilderError> {
        let var = allocator.alloc()?;
        if kind == Allocation::Input {
            self.num_external_inputs += 1;
        }
        self.variables.push(var);
        Ok(var)
    }

    /// The constant-one wire of this scope.
    pub const fn constant_one_wire(&self) -> Variable {
        self.one
    }

    /// Identity of the sub-circuit owning this scope.
    pub const fn id(&self) -> SubCircuitId {
        self.id
    }

    /// Number of declared inputs so far.
    pub const fn num_external_inputs(&self) -> usize {
        self.num_external_inputs
    }

    /// Variables allocated in this scope, in allocation order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns true if `var` was allocated in this scope.
    ///
    /// The constant-one wire is never owned by a scope.
    pub fn owns(&self, var: Variable) -> bool {
        self.variables.binary_search(&var).is_ok()
    }

    /// Records `var` as an output of this scope.
    ///
    /// Fails with [`CircuitBuilderError::VariableNotInScope`] unless `var` was
    /// allocated here.
    pub fn mark_output(&mut self, var: Variable) -> Result<(), CircuitBuilderError> {
        if !self.owns(var) {
            return Err(CircuitBuilderError::VariableNotInScope { var, id: self.id });
        }
        self.outputs.push(var);
        Ok(())
    }

    /// Declared outputs, in declaration order.
    pub fn outputs(&self) -> &[Variable] {
        &self.outputs
    }
}
