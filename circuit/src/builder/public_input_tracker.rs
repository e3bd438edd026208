use alloc::vec::Vec;

use crate::types::Variable;

/// Manages public variable declarations and tracking.
///
/// Public is a tag layered on top of ordinary allocation: the tracker only
/// remembers which already-allocated variables were declared public, in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct PublicInputTracker {
    /// Public variables, in declaration order
    vars: Vec<Variable>,
}

impl PublicInputTracker {
    /// Creates a new public input tracker.
    pub const fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Tags `var` as public.
    ///
    /// Returns the position of `var` in the public input vector.
    pub fn push(&mut self, var: Variable) -> usize {
        let pos = self.vars.len();
        self.vars.push(var);
        pos
    }

    /// Returns the total count of public inputs.
    pub fn count(&self) -> usize {
        self.vars.len()
    }

    /// Public variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    pub fn into_variables(self) -> Vec<Variable> {
        self.vars
    }
}
