/// Options recognized when compiling a circuit description.
///
/// None of these affect variable numbering or sub-circuit identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileConfig {
    /// Expected number of root variables, used to pre-size the root scope and
    /// the debug allocation log.
    capacity: usize,
    /// Expected number of sub-circuits, used to pre-size the registry.
    sub_circuit_capacity: usize,
    /// Passed through to the constraint stage: do not reject inputs that end up unconstrained.
    ignore_unconstrained_inputs: bool,
}

impl CompileConfig {
    /// Creates a configuration with no capacity hint.
    pub const fn new() -> Self {
        Self {
            capacity: 0,
            sub_circuit_capacity: 0,
            ignore_unconstrained_inputs: false,
        }
    }

    /// Sets the capacity hint.
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the expected number of sub-circuits.
    pub const fn with_sub_circuit_capacity(mut self, sub_circuits: usize) -> Self {
        self.sub_circuit_capacity = sub_circuits;
        self
    }

    /// Allows inputs that no constraint refers to.
    pub const fn ignore_unconstrained_inputs(mut self) -> Self {
        self.ignore_unconstrained_inputs = true;
        self
    }

    /// Returns the capacity hint.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub const fn sub_circuit_capacity(&self) -> usize {
        self.sub_circuit_capacity
    }

    /// Returns whether unconstrained inputs are tolerated downstream.
    pub const fn ignores_unconstrained_inputs(&self) -> bool {
        self.ignore_unconstrained_inputs
    }
}
