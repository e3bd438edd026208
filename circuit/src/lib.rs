#![no_std]
extern crate alloc;

pub mod alloc_entry;
pub mod builder;
pub mod circuit;
pub mod descriptor;
pub mod expr;
pub mod field;
pub mod types;

// Re-export public API
pub use alloc_entry::AllocationKind;
#[cfg(debug_assertions)]
pub use alloc_entry::{AllocationEntry, dump_variables};
pub use builder::{
    Allocation, BuilderScope, CircuitBuilderError, CompileConfig, Root, SubCircuit,
    SubCircuitLookup, SubCircuitRegistry,
};
pub use circuit::CircuitDescription;
pub use descriptor::{LeafDescriptor, LeafInfo, Visibility};
pub use expr::{LinearExpression, Term};
pub use field::FieldContext;
pub use types::{SubCircuitId, Variable, VariableAllocator};
