//! Circuit description builder with specialized sub-components.

mod config;
mod errors;
mod public_input_tracker;
mod registry;
mod root;
mod scope;

pub use config::CompileConfig;
pub use errors::CircuitBuilderError;
pub use public_input_tracker::PublicInputTracker;
pub use registry::{SubCircuit, SubCircuitRegistry};
pub use root::{Root, SubCircuitLookup};
pub use scope::{Allocation, BuilderScope};
