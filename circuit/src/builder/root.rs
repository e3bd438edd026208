#[cfg(debug_assertions)]
use alloc::string::ToString;
#[cfg(debug_assertions)]
use alloc::vec::Vec;

use p3_field::PrimeField64;
use tracing::instrument;

use super::registry::{SubCircuit, SubCircuitRegistry};
use super::scope::{Allocation, BuilderScope};
use super::{CircuitBuilderError, CompileConfig, PublicInputTracker};
use crate::alloc_entry::AllocationKind;
#[cfg(debug_assertions)]
use crate::alloc_entry::AllocationEntry;
use crate::circuit::CircuitDescription;
use crate::descriptor::LeafDescriptor;
use crate::expr::LinearExpression;
use crate::field::FieldContext;
use crate::types::{SubCircuitId, Variable, VariableAllocator};

/// Outcome of [`Root::get_or_create_sub_circuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCircuitLookup {
    /// A sub-circuit was already registered under this identity and is reused.
    Existing(SubCircuitId),
    /// A new, empty sub-circuit was registered.
    Created(SubCircuitId),
}

impl SubCircuitLookup {
    pub const fn id(self) -> SubCircuitId {
        match self {
            Self::Existing(id) | Self::Created(id) => id,
        }
    }

    pub const fn is_reused(self) -> bool {
        matches!(self, Self::Existing(_))
    }
}

/// Top-level entry point of circuit description.
///
/// Owns the field binding, the compile configuration, the compilation-wide
/// variable counter, the sub-circuit registry and the ordered list of public
/// variables. Its own scope is sub-circuit [`SubCircuitId::ROOT`], registered
/// at construction.
#[derive(Debug)]
pub struct Root<F> {
    field: FieldContext<F>,

    config: CompileConfig,

    /// Mints every variable of the compilation, whatever scope it lands in.
    allocator: VariableAllocator,

    registry: SubCircuitRegistry,

    public_tracker: PublicInputTracker,

    /// Complete allocation history for debugging.
    ///
    /// **Only present in debug builds.**
    #[cfg(debug_assertions)]
    allocation_log: Vec<AllocationEntry>,
}

impl<F: PrimeField64> Root<F> {
    /// Creates a root bound to the field with characteristic `target_modulus`.
    ///
    /// Fails with [`CircuitBuilderError::UnsupportedField`] if `target_modulus` is not
    /// the modulus of `F`. No partially built root is ever returned.
    #[instrument(skip_all, fields(requested = target_modulus, capacity = config.capacity()))]
    pub fn new(target_modulus: u64, config: CompileConfig) -> Result<Self, CircuitBuilderError> {
        let field = FieldContext::<F>::new();
        if !field.supports(target_modulus) {
            tracing::warn!(
                requested = target_modulus,
                supported = field.modulus(),
                "unsupported field"
            );
            return Err(CircuitBuilderError::UnsupportedField {
                requested: target_modulus,
                supported: field.modulus(),
            });
        }

        let capacity = config.capacity();
        let root = Self {
            field,
            registry: SubCircuitRegistry::with_capacity(config.sub_circuit_capacity(), capacity),
            public_tracker: PublicInputTracker::new(),
            allocator: VariableAllocator::new(),
            #[cfg(debug_assertions)]
            allocation_log: Vec::with_capacity(capacity),
            config,
        };

        tracing::debug!(modulus = root.field.modulus(), "root scope registered");
        Ok(root)
    }

    /// Declares a secret input of the root circuit.
    ///
    /// Returns the new variable as the single-term expression `1 * v`, or
    /// [`CircuitBuilderError::VariableIdsExhausted`] once every identifier is taken.
    pub fn secret_variable<L: LeafDescriptor + ?Sized>(
        &mut self,
        leaf: &L,
    ) -> Result<LinearExpression<F>, CircuitBuilderError> {
        let var = self.allocate_root(Allocation::Input, AllocationKind::Secret, leaf.name())?;
        Ok(LinearExpression::from_var(var))
    }

    /// Declares a public input of the root circuit.
    ///
    /// Allocates exactly like [`secret_variable`](Self::secret_variable), then
    /// appends the variable to the public list.
    pub fn public_variable<L: LeafDescriptor + ?Sized>(
        &mut self,
        leaf: &L,
    ) -> Result<LinearExpression<F>, CircuitBuilderError> {
        let var = self.allocate_root(Allocation::Input, AllocationKind::Public, leaf.name())?;
        let pos = self.public_tracker.push(var);
        tracing::trace!(%var, pos, "tagged public");
        Ok(LinearExpression::from_var(var))
    }

    /// Allocates a derived value in the root scope. It does not count as an input.
    pub fn internal_variable(&mut self, label: &str) -> Result<LinearExpression<F>, CircuitBuilderError> {
        let var = self.allocate_root(Allocation::Internal, AllocationKind::Internal, label)?;
        Ok(LinearExpression::from_var(var))
    }

    /// The constant `c`, expressed on the constant-one wire.
    pub fn constant(&self, c: F) -> LinearExpression<F> {
        LinearExpression::from_term(c, self.constant_one_wire())
    }

    /// The constant-one wire of the root scope.
    pub fn constant_one_wire(&self) -> Variable {
        self.root_scope().constant_one_wire()
    }

    /// Creates an empty sub-circuit and registers it under the caller-chosen `id`.
    ///
    /// Fails with [`CircuitBuilderError::SubCircuitIdentityCollision`] if `id`
    /// is taken; use [`get_or_create_sub_circuit`](Self::get_or_create_sub_circuit)
    /// to reuse an existing one instead. Identities in the fresh range are
    /// rejected with [`CircuitBuilderError::ReservedSubCircuitId`].
    pub fn new_sub_circuit(&mut self, id: SubCircuitId) -> Result<SubCircuitId, CircuitBuilderError> {
        self.registry.register(id, SubCircuit::new(id))?;
        Ok(id)
    }

    /// Creates an empty sub-circuit under an identity from the fresh range.
    ///
    /// Fresh identities are never equal to a caller-chosen key, so the new
    /// sub-circuit is not reachable through
    /// [`get_or_create_sub_circuit`](Self::get_or_create_sub_circuit).
    pub fn fresh_sub_circuit(&mut self) -> Result<SubCircuitId, CircuitBuilderError> {
        self.registry.register_fresh()
    }

    /// Returns the sub-circuit registered under the caller-chosen key `id`,
    /// creating it first if needed.
    ///
    /// Fails with [`CircuitBuilderError::ReservedSubCircuitId`] if `id` lies in
    /// the fresh range.
    pub fn get_or_create_sub_circuit(
        &mut self,
        id: SubCircuitId,
    ) -> Result<SubCircuitLookup, CircuitBuilderError> {
        if id.is_fresh() {
            return Err(CircuitBuilderError::ReservedSubCircuitId { id });
        }
        if self.registry.contains(id) {
            tracing::debug!(%id, "reusing sub-circuit");
            return Ok(SubCircuitLookup::Existing(id));
        }
        self.registry.register(id, SubCircuit::new(id))?;
        Ok(SubCircuitLookup::Created(id))
    }

    /// Declares an input of sub-circuit `id`.
    pub fn sub_circuit_input<L: LeafDescriptor + ?Sized>(
        &mut self,
        id: SubCircuitId,
        leaf: &L,
    ) -> Result<LinearExpression<F>, CircuitBuilderError> {
        let var = self.allocate_in(
            id,
            Allocation::Input,
            AllocationKind::SubCircuitInput,
            leaf.name(),
        )?;
        Ok(LinearExpression::from_var(var))
    }

    /// Allocates a derived value in sub-circuit `id`.
    pub fn sub_circuit_internal(
        &mut self,
        id: SubCircuitId,
        label: &str,
    ) -> Result<LinearExpression<F>, CircuitBuilderError> {
        let var = self.allocate_in(id, Allocation::Internal, AllocationKind::Internal, label)?;
        Ok(LinearExpression::from_var(var))
    }

    /// Records `var` as an output of sub-circuit `id`.
    ///
    /// `var` must have been allocated in that sub-circuit; otherwise this fails
    /// with [`CircuitBuilderError::VariableNotInScope`].
    pub fn mark_output(&mut self, id: SubCircuitId, var: Variable) -> Result<(), CircuitBuilderError> {
        self.registry
            .lookup_mut(id)
            .ok_or(CircuitBuilderError::UnknownSubCircuit { id })?
            .scope_mut()
            .mark_output(var)
    }

    /// Looks up a registered sub-circuit.
    pub fn sub_circuit(&self, id: SubCircuitId) -> Option<&SubCircuit> {
        self.registry.lookup(id)
    }

    pub const fn field(&self) -> &FieldContext<F> {
        &self.field
    }

    pub const fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Public variables in declaration order.
    pub fn public_variables(&self) -> &[Variable] {
        self.public_tracker.variables()
    }

    pub const fn registry(&self) -> &SubCircuitRegistry {
        &self.registry
    }

    /// The root's own scope (sub-circuit 0).
    pub fn root_scope(&self) -> &BuilderScope {
        self.registry.root().scope()
    }

    /// Number of variables allocated across all scopes, not counting the constant-one wire.
    pub const fn variable_count(&self) -> u32 {
        self.allocator.variable_count()
    }

    /// Ends the description phase and hands the result to downstream stages.
    #[instrument(skip_all)]
    pub fn finish(self) -> CircuitDescription<F> {
        tracing::info!(
            variables = self.allocator.variable_count(),
            public = self.public_tracker.count(),
            sub_circuits = self.registry.len(),
            "circuit description complete"
        );
        CircuitDescription {
            field: self.field,
            config: self.config,
            variable_count: self.allocator.variable_count(),
            public_variables: self.public_tracker.into_variables(),
            registry: self.registry,
        }
    }

    fn allocate_root(
        &mut self,
        kind: Allocation,
        log_kind: AllocationKind,
        label: &str,
    ) -> Result<Variable, CircuitBuilderError> {
        let var = self
            .registry
            .root_mut()
            .scope_mut()
            .allocate(&mut self.allocator, kind)?;
        self.log_alloc(var, log_kind, SubCircuitId::ROOT, label);
        Ok(var)
    }

    fn allocate_in(
        &mut self,
        id: SubCircuitId,
        kind: Allocation,
        log_kind: AllocationKind,
        label: &str,
    ) -> Result<Variable, CircuitBuilderError> {
        let var = self
            .registry
            .lookup_mut(id)
            .ok_or(CircuitBuilderError::UnknownSubCircuit { id })?
            .scope_mut()
            .allocate(&mut self.allocator, kind)?;
        self.log_alloc(var, log_kind, id, label);
        Ok(var)
    }

    /// Records an allocation in the debug log and emits a trace event.
    #[cfg(debug_assertions)]
    fn log_alloc(&mut self, var: Variable, kind: AllocationKind, scope: SubCircuitId, label: &str) {
        tracing::trace!(%var, %scope, ?kind, label, "allocated variable");
        self.allocation_log.push(AllocationEntry {
            var,
            kind,
            label: label.to_string(),
            scope,
        });
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    #[allow(clippy::needless_pass_by_ref_mut)]
    fn log_alloc(&mut self, var: Variable, kind: AllocationKind, scope: SubCircuitId, label: &str) {
        tracing::trace!(%var, %scope, ?kind, label, "allocated variable");
    }

    /// Returns the allocation log (debug builds only).
    #[cfg(debug_assertions)]
    pub fn allocation_log(&self) -> &[AllocationEntry] {
        &self.allocation_log
    }

    /// Dumps the allocation log for specific variables.
    ///
    /// If debug_assertions are not enabled, this is a no-op.
    #[allow(clippy::missing_const_for_fn)]
    #[allow(unused_variables)]
    pub fn dump_variables(&self, vars: &[Variable]) {
        #[cfg(debug_assertions)]
        crate::alloc_entry::dump_variables(&self.allocation_log, vars);
    }

    /// Dumps the allocation log, grouped by scope.
    ///
    /// If debug_assertions are not enabled, this is a no-op.
    #[allow(clippy::missing_const_for_fn)]
    pub fn dump_allocation_log(&self) {
        #[cfg(debug_assertions)]
        crate::alloc_entry::dump_allocation_log(&self.allocation_log);
    }
}
