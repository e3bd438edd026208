//! Identity-keyed storage of sub-circuit scopes.
//!
//! The registry is what lets a repeated computation block be described once
//! and referenced many times: before building a block, the caller looks up
//! its identity and reuses the registered scope if there is one.

use alloc::vec::Vec;

use hashbrown::HashMap;

use super::CircuitBuilderError;
use super::scope::BuilderScope;
use crate::types::SubCircuitId;

/// A named wrapper around exactly one builder scope.
#[derive(Debug, Clone)]
pub struct SubCircuit {
    scope: BuilderScope,
}

impl SubCircuit {
    pub fn new(id: SubCircuitId) -> Self {
        Self {
            scope: BuilderScope::new(id),
        }
    }

    pub fn with_capacity(id: SubCircuitId, capacity: usize) -> Self {
        Self {
            scope: BuilderScope::with_capacity(id, capacity),
        }
    }

    pub const fn id(&self) -> SubCircuitId {
        self.scope.id()
    }

    pub const fn scope(&self) -> &BuilderScope {
        &self.scope
    }

    pub const fn scope_mut(&mut self) -> &mut BuilderScope {
        &mut self.scope
    }
}

/// Mapping from sub-circuit identity to its scope.
///
/// Sub-circuits live in an arena in registration order; `index` maps each
/// identity to its arena slot. Entries are never removed, so slots are stable.
///
/// Invariant: [`SubCircuitId::ROOT`] is registered at construction and always
/// occupies slot 0.
///
/// Caller-chosen identities and fresh identities live in disjoint ranges (see
/// [`SubCircuitId::FRESH_BASE`]), so a fresh sub-circuit can never be mistaken
/// for a keyed one.
#[derive(Debug, Clone)]
pub struct SubCircuitRegistry {
    circuits: Vec<SubCircuit>,
    index: HashMap<SubCircuitId, usize>,
    /// Next fresh identity; `None` once the reserved range is used up.
    next_fresh: Option<u64>,
}

impl Default for SubCircuitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubCircuitRegistry {
    /// Creates a registry holding only the root scope.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates a registry holding only the root scope, with room for
    /// `sub_circuits` entries and `root_variables` variables in the root scope.
    pub fn with_capacity(sub_circuits: usize, root_variables: usize) -> Self {
        let mut circuits = Vec::with_capacity(sub_circuits.max(1));
        circuits.push(SubCircuit::with_capacity(
            SubCircuitId::ROOT,
            root_variables,
        ));

        let mut index = HashMap::with_capacity(sub_circuits.max(1));
        index.insert(SubCircuitId::ROOT, 0);

        Self {
            circuits,
            index,
            next_fresh: Some(SubCircuitId::FRESH_BASE),
        }
    }

    /// Registers `sub_circuit` under the caller-chosen identity `id`.
    ///
    /// Fails with [`CircuitBuilderError::ReservedSubCircuitId`] if `id` lies in
    /// the fresh range, and with [`CircuitBuilderError::SubCircuitIdentityCollision`]
    /// if `id` is already taken, which always includes [`SubCircuitId::ROOT`].
    pub fn register(
        &mut self,
        id: SubCircuitId,
        sub_circuit: SubCircuit,
    ) -> Result<(), CircuitBuilderError> {
        if id.is_fresh() {
            tracing::debug!(%id, "rejected reserved sub-circuit identity");
            return Err(CircuitBuilderError::ReservedSubCircuitId { id });
        }
        self.insert(id, sub_circuit)
    }

    /// Registers an empty sub-circuit under the next fresh identity.
    ///
    /// Fails with [`CircuitBuilderError::SubCircuitIdsExhausted`] once the
    /// reserved range is used up.
    pub fn register_fresh(&mut self) -> Result<SubCircuitId, CircuitBuilderError> {
        let raw = self
            .next_fresh
            .ok_or(CircuitBuilderError::SubCircuitIdsExhausted)?;
        let id = SubCircuitId(raw);
        self.insert(id, SubCircuit::new(id))?;
        self.next_fresh = raw.checked_add(1);
        Ok(id)
    }

    fn insert(
        &mut self,
        id: SubCircuitId,
        sub_circuit: SubCircuit,
    ) -> Result<(), CircuitBuilderError> {
        debug_assert_eq!(
            sub_circuit.id(),
            id,
            "sub-circuit scope must carry the identity it is registered under"
        );

        if self.index.contains_key(&id) {
            tracing::debug!(%id, "rejected duplicate sub-circuit registration");
            return Err(CircuitBuilderError::SubCircuitIdentityCollision { id });
        }

        self.index.insert(id, self.circuits.len());
        self.circuits.push(sub_circuit);

        tracing::debug!(%id, total = self.circuits.len(), "registered sub-circuit");
        Ok(())
    }

    /// Returns the sub-circuit registered under `id`, if any.
    pub fn lookup(&self, id: SubCircuitId) -> Option<&SubCircuit> {
        self.index.get(&id).map(|&slot| &self.circuits[slot])
    }

    pub fn lookup_mut(&mut self, id: SubCircuitId) -> Option<&mut SubCircuit> {
        self.index.get(&id).map(|&slot| &mut self.circuits[slot])
    }

    pub fn contains(&self, id: SubCircuitId) -> bool {
        self.index.contains_key(&id)
    }

    /// The root scope's sub-circuit.
    pub fn root(&self) -> &SubCircuit {
        &self.circuits[0]
    }

    pub(crate) fn root_mut(&mut self) -> &mut SubCircuit {
        &mut self.circuits[0]
    }

    /// The identity the next call to [`register_fresh`](Self::register_fresh)
    /// will use, if the reserved range is not exhausted.
    pub const fn next_fresh_id(&self) -> Option<SubCircuitId> {
        match self.next_fresh {
            Some(raw) => Some(SubCircuitId(raw)),
            None => None,
        }
    }

    /// Number of registered sub-circuits, root included.
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Always false: the root scope is registered at construction.
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Registered sub-circuits in registration order, root first.
    pub fn iter(&self) -> impl Iterator<Item = &SubCircuit> {
        self.circuits.iter()
    }

    /// Registered identities in registration order, root first.
    pub fn ids(&self) -> impl Iterator<Item = SubCircuitId> + '_ {
        self.circuits.iter().map(SubCircuit::id)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::builder::scope::Allocation;
    use crate::types::VariableAllocator;

    #[test]
    fn test_new_registry_holds_root() {
        let registry = SubCircuitRegistry::new();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.contains(SubCircuitId::ROOT));
        assert_eq!(
            registry.lookup(SubCircuitId::ROOT).map(SubCircuit::id),
            Some(SubCircuitId::ROOT)
        );
        assert_eq!(registry.root().id(), SubCircuitId::ROOT);
        assert_eq!(
            registry.next_fresh_id(),
            Some(SubCircuitId(SubCircuitId::FRESH_BASE))
        );
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SubCircuitRegistry::new();
        let id = SubCircuitId(42);

        assert!(registry.lookup(id).is_none());
        registry.register(id, SubCircuit::new(id)).unwrap();

        assert_eq!(registry.lookup(id).map(SubCircuit::id), Some(id));
        assert_eq!(registry.len(), 2);
        // Keyed registration never consumes fresh identities.
        assert_eq!(
            registry.next_fresh_id(),
            Some(SubCircuitId(SubCircuitId::FRESH_BASE))
        );
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = SubCircuitRegistry::new();
        let id = SubCircuitId(7);
        registry.register(id, SubCircuit::new(id)).unwrap();

        let err = registry.register(id, SubCircuit::new(id)).unwrap_err();
        assert_eq!(err, CircuitBuilderError::SubCircuitIdentityCollision { id });
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_root_fails() {
        let mut registry = SubCircuitRegistry::new();
        let err = registry
            .register(SubCircuitId::ROOT, SubCircuit::new(SubCircuitId::ROOT))
            .unwrap_err();
        assert_eq!(
            err,
            CircuitBuilderError::SubCircuitIdentityCollision {
                id: SubCircuitId::ROOT
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_registration_keeps_existing_scope() {
        let mut allocator = VariableAllocator::new();
        let mut registry = SubCircuitRegistry::new();
        let id = SubCircuitId(3);

        let mut first = SubCircuit::new(id);
        first
            .scope_mut()
            .allocate(&mut allocator, Allocation::Input)
            .unwrap();
        registry.register(id, first).unwrap();

        assert!(registry.register(id, SubCircuit::new(id)).is_err());
        assert_eq!(
            registry.lookup(id).unwrap().scope().num_external_inputs(),
            1
        );
    }

    #[test]
    fn test_iteration_is_registration_order() {
        let mut registry = SubCircuitRegistry::with_capacity(4, 0);
        for raw in [9, 2, 5] {
            let id = SubCircuitId(raw);
            registry.register(id, SubCircuit::new(id)).unwrap();
        }

        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(
            ids,
            vec![
                SubCircuitId::ROOT,
                SubCircuitId(9),
                SubCircuitId(2),
                SubCircuitId(5)
            ]
        );
    }

    #[test]
    fn test_register_rejects_reserved_range() {
        let mut registry = SubCircuitRegistry::new();
        for raw in [SubCircuitId::FRESH_BASE, u64::MAX] {
            let id = SubCircuitId(raw);
            assert_eq!(
                registry.register(id, SubCircuit::new(id)),
                Err(CircuitBuilderError::ReservedSubCircuitId { id })
            );
        }
        let top = SubCircuitId(SubCircuitId::FRESH_BASE - 1);
        registry.register(top, SubCircuit::new(top)).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_fresh_and_keyed_never_meet() {
        let mut registry = SubCircuitRegistry::new();
        let fresh = registry.register_fresh().unwrap();
        let keyed = SubCircuitId(1);
        registry.register(keyed, SubCircuit::new(keyed)).unwrap();
        let fresh2 = registry.register_fresh().unwrap();

        assert!(fresh.is_fresh() && fresh2.is_fresh());
        assert!(!keyed.is_fresh());
        assert_eq!(fresh2.0, fresh.0 + 1);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_fresh_range_exhaustion() {
        let mut registry = SubCircuitRegistry::new();
        registry.next_fresh = Some(u64::MAX);

        assert_eq!(registry.register_fresh(), Ok(SubCircuitId(u64::MAX)));
        assert_eq!(registry.next_fresh_id(), None);
        assert_eq!(
            registry.register_fresh(),
            Err(CircuitBuilderError::SubCircuitIdsExhausted)
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_mut_reaches_arena_slot() {
        let mut allocator = VariableAllocator::new();
        let mut registry = SubCircuitRegistry::new();
        let id = SubCircuitId(1);
        registry.register(id, SubCircuit::new(id)).unwrap();

        let v = registry
            .lookup_mut(id)
            .unwrap()
            .scope_mut()
            .allocate(&mut allocator, Allocation::Internal)
            .unwrap();

        assert_eq!(registry.lookup(id).unwrap().scope().variables(), &[v]);
        assert!(registry.root().scope().variables().is_empty());
    }
}
