use core::fmt;

use serde::{Deserialize, Serialize};

use crate::builder::CircuitBuilderError;

/// Variable ID type - a unique identifier for one wire of the circuit, shared by
/// every sub-circuit scope of a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable(pub u32);

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl Variable {
    /// The constant-one wire - always carries the field element 1.
    pub const ONE: Self = Self(0);

    /// Returns true if this is the constant-one wire.
    pub const fn is_one(self) -> bool {
        self.0 == Self::ONE.0
    }
}

/// Identity of a sub-circuit in the registry.
///
/// Identities below [`SubCircuitId::FRESH_BASE`] are chosen by the caller,
/// usually as a deduplication key for a repeated computation block. Identities
/// with the high bit set are reserved for [`Root::fresh_sub_circuit`](crate::Root::fresh_sub_circuit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubCircuitId(pub u64);

impl fmt::Display for SubCircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fresh() {
            write!(f, "sc#{}", self.0 - Self::FRESH_BASE)
        } else {
            write!(f, "sc{}", self.0)
        }
    }
}

impl SubCircuitId {
    /// The top-level circuit, owned by the root.
    pub const ROOT: Self = Self(0);

    /// First identity of the reserved range handed out by the registry itself.
    pub const FRESH_BASE: u64 = 1 << 63;

    /// Returns true if this identity lies in the reserved range.
    pub const fn is_fresh(self) -> bool {
        self.0 >= Self::FRESH_BASE
    }
}

/// Variable allocator for monotonic index assignment.
///
/// Index 0 is reserved for [`Variable::ONE`]; the first call to
/// [`alloc`](Self::alloc) returns `Variable(1)` and the last one that succeeds
/// returns `Variable(u32::MAX)`. A compilation therefore holds at most
/// `u32::MAX` allocated variables.
#[derive(Debug, Clone)]
pub struct VariableAllocator {
    /// `None` once `Variable(u32::MAX)` has been handed out.
    next_idx: Option<u32>,
}

impl Default for VariableAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableAllocator {
    pub const fn new() -> Self {
        Self {
            next_idx: Some(Variable::ONE.0 + 1),
        }
    }

    /// Starts numbering at `next_idx` instead of 1.
    #[cfg(test)]
    pub(crate) const fn starting_at(next_idx: u32) -> Self {
        Self {
            next_idx: Some(next_idx),
        }
    }

    /// Mints the next variable.
    ///
    /// Fails with [`CircuitBuilderError::VariableIdsExhausted`] once every
    /// `u32` identifier is taken; the allocator is left unchanged.
    pub const fn alloc(&mut self) -> Result<Variable, CircuitBuilderError> {
        match self.next_idx {
            Some(idx) => {
                self.next_idx = idx.checked_add(1);
                Ok(Variable(idx))
            }
            None => Err(CircuitBuilderError::VariableIdsExhausted),
        }
    }

    /// Number of variables minted so far, not counting the constant-one wire.
    pub const fn variable_count(&self) -> u32 {
        match self.next_idx {
            Some(idx) => idx - 1,
            None => u32::MAX,
        }
    }

    /// The identifier the next call to [`alloc`](Self::alloc) will return, if any.
    pub const fn peek(&self) -> Option<Variable> {
        match self.next_idx {
            Some(idx) => Some(Variable(idx)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_variable_display() {
        assert_eq!(format!("{}", Variable(42)), "v42");
        assert_eq!(format!("{}", SubCircuitId(7)), "sc7");
        assert_eq!(
            format!("{}", SubCircuitId(SubCircuitId::FRESH_BASE + 2)),
            "sc#2"
        );
    }

    #[test]
    fn test_fresh_range() {
        assert!(!SubCircuitId::ROOT.is_fresh());
        assert!(!SubCircuitId(SubCircuitId::FRESH_BASE - 1).is_fresh());
        assert!(SubCircuitId(SubCircuitId::FRESH_BASE).is_fresh());
        assert!(SubCircuitId(u64::MAX).is_fresh());
    }

    #[test]
    fn test_allocator_exhaustion() {
        let mut allocator = VariableAllocator::starting_at(u32::MAX - 1);

        assert_eq!(allocator.alloc(), Ok(Variable(u32::MAX - 1)));
        assert_eq!(allocator.alloc(), Ok(Variable(u32::MAX)));
        assert_eq!(allocator.variable_count(), u32::MAX);
        assert_eq!(allocator.peek(), None);

        // Never wraps around to the constant-one wire.
        assert_eq!(
            allocator.alloc(),
            Err(CircuitBuilderError::VariableIdsExhausted)
        );
        assert_eq!(
            allocator.alloc(),
            Err(CircuitBuilderError::VariableIdsExhausted)
        );
        assert_eq!(allocator.variable_count(), u32::MAX);
    }

    #[test]
    fn test_one_wire_is_reserved() {
        let mut allocator = VariableAllocator::new();
        assert_eq!(allocator.variable_count(), 0);
        assert_eq!(allocator.peek(), Some(Variable(1)));

        let v = allocator.alloc().unwrap();
        assert_ne!(v, Variable::ONE);
        assert!(Variable::ONE.is_one());
        assert!(!v.is_one());
    }

    #[test]
    fn test_variable_allocator() {
        let mut allocator = VariableAllocator::new();

        let v1 = allocator.alloc().unwrap();
        let v2 = allocator.alloc().unwrap();
        let v3 = allocator.alloc().unwrap();

        assert_eq!(v1, Variable(1));
        assert_eq!(v2, Variable(2));
        assert_eq!(v3, Variable(3));
        assert_eq!(allocator.variable_count(), 3);
    }

    #[cfg(test)]
    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn variable_ordering(a in 0u32..u32::MAX, b in 0u32..u32::MAX) {
                let id_a = Variable(a);
                let id_b = Variable(b);

                if a < b {
                    prop_assert!(id_a < id_b, "ordering should match inner value");
                } else if a > b {
                    prop_assert!(id_a > id_b, "ordering should match inner value");
                } else {
                    prop_assert_eq!(id_a, id_b, "equal values should compare equal");
                }
            }

            #[test]
            fn sub_circuit_id_equality(a in any::<u64>(), b in any::<u64>()) {
                let id_a1 = SubCircuitId(a);
                let id_a2 = SubCircuitId(a);
                let id_b = SubCircuitId(b);

                prop_assert_eq!(id_a1, id_a2, "same value should be equal");
                if a != b {
                    prop_assert_ne!(id_a1, id_b, "different values should not be equal");
                }
            }

            #[test]
            fn variable_allocator_unique(count in 1usize..100) {
                let mut allocator = VariableAllocator::new();
                let mut seen = hashbrown::HashSet::new();
                seen.insert(Variable::ONE);

                for _ in 0..count {
                    let id = allocator.alloc().unwrap();
                    prop_assert!(seen.insert(id), "each allocation should be unique");
                }
            }

            #[test]
            fn variable_allocator_count_accurate(count in 0usize..100) {
                let mut allocator = VariableAllocator::new();

                prop_assert_eq!(allocator.variable_count(), 0, "new allocator should have count 0");

                for i in 1..=count {
                    allocator.alloc().unwrap();
                    prop_assert_eq!(
                        allocator.variable_count(),
                        i as u32,
                        "count should increment with each allocation"
                    );
                }
            }
        }
    }
}
