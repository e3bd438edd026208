//! Binding between the builder and the prime field it targets.

use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use p3_field::PrimeField64;

/// The field a compilation is bound to.
///
/// Arithmetic lives in `p3-field`; this type only records which field the
/// builder was constructed for and answers whether a requested modulus matches it.
pub struct FieldContext<F> {
    _phantom: PhantomData<F>,
}

impl<F: PrimeField64> FieldContext<F> {
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// The characteristic of the field.
    pub const fn modulus(&self) -> u64 {
        F::ORDER_U64
    }

    /// Number of bits needed to represent any field element.
    pub fn bits(&self) -> usize {
        F::bits()
    }

    /// Returns true if `modulus` names this field.
    pub const fn supports(&self, modulus: u64) -> bool {
        modulus == F::ORDER_U64
    }
}

impl<F: PrimeField64> Default for FieldContext<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Clone for FieldContext<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for FieldContext<F> {}

impl<F> fmt::Debug for FieldContext<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContext")
            .field("field", &type_name::<F>())
            .finish()
    }
}
