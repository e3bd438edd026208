use alloc::vec::Vec;
use core::ops::{Add, Mul, Neg, Sub};

use hashbrown::HashMap;
use p3_field::Field;
use serde::{Deserialize, Serialize};

use crate::types::Variable;

/// One weighted variable of a linear expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term<F> {
    pub coef: F,
    pub var: Variable,
}

/// A weighted sum of variables.
///
/// Constants are encoded as terms on [`Variable::ONE`], so there is no separate
/// constant slot. Terms keep their insertion order, and combining two expressions
/// concatenates their terms without merging duplicate variables; call
/// [`simplify`](Self::simplify) to merge explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinearExpression<F> {
    terms: Vec<Term<F>>,
}

impl<F> LinearExpression<F> {
    /// The empty sum, evaluating to zero.
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Builds an expression from terms, preserving their order.
    pub const fn from_terms(terms: Vec<Term<F>>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[Term<F>] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Appends `coef * var` after the existing terms.
    pub fn push_term(&mut self, coef: F, var: Variable) {
        self.terms.push(Term { coef, var });
    }

    /// Variables referenced by this expression, in term order (duplicates included).
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms.iter().map(|t| t.var)
    }

    pub fn into_terms(self) -> Vec<Term<F>> {
        self.terms
    }
}

impl<F> Default for LinearExpression<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> LinearExpression<F> {
    /// The single-term expression `1 * var`.
    pub fn from_var(var: Variable) -> Self {
        Self::from_term(F::ONE, var)
    }

    pub fn from_term(coef: F, var: Variable) -> Self {
        Self {
            terms: alloc::vec![Term { coef, var }],
        }
    }

    /// The constant `c`, as `c * ONE`.
    pub fn constant(c: F) -> Self {
        Self::from_term(c, Variable::ONE)
    }

    /// Returns the variable if this expression is exactly `1 * var` on a non-constant wire.
    pub fn as_variable(&self) -> Option<Variable> {
        match self.terms.as_slice() {
            [Term { coef, var }] if *coef == F::ONE && !var.is_one() => Some(*var),
            _ => None,
        }
    }

    /// Returns the value of the expression if it only references the constant-one wire.
    ///
    /// The empty expression evaluates to zero.
    pub fn constant_value(&self) -> Option<F> {
        self.terms.iter().try_fold(F::ZERO, |acc, t| {
            if t.var.is_one() {
                Some(acc + t.coef)
            } else {
                None
            }
        })
    }

    /// Multiplies every coefficient by `k`.
    pub fn scale(&self, k: F) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| Term {
                    coef: t.coef * k,
                    var: t.var,
                })
                .collect(),
        }
    }

    /// Merges terms on the same variable and drops terms whose coefficient is zero.
    ///
    /// Each surviving variable keeps the position of its first occurrence.
    pub fn simplify(&self) -> Self {
        let mut position: HashMap<Variable, usize> = HashMap::with_capacity(self.terms.len());
        let mut merged: Vec<Term<F>> = Vec::with_capacity(self.terms.len());

        for t in &self.terms {
            match position.get(&t.var) {
                Some(&i) => merged[i].coef += t.coef,
                None => {
                    position.insert(t.var, merged.len());
                    merged.push(*t);
                }
            }
        }
        merged.retain(|t| t.coef != F::ZERO);

        Self { terms: merged }
    }

    /// Evaluates the expression given an assignment for its variables.
    ///
    /// The constant-one wire is always assigned `F::ONE`; `assignment` is never
    /// queried for it.
    pub fn evaluate(&self, mut assignment: impl FnMut(Variable) -> Option<F>) -> Option<F> {
        self.terms.iter().try_fold(F::ZERO, |acc, t| {
            let value = if t.var.is_one() {
                F::ONE
            } else {
                assignment(t.var)?
            };
            Some(acc + t.coef * value)
        })
    }
}

impl<F: Field> From<Variable> for LinearExpression<F> {
    fn from(var: Variable) -> Self {
        Self::from_var(var)
    }
}

impl<F> Add for LinearExpression<F> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.terms.extend(rhs.terms);
        self
    }
}

impl<F: Field> Neg for LinearExpression<F> {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(F::NEG_ONE)
    }
}

impl<F: Field> Sub for LinearExpression<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<F: Field> Mul<F> for LinearExpression<F> {
    type Output = Self;

    fn mul(self, rhs: F) -> Self {
        self.scale(rhs)
    }
}
