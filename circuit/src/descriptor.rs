//! Metadata handles for declared variables.
//!
//! The reflection layer that walks user input structures hands one descriptor
//! to the builder per leaf. The builder never inspects it beyond its name,
//! which only shows up in logs and in the debug allocation log.

use alloc::string::String;
use core::fmt;

/// An opaque handle describing a leaf of the user's input structure.
pub trait LeafDescriptor {
    /// Fully qualified name of the leaf, e.g. `"input.a[3]"`.
    fn name(&self) -> &str;
}

impl LeafDescriptor for str {
    fn name(&self) -> &str {
        self
    }
}

impl LeafDescriptor for String {
    fn name(&self) -> &str {
        self
    }
}

impl<T: LeafDescriptor + ?Sized> LeafDescriptor for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Visibility a leaf was declared with in the user's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Secret,
    Public,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret => f.write_str("secret"),
            Self::Public => f.write_str("public"),
        }
    }
}

/// Leaf metadata as produced by a struct walker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeafInfo {
    pub full_name: String,
    pub visibility: Visibility,
}

impl LeafInfo {
    pub fn new(full_name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            full_name: full_name.into(),
            visibility,
        }
    }

    pub fn secret(full_name: impl Into<String>) -> Self {
        Self::new(full_name, Visibility::Secret)
    }

    pub fn public(full_name: impl Into<String>) -> Self {
        Self::new(full_name, Visibility::Public)
    }
}

impl LeafDescriptor for LeafInfo {
    fn name(&self) -> &str {
        &self.full_name
    }
}
