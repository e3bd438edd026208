//! Module defining allocation entries for debugging purposes.
//! These complement circuit description by logging every variable minted
//! by the root, together with the scope it belongs to.
//!
//! Only [`AllocationKind`] exists in release builds, where it tags trace events.

#[cfg(debug_assertions)]
use alloc::string::String;
#[cfg(debug_assertions)]
use alloc::vec::Vec;

#[cfg(debug_assertions)]
use crate::types::{SubCircuitId, Variable};

/// Kind of allocation for debugging purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    Secret,
    Public,
    SubCircuitInput,
    Internal,
}

/// Detailed allocation entry for debugging
#[cfg(debug_assertions)]
#[derive(Debug, Clone)]
pub struct AllocationEntry {
    /// The variable allocated
    pub var: Variable,
    /// Kind of allocation
    pub kind: AllocationKind,
    /// Descriptor name or user-provided label (may be empty)
    pub label: String,
    /// Sub-circuit this allocation belongs to
    pub scope: SubCircuitId,
}

/// Look up allocation info for specific variables and dump to debug log.
#[cfg(debug_assertions)]
pub fn dump_variables(allocation_log: &[AllocationEntry], vars: &[Variable]) {
    tracing::debug!("=== Allocation Info for Variables {:?} ===", vars);
    for var in vars {
        if var.is_one() {
            tracing::debug!("  {} = constant-one wire", var);
        } else if let Some(entry) = allocation_log.iter().find(|e| e.var == *var) {
            tracing::debug!(
                "  {} = {:?}, label='{}', scope={}",
                entry.var,
                entry.kind,
                entry.label,
                entry.scope
            );
        } else {
            tracing::debug!("  {} not found in allocation log", var);
        }
    }
    tracing::debug!("=== End Variable Info ===\n");
}

/// Dump an allocation log, one section per scope in first-use order.
#[cfg(debug_assertions)]
pub(crate) fn dump_allocation_log(allocation_log: &[AllocationEntry]) {
    tracing::debug!("=== Circuit Allocation Log ===");
    tracing::debug!("Total allocations: {}\n", allocation_log.len());

    for scope in list_scopes(allocation_log) {
        dump_allocation_log_scope(allocation_log, scope);
    }

    tracing::debug!("=== End Allocation Log ===\n");
}

/// Dump the allocations of a single scope, grouped by kind.
#[cfg(debug_assertions)]
pub(crate) fn dump_allocation_log_scope(allocation_log: &[AllocationEntry], scope: SubCircuitId) {
    let filtered: Vec<_> = allocation_log
        .iter()
        .filter(|e| e.scope == scope)
        .collect();

    if filtered.is_empty() {
        tracing::debug!("\nScope {} has no allocations\n", scope);
        return;
    }

    tracing::debug!("=== Allocation Log for scope {} ===", scope);
    tracing::debug!("Total allocations in scope: {}\n", filtered.len());

    for kind in [
        AllocationKind::Public,
        AllocationKind::Secret,
        AllocationKind::SubCircuitInput,
        AllocationKind::Internal,
    ] {
        let entries: Vec<_> = filtered.iter().filter(|e| e.kind == kind).collect();
        if entries.is_empty() {
            continue;
        }
        tracing::debug!("{:?} ({}):", kind, entries.len());
        for entry in entries {
            if entry.label.is_empty() {
                tracing::debug!("  {}", entry.var);
            } else {
                tracing::debug!("  {} ({})", entry.var, entry.label);
            }
        }
    }

    tracing::debug!("=== End Scope Log ===\n");
}

/// Unique scopes appearing in the log, in first-use order.
#[cfg(debug_assertions)]
pub(crate) fn list_scopes(allocation_log: &[AllocationEntry]) -> Vec<SubCircuitId> {
    let mut scopes: Vec<SubCircuitId> = Vec::new();
    for entry in allocation_log {
        if !scopes.contains(&entry.scope) {
            scopes.push(entry.scope);
        }
    }
    scopes
}
