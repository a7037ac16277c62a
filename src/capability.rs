//! Capability names and per-operation declaration metadata.
//!
//! The contract publishes which capability each operation requires; it never
//! enforces the gate itself. The authorization layer checks a calling
//! account's granted capabilities against this metadata before invoking
//! anything, which keeps adapters free of authorization logic.

use serde::{Deserialize, Serialize};

/// Named permission gating whether an operation may be invoked for a given
/// account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddonCapability {
    /// Read-style access to the account's items.
    Access,
    /// Write-style access. No operation in this crate requires it yet.
    Update,
}

/// How an operation is executed once authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Runs inline and returns its result directly.
    Immediate,
}

/// Statically discoverable declaration of one contract operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDecl {
    pub name: &'static str,
    pub capability: AddonCapability,
    pub kind: OperationKind,
}

impl OperationDecl {
    pub const fn immediate(name: &'static str, capability: AddonCapability) -> Self {
        Self {
            name,
            capability,
            kind: OperationKind::Immediate,
        }
    }
}

/// Provider family, one per distinct operation-contract shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonFamily {
    Storage,
    Citation,
    Computing,
    Link,
}

impl AddonFamily {
    /// The family's capability-gated operation table, queryable without
    /// instantiating any adapter.
    pub fn operations(self) -> &'static [OperationDecl] {
        match self {
            AddonFamily::Storage => crate::interfaces::storage::OPERATIONS,
            AddonFamily::Citation => crate::interfaces::citation::OPERATIONS,
            AddonFamily::Computing => crate::interfaces::computing::OPERATIONS,
            AddonFamily::Link => crate::interfaces::link::OPERATIONS,
        }
    }

    /// Capability required to invoke `op_name`, or `None` for operations the
    /// family does not declare.
    pub fn required_capability(self, op_name: &str) -> Option<AddonCapability> {
        self.operations()
            .iter()
            .find(|op| op.name == op_name)
            .map(|op| op.capability)
    }
}
