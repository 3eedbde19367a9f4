//! Transfer-mechanism catalog records.
//!
//! A transfer mechanism is a legal safeguard permitting a cross-border
//! transfer to a third country: SCCs, BCRs, adequacy decisions, and
//! Article 49 derogations.

use serde::{Deserialize, Serialize};

use ropa_core::{MechanismCategory, MechanismId};

/// A legal safeguard for third-country transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferMechanism {
    /// Unique mechanism identifier, assigned at seed time.
    pub id: MechanismId,
    /// Human-readable name, unique within the catalog.
    pub name: String,
    /// Legal category.
    pub category: MechanismCategory,
    /// Whether supporting documentation must be retained for audit.
    pub requires_documentation: bool,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransferMechanism {
    /// Whether this mechanism legally covers a third-country transfer.
    pub fn provides_safeguard(&self) -> bool {
        self.category.provides_safeguard()
    }
}
