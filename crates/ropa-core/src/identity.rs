//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the ROPA platform.
//! Each identifier is a distinct type: you cannot pass a [`RecipientId`]
//! where a [`DataCategoryId`] is expected, and a traversal that walks
//! recipient parents cannot accidentally index into the location arena.
//!
//! All identifiers are UUID v4 and therefore always valid by construction.
//! Reference-data identifiers ([`CountryId`], [`DataNatureId`],
//! [`MechanismId`]) are assigned at seed time and never re-issued while
//! referenced.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a tenant organization.
///
/// Every organization-scoped record carries an `OrganizationId`, and every
/// read or write against the register re-verifies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(Uuid);

impl OrganizationId {
    /// Create a new random organization identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an organization identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrganizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a recipient (processor, sub-processor, joint
/// controller) receiving or processing an organization's personal data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientId(Uuid);

impl RecipientId {
    /// Create a new random recipient identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a recipient identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecipientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a digital asset (a system that hosts or
/// processes personal data).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Create a new random asset identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an asset identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a processing activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(Uuid);

impl ActivityId {
    /// Create a new random activity identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an activity identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a data category (an organization-owned
/// classification bucket).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataCategoryId(Uuid);

impl DataCategoryId {
    /// Create a new random data-category identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a data-category identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DataCategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DataCategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a data nature (a global Article 9/10
/// classification atom such as "Health Data").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataNatureId(Uuid);

impl DataNatureId {
    /// Create a new random data-nature identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a data-nature identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DataNatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DataNatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a country in the global reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryId(Uuid);

impl CountryId {
    /// Create a new random country identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a country identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CountryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a processing location (a declared
/// country+role+service fact attached to a recipient or digital asset).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(Uuid);

impl LocationId {
    /// Create a new random location identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a location identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a legal transfer mechanism (SCC, BCR,
/// adequacy decision, derogation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MechanismId(Uuid);

impl MechanismId {
    /// Create a new random mechanism identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a mechanism identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MechanismId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MechanismId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a processing purpose.
///
/// Purposes are not modeled by this core beyond the identifier; locations
/// carry the id opaquely so the owning system can join it back to its own
/// purpose catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurposeId(Uuid);

impl PurposeId {
    /// Create a new random purpose identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a purpose identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PurposeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PurposeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a junction row (category↔nature,
/// activity↔recipient, activity↔asset).
///
/// Junction rows have their own identity so that link-level metadata can
/// be added without restructuring the association tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(Uuid);

impl LinkId {
    /// Create a new random link identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a link identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
