#![deny(missing_docs)]

//! # ropa-core: Foundational Types for the ROPA Compliance Platform
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies, only
//! `serde`, `thiserror`, `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`RecipientId`] where an
//!    [`AssetId`] is expected.
//!
//! 2. **Closed enums defined once.** [`JurisdictionTag`],
//!    [`NatureClassification`], [`LocationRole`] and friends live here and
//!    nowhere else; every `match` on them is exhaustive across the
//!    workspace.
//!
//! 3. **[`RopaError`] hierarchy.** Structured errors with `thiserror`. No
//!    `Box<dyn Error>`, no `.unwrap()` outside tests. Absent ids and
//!    cross-tenant ids are indistinguishable by design.
//!
//! 4. **Cooperative cancellation.** Traversals accept a [`Cancellation`]
//!    token and abort rather than returning truncated results.

pub mod cancel;
pub mod domain;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use cancel::Cancellation;
pub use domain::{
    JurisdictionTag, LocationRole, MechanismCategory, NatureClassification, RecipientKind,
    RecordKind, SensitivityLevel,
};
pub use error::{
    CancelledError, ConfigurationError, ConflictError, RopaError, RopaResult, ValidationError,
};
pub use identity::{
    ActivityId, AssetId, CountryId, DataCategoryId, DataNatureId, LinkId, LocationId, MechanismId,
    OrganizationId, PurposeId, RecipientId,
};
pub use temporal::Timestamp;
