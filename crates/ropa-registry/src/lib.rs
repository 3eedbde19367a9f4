//! # ropa-registry: The Organization-Scoped Record Arena
//!
//! Everything a tenant owns lives here: recipients and their processor
//! hierarchy, digital assets, processing activities with their junction
//! links, data categories with Article 9 classification, and the
//! processing-location registry with its audit-preserving move/deactivate
//! semantics.
//!
//! The arena is [`ProcessingRegister`]: id→record maps with relationships
//! stored by id. Reference data is consumed read-only through
//! `&ReferenceStore` parameters; this crate never mutates the catalog.
//!
//! ## Tenancy Invariant
//!
//! Every operation resolves ids through organization-scoped accessors.
//! An id owned by another tenant is indistinguishable from a missing id.

pub mod activity;
pub mod asset;
pub mod category;
pub mod classification;
pub mod location;
pub mod organization;
pub mod recipient;
pub mod register;

pub use activity::{ActivityAssetLink, ActivityRecipientLink, ProcessingActivity};
pub use asset::DigitalAsset;
pub use category::{CategoryNatureLink, CategorySpec, CategoryUpdate, DataCategory};
pub use classification::{
    derive_special_category, resolve_special_category, OverrideRequest, SpecialCategoryStatus,
};
pub use location::{
    LocationOwner, LocationSpec, LocationUpdate, ProcessingLocation, SERVICE_MAX_LEN,
    SERVICE_MIN_LEN,
};
pub use organization::Organization;
pub use recipient::{Recipient, RecipientDepth, RecipientSpec};
pub use register::ProcessingRegister;
