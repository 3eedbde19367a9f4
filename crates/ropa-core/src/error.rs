//! # Error Hierarchy
//!
//! Structured error types for the entire ROPA platform, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The taxonomy matches what callers can act on: a record that is absent
//! *or belongs to another tenant* surfaces as the same `NotFound` (tenant
//! existence never leaks), malformed input is `Validation`, a hierarchy
//! mutation that would loop is `Cycle`, a missing computation precondition
//! is `Configuration`, a uniqueness violation is `Conflict`, and an
//! aborted traversal is `Cancelled`.

use thiserror::Error;

use crate::domain::RecordKind;
use crate::identity::{
    ActivityId, AssetId, CountryId, DataCategoryId, DataNatureId, LocationId, OrganizationId,
    RecipientId,
};

/// Top-level error type for the ROPA platform.
#[derive(Error, Debug)]
pub enum RopaError {
    /// The id is absent, or exists under a different organization.
    /// The two cases are deliberately indistinguishable.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Which record family missed.
        kind: RecordKind,
        /// The id that failed to resolve, rendered for diagnostics.
        id: String,
    },

    /// Malformed input rejected before any write.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A hierarchy mutation would create a loop.
    #[error("cycle detected: making {candidate_parent} the parent of {recipient} would create a loop")]
    Cycle {
        /// The recipient whose parent link was being changed.
        recipient: RecipientId,
        /// The rejected candidate parent.
        candidate_parent: RecipientId,
    },

    /// A required precondition for computation is absent. Fatal to the
    /// call that hit it; a signal to complete setup, not to retry.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A uniqueness or referential constraint was violated.
    #[error("conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// A traversal was aborted by the caller's deadline or cancel signal.
    /// No partial result is returned.
    #[error("operation cancelled: {0}")]
    Cancelled(#[from] CancelledError),
}

impl RopaError {
    /// Construct a `NotFound` for any displayable id.
    pub fn not_found(kind: RecordKind, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Result alias used across the workspace.
pub type RopaResult<T> = Result<T, RopaError>;

/// Validation errors for register inputs.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An override of the computed special-category flag was asserted
    /// without a justification. The justification is mandatory audit
    /// evidence.
    #[error("special-category override requires a non-empty justification")]
    MissingOverrideJustification,

    /// Service description outside the accepted length bounds.
    #[error("service description length {len} outside {min}..={max}")]
    ServiceLength {
        /// Length of the rejected text in characters.
        len: usize,
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// A mandatory name field was empty or whitespace-only.
    #[error("{field} must be non-empty")]
    EmptyName {
        /// The offending field.
        field: &'static str,
    },

}

/// Preconditions for derivation that only an administrator can supply.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Transfer analysis without a home jurisdiction is meaningless and
    /// must not produce false negatives.
    #[error(
        "organization {organization} has no headquarters country; set it before running transfer analysis"
    )]
    MissingHeadquartersCountry {
        /// The organization missing its home jurisdiction.
        organization: OrganizationId,
    },

    /// The configured headquarters country no longer resolves in the
    /// reference catalog.
    #[error("organization {organization} references unknown headquarters country {country}")]
    UnknownHeadquartersCountry {
        /// The organization holding the stale reference.
        organization: OrganizationId,
        /// The unresolvable country id.
        country: CountryId,
    },
}

/// Uniqueness and referential-integrity violations.
#[derive(Error, Debug)]
pub enum ConflictError {
    /// The (category, nature) pair is already linked.
    #[error("data category {category} is already linked to nature {nature}")]
    DuplicateNatureLink {
        /// The category side of the duplicate pair.
        category: DataCategoryId,
        /// The nature side of the duplicate pair.
        nature: DataNatureId,
    },

    /// The (activity, recipient) pair is already linked.
    #[error("activity {activity} is already linked to recipient {recipient}")]
    DuplicateActivityRecipientLink {
        /// The activity side of the duplicate pair.
        activity: ActivityId,
        /// The recipient side of the duplicate pair.
        recipient: RecipientId,
    },

    /// The (activity, asset) pair is already linked.
    #[error("activity {activity} is already linked to asset {asset}")]
    DuplicateActivityAssetLink {
        /// The activity side of the duplicate pair.
        activity: ActivityId,
        /// The asset side of the duplicate pair.
        asset: AssetId,
    },

    /// A recipient cannot be deleted while an activity still links it.
    #[error("recipient {recipient} is still linked to at least one activity; unlink first")]
    RecipientStillLinked {
        /// The recipient that remains referenced.
        recipient: RecipientId,
    },

    /// An asset cannot be deleted while an activity still links it.
    #[error("asset {asset} is still linked to at least one activity; unlink first")]
    AssetStillLinked {
        /// The asset that remains referenced.
        asset: AssetId,
    },

    /// A recipient cannot be deleted while children still point at it.
    #[error("recipient {recipient} still has child recipients; re-parent them first")]
    RecipientHasChildren {
        /// The recipient that remains a parent.
        recipient: RecipientId,
    },

    /// A deactivated location is historical record and cannot be edited
    /// or moved.
    #[error("location {location} is inactive; historical records are immutable")]
    LocationInactive {
        /// The historical location.
        location: LocationId,
    },
}

/// Cooperative-cancellation outcomes.
#[derive(Error, Debug)]
pub enum CancelledError {
    /// The caller-supplied deadline expired mid-traversal.
    #[error("deadline exceeded after {elapsed_ms} ms")]
    DeadlineExceeded {
        /// Milliseconds elapsed since the token was created.
        elapsed_ms: u64,
    },

    /// The caller cancelled the operation explicitly.
    #[error("cancelled by caller")]
    Cancelled,
}
