//! # ropa-transfer: Cross-Border Transfer Detection
//!
//! The capstone of the compliance-derivation engine. Composes three
//! inputs (the organization's home jurisdiction, the recipient
//! hierarchy, and the active processing-location snapshot) into
//! risk-annotated transfer findings.
//!
//! ## Architecture
//!
//! ```text
//! ropa-reference (catalog)   ropa-registry (arena)
//!          \                   /
//!           TransferDetector (read-only composition)
//!                |
//!        Transfer / OrganizationTransferReport / ActivityTransferAnalysis
//! ```
//!
//! The decision rules in [`rules`] are pure functions over reference
//! records; the [`detector`] walks the register and applies them per
//! active location.

pub mod detector;
pub mod report;
pub mod rules;

pub use detector::TransferDetector;
pub use report::{
    ActivityTransferAnalysis, CountryInvolvement, OrganizationTransferReport, RiskDistribution,
    Transfer, TransferSummary,
};
pub use rules::{
    classify_risk, is_same_jurisdiction, is_third_country, requires_safeguards, TransferRisk,
};
