//! # Special-Category Classification
//!
//! Derives a data category's Article 9 "special category" flag from its
//! linked data natures, with a conservative manual-override rule.
//!
//! The decision is a sum type, not a pair of nullable columns: a category
//! is either [`Computed`](SpecialCategoryStatus::Computed) from its links
//! or [`Overridden`](SpecialCategoryStatus::Overridden) by a named actor
//! with a mandatory justification. Downstream logic pattern-matches; no
//! ad hoc null checks.

use serde::{Deserialize, Serialize};

use ropa_core::{Timestamp, ValidationError};
use ropa_reference::DataNature;

/// How a category's special-category flag was determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SpecialCategoryStatus {
    /// Derived from the linked natures; recomputed whenever the link set
    /// changes.
    Computed {
        /// The derived flag.
        value: bool,
    },
    /// Asserted by a user. Holds until explicitly cleared, regardless of
    /// link-set changes.
    Overridden {
        /// The asserted flag.
        value: bool,
        /// Mandatory audit evidence for the assertion.
        justification: String,
        /// Who asserted the override.
        overridden_by: String,
        /// When the override was asserted.
        overridden_at: Timestamp,
    },
}

impl SpecialCategoryStatus {
    /// The effective special-category flag.
    pub fn value(&self) -> bool {
        match self {
            Self::Computed { value } | Self::Overridden { value, .. } => *value,
        }
    }

    /// Whether a manual override is in effect.
    pub fn is_overridden(&self) -> bool {
        matches!(self, Self::Overridden { .. })
    }
}

/// A caller's request to override the computed flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRequest {
    /// The asserted flag.
    pub value: bool,
    /// Mandatory justification; rejected when empty.
    pub justification: String,
    /// The asserting actor, for the audit trail.
    pub actor: String,
}

/// `true` iff any linked nature is classified Special.
///
/// An empty link set derives `false`: a category that names no natures
/// asserts nothing about Article 9 data.
pub fn derive_special_category<'a, I>(natures: I) -> bool
where
    I: IntoIterator<Item = &'a DataNature>,
{
    natures.into_iter().any(|n| n.is_special())
}

/// Combine the derived flag with an optional override into a status.
///
/// Overrides require a non-empty justification. An override asserting
/// `false` while the derivation says `true` is accepted (the flag is
/// user-correctable) but logged as audit evidence, because it downgrades
/// the conservative default.
pub fn resolve_special_category(
    computed: bool,
    request: Option<OverrideRequest>,
) -> Result<SpecialCategoryStatus, ValidationError> {
    match request {
        None => Ok(SpecialCategoryStatus::Computed { value: computed }),
        Some(request) => {
            if request.justification.trim().is_empty() {
                return Err(ValidationError::MissingOverrideJustification);
            }
            if computed && !request.value {
                tracing::warn!(
                    actor = %request.actor,
                    justification = %request.justification,
                    "special-category override downgrades a computed Article 9 flag"
                );
            }
            Ok(SpecialCategoryStatus::Overridden {
                value: request.value,
                justification: request.justification,
                overridden_by: request.actor,
                overridden_at: Timestamp::now(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ropa_core::{DataNatureId, NatureClassification};

    fn nature(name: &str, classification: NatureClassification) -> DataNature {
        DataNature {
            id: DataNatureId::new(),
            name: name.to_string(),
            classification,
            gdpr_article_ref: "Art. 9(1)".to_string(),
        }
    }

    #[test]
    fn empty_set_derives_false() {
        assert!(!derive_special_category(std::iter::empty::<&DataNature>()));
    }

    #[test]
    fn any_special_nature_wins() {
        let contact = nature("Contact Information", NatureClassification::NonSpecial);
        let health = nature("Health Data", NatureClassification::Special);
        assert!(derive_special_category([&contact, &health]));
        assert!(!derive_special_category([&contact]));
    }

    #[test]
    fn no_override_is_computed() {
        let status = resolve_special_category(true, None).unwrap();
        assert_eq!(status, SpecialCategoryStatus::Computed { value: true });
        assert!(!status.is_overridden());
        assert!(status.value());
    }

    #[test]
    fn override_takes_precedence() {
        let status = resolve_special_category(
            true,
            Some(OverrideRequest {
                value: false,
                justification: "pseudonymized before storage".to_string(),
                actor: "dpo@acme.example".to_string(),
            }),
        )
        .unwrap();
        assert!(status.is_overridden());
        assert!(!status.value());
    }

    #[test]
    fn empty_justification_rejected() {
        let err = resolve_special_category(
            false,
            Some(OverrideRequest {
                value: true,
                justification: "   ".to_string(),
                actor: "dpo@acme.example".to_string(),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MissingOverrideJustification));
    }

    #[test]
    fn upgrade_override_is_accepted() {
        let status = resolve_special_category(
            false,
            Some(OverrideRequest {
                value: true,
                justification: "free-text fields carry health details".to_string(),
                actor: "dpo@acme.example".to_string(),
            }),
        )
        .unwrap();
        assert!(status.value());
    }

    #[test]
    fn status_serializes_with_source_tag() {
        let json =
            serde_json::to_string(&SpecialCategoryStatus::Computed { value: true }).unwrap();
        assert!(json.contains("computed"));
    }
}
