//! # Transfer Decision Rules
//!
//! The pure predicates at the heart of cross-border detection, and the
//! four-tier risk ladder that annotates every detected transfer. All
//! functions here operate on reference records alone, with no register
//! access and no I/O, so every rule is unit-testable in isolation.

use serde::{Deserialize, Serialize};

use ropa_reference::{Country, TransferMechanism};

/// The risk tier attached to a detected transfer.
///
/// Derives `Ord`: `None < Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransferRisk {
    /// Same jurisdiction; no transfer occurs.
    None,
    /// Different jurisdiction, but the destination is adequate or inside
    /// the EU/EEA framework.
    Low,
    /// Third-country destination covered by a transfer mechanism on the
    /// location itself.
    Medium,
    /// Third-country destination with no mechanism on the location, but a
    /// safeguard-category mechanism elsewhere in the recipient chain.
    High,
    /// Third-country destination with no mechanism anywhere. Safeguards
    /// are required and absent.
    Critical,
}

impl TransferRisk {
    /// Return all risk tiers, lowest first.
    pub fn all() -> &'static [TransferRisk] {
        &[
            Self::None,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::Critical,
        ]
    }
}

impl std::fmt::Display for TransferRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// Whether two countries operate under a common legal framework.
///
/// Reflexive: `is_same_jurisdiction(x, x)` holds for every country.
pub fn is_same_jurisdiction(a: &Country, b: &Country) -> bool {
    a.shares_jurisdiction_with(b)
}

/// Whether a country is a third country without an adequacy decision.
pub fn is_third_country(country: &Country) -> bool {
    country.is_third_country()
}

/// Whether a transfer from `origin` to `destination` legally requires
/// safeguards: the jurisdictions differ and the destination is an
/// uncovered third country.
pub fn requires_safeguards(origin: &Country, destination: &Country) -> bool {
    !is_same_jurisdiction(origin, destination) && is_third_country(destination)
}

/// Derive the risk tier for one location.
///
/// `mechanism` is the mechanism attached to the location itself (already
/// resolved from the catalog); `chain_has_safeguard` reports whether a
/// safeguard-category mechanism exists elsewhere in the owning
/// recipient's chain. Mechanism presence decides `Medium` even when the
/// mechanism requires documentation; evidence tracking lives outside
/// this core.
pub fn classify_risk(
    origin: &Country,
    destination: &Country,
    mechanism: Option<&TransferMechanism>,
    chain_has_safeguard: bool,
) -> TransferRisk {
    if is_same_jurisdiction(origin, destination) {
        return TransferRisk::None;
    }
    if is_third_country(destination) {
        if mechanism.is_some_and(|m| m.provides_safeguard()) {
            return TransferRisk::Medium;
        }
        if chain_has_safeguard {
            return TransferRisk::High;
        }
        return TransferRisk::Critical;
    }
    TransferRisk::Low
}
