//! # Domain Enums
//!
//! Defines the closed enums every other crate in the workspace matches on:
//! jurisdiction tags, Article 9 classification, sensitivity levels,
//! recipient kinds, location roles, and transfer-mechanism categories.
//! Each is defined exactly once; the compiler enforces exhaustive `match`
//! wherever they are consumed, so adding a variant forces every handler
//! in the workspace to address it.

use serde::{Deserialize, Serialize};

/// A label on a country denoting its legal-framework membership.
///
/// A country may carry several tags (Germany is both `Eu` and `Eea`;
/// Norway is `Eea` and `Efta` but not `Eu`). `Adequate` marks a third
/// country covered by an adequacy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionTag {
    /// European Union member state.
    Eu,
    /// European Economic Area member (EU plus Iceland, Liechtenstein, Norway).
    Eea,
    /// European Free Trade Association member.
    Efta,
    /// Country outside the EU/EEA legal framework.
    ThirdCountry,
    /// Third country covered by an adequacy decision (Art. 45 GDPR).
    Adequate,
}

impl JurisdictionTag {
    /// Whether two countries sharing this tag operate under a common
    /// legal framework for transfer purposes.
    ///
    /// `ThirdCountry` and `Adequate` are status markers, not frameworks:
    /// two unrelated third countries share no legal basis merely because
    /// both carry the tag.
    pub fn denotes_shared_framework(&self) -> bool {
        matches!(self, Self::Eu | Self::Eea | Self::Efta)
    }

    /// Return all jurisdiction tags as a slice.
    pub fn all() -> &'static [JurisdictionTag] {
        &[
            Self::Eu,
            Self::Eea,
            Self::Efta,
            Self::ThirdCountry,
            Self::Adequate,
        ]
    }
}

impl std::fmt::Display for JurisdictionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Eu => "eu",
            Self::Eea => "eea",
            Self::Efta => "efta",
            Self::ThirdCountry => "third_country",
            Self::Adequate => "adequate",
        };
        write!(f, "{s}")
    }
}

/// The Article 9/10 classification of a data nature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NatureClassification {
    /// Special category data under Article 9 (or criminal-conviction data
    /// under Article 10); triggers stricter processing safeguards.
    Special,
    /// Ordinary personal data.
    NonSpecial,
}

impl NatureClassification {
    /// Whether this classification marks special category data.
    pub fn is_special(&self) -> bool {
        matches!(self, Self::Special)
    }
}

impl std::fmt::Display for NatureClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Special => "special",
            Self::NonSpecial => "non_special",
        };
        write!(f, "{s}")
    }
}

/// The sensitivity level of a data category.
///
/// Derives `Ord`: `Public < Internal < Confidential < Restricted`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityLevel {
    /// Freely publishable data.
    Public,
    /// Internal-use data.
    Internal,
    /// Confidential data with restricted access.
    Confidential,
    /// Restricted data with need-to-know access only.
    Restricted,
}

impl std::fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Confidential => "confidential",
            Self::Restricted => "restricted",
        };
        write!(f, "{s}")
    }
}

/// The role a recipient plays with respect to the organization's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientKind {
    /// Independent controller receiving data.
    Controller,
    /// Joint controller under Art. 26.
    JointController,
    /// Processor acting on the organization's instructions (Art. 28).
    Processor,
    /// Sub-processor engaged by a processor.
    SubProcessor,
    /// Any other third party.
    ThirdParty,
}

impl std::fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Controller => "controller",
            Self::JointController => "joint_controller",
            Self::Processor => "processor",
            Self::SubProcessor => "sub_processor",
            Self::ThirdParty => "third_party",
        };
        write!(f, "{s}")
    }
}

/// What a processing location does with the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationRole {
    /// Data is stored at this location.
    Hosting,
    /// Data is processed (but not stored) at this location.
    Processing,
    /// Data is both stored and processed at this location.
    Both,
}

impl LocationRole {
    /// Whether data is at rest at this location.
    pub fn covers_hosting(&self) -> bool {
        matches!(self, Self::Hosting | Self::Both)
    }

    /// Whether data is actively processed at this location.
    pub fn covers_processing(&self) -> bool {
        matches!(self, Self::Processing | Self::Both)
    }
}

impl std::fmt::Display for LocationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Hosting => "hosting",
            Self::Processing => "processing",
            Self::Both => "both",
        };
        write!(f, "{s}")
    }
}

/// The legal category of a transfer mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechanismCategory {
    /// Adequacy decision (Art. 45).
    Adequacy,
    /// Appropriate safeguards such as SCCs or BCRs (Art. 46).
    Safeguard,
    /// Derogation for specific situations (Art. 49).
    Derogation,
    /// Explicitly no mechanism, kept as a placeholder for flagged gaps.
    None,
}

impl MechanismCategory {
    /// Whether a mechanism of this category legally covers a
    /// third-country transfer.
    pub fn provides_safeguard(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for MechanismCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Adequacy => "adequacy",
            Self::Safeguard => "safeguard",
            Self::Derogation => "derogation",
            Self::None => "none",
        };
        write!(f, "{s}")
    }
}

/// The record families the register and reference store manage.
///
/// Used in `NotFound` errors so callers see which table missed without
/// the error leaking whether the id exists under another tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Tenant organization.
    Organization,
    /// Recipient.
    Recipient,
    /// Digital asset.
    DigitalAsset,
    /// Processing activity.
    ProcessingActivity,
    /// Data category.
    DataCategory,
    /// Data nature (reference).
    DataNature,
    /// Country (reference).
    Country,
    /// Processing location.
    ProcessingLocation,
    /// Transfer mechanism (reference).
    TransferMechanism,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Organization => "organization",
            Self::Recipient => "recipient",
            Self::DigitalAsset => "digital asset",
            Self::ProcessingActivity => "processing activity",
            Self::DataCategory => "data category",
            Self::DataNature => "data nature",
            Self::Country => "country",
            Self::ProcessingLocation => "processing location",
            Self::TransferMechanism => "transfer mechanism",
        };
        write!(f, "{s}")
    }
}
