//! # Country Catalog Records
//!
//! A country is the unit of jurisdiction in transfer analysis. Each record
//! carries a set of [`JurisdictionTag`]s describing its legal-framework
//! memberships; the transfer engine composes these into the
//! same-jurisdiction and third-country predicates.
//!
//! Countries are global reference data: never organization-scoped, never
//! mutated by this core, and never deleted while referenced.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use ropa_core::{CountryId, JurisdictionTag};

/// A country in the global reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Unique country identifier, assigned at seed time.
    pub id: CountryId,
    /// Full country name.
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub iso_code2: String,
    /// ISO 3166-1 alpha-3 code, when seeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_code3: Option<String>,
    /// Legal-framework memberships.
    pub jurisdiction_tags: BTreeSet<JurisdictionTag>,
}

impl Country {
    /// Whether the country carries the given tag.
    pub fn has_tag(&self, tag: JurisdictionTag) -> bool {
        self.jurisdiction_tags.contains(&tag)
    }

    /// Whether the country is a third country without an adequacy decision.
    ///
    /// A country tagged both `ThirdCountry` and `Adequate` (e.g. the UK,
    /// Japan) is not treated as a third country for safeguard purposes.
    pub fn is_third_country(&self) -> bool {
        self.has_tag(JurisdictionTag::ThirdCountry) && !self.has_tag(JurisdictionTag::Adequate)
    }

    /// Whether two countries operate under a common legal framework.
    ///
    /// Same country is trivially same jurisdiction. Otherwise the two tag
    /// sets must overlap on a tag that
    /// [`denotes_shared_framework`](JurisdictionTag::denotes_shared_framework)
    /// (both EU, both EEA, or both EFTA). Status tags (`ThirdCountry`,
    /// `Adequate`) never establish a shared framework.
    pub fn shares_jurisdiction_with(&self, other: &Country) -> bool {
        if self.id == other.id {
            return true;
        }
        self.jurisdiction_tags
            .iter()
            .any(|tag| tag.denotes_shared_framework() && other.has_tag(*tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, iso2: &str, tags: &[JurisdictionTag]) -> Country {
        Country {
            id: CountryId::new(),
            name: name.to_string(),
            iso_code2: iso2.to_string(),
            iso_code3: None,
            jurisdiction_tags: tags.iter().copied().collect(),
        }
    }

    #[test]
    fn same_country_is_same_jurisdiction() {
        let de = country("Germany", "DE", &[JurisdictionTag::Eu, JurisdictionTag::Eea]);
        assert!(de.shares_jurisdiction_with(&de));
    }

    #[test]
    fn two_eu_members_share_jurisdiction() {
        let de = country("Germany", "DE", &[JurisdictionTag::Eu, JurisdictionTag::Eea]);
        let fr = country("France", "FR", &[JurisdictionTag::Eu, JurisdictionTag::Eea]);
        assert!(de.shares_jurisdiction_with(&fr));
        assert!(fr.shares_jurisdiction_with(&de));
    }

    #[test]
    fn eea_overlap_without_eu_membership() {
        let de = country("Germany", "DE", &[JurisdictionTag::Eu, JurisdictionTag::Eea]);
        let no = country("Norway", "NO", &[JurisdictionTag::Eea, JurisdictionTag::Efta]);
        assert!(de.shares_jurisdiction_with(&no));
    }

    #[test]
    fn two_third_countries_do_not_share_jurisdiction() {
        let us = country("United States", "US", &[JurisdictionTag::ThirdCountry]);
        let cn = country("China", "CN", &[JurisdictionTag::ThirdCountry]);
        assert!(!us.shares_jurisdiction_with(&cn));
    }

    #[test]
    fn two_adequate_countries_do_not_share_jurisdiction() {
        let uk = country(
            "United Kingdom",
            "GB",
            &[JurisdictionTag::ThirdCountry, JurisdictionTag::Adequate],
        );
        let jp = country(
            "Japan",
            "JP",
            &[JurisdictionTag::ThirdCountry, JurisdictionTag::Adequate],
        );
        assert!(!uk.shares_jurisdiction_with(&jp));
    }

    #[test]
    fn adequacy_clears_third_country_status() {
        let us = country("United States", "US", &[JurisdictionTag::ThirdCountry]);
        let uk = country(
            "United Kingdom",
            "GB",
            &[JurisdictionTag::ThirdCountry, JurisdictionTag::Adequate],
        );
        assert!(us.is_third_country());
        assert!(!uk.is_third_country());
    }

    #[test]
    fn eu_member_is_not_third_country() {
        let de = country("Germany", "DE", &[JurisdictionTag::Eu, JurisdictionTag::Eea]);
        assert!(!de.is_third_country());
    }
}
