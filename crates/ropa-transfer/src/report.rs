//! # Transfer Reports
//!
//! The shapes handed upward to the presentation/reporting collaborator:
//! individual [`Transfer`] findings, aggregate [`TransferSummary`]
//! statistics, and the organization-wide and activity-scoped report
//! envelopes. This core produces the data; rendering, export, and
//! delivery happen elsewhere.

use serde::{Deserialize, Serialize};

use ropa_core::{
    ActivityId, CountryId, LocationId, MechanismId, OrganizationId, RecipientId,
};
use ropa_registry::LocationOwner;

use crate::rules::TransferRisk;

/// One detected cross-border transfer: a single active location whose
/// country is outside the organization's home jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// The analyzed organization.
    pub organization_id: OrganizationId,
    /// The organization's home jurisdiction.
    pub organization_country_id: CountryId,
    /// Who holds the data at the destination.
    pub owner: LocationOwner,
    /// The location that constitutes the transfer.
    pub location_id: LocationId,
    /// The location's service description.
    pub service: String,
    /// Where the data goes.
    pub destination_country_id: CountryId,
    /// Destination ISO-2 code, for display without a catalog join.
    pub destination_iso2: String,
    /// Destination country name.
    pub destination_name: String,
    /// Hierarchy depth of the owning recipient (0 for assets and for
    /// directly-analyzed recipients).
    pub depth: usize,
    /// The derived risk tier.
    pub risk: TransferRisk,
    /// The mechanism attached to the location, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_mechanism_id: Option<MechanismId>,
}

impl Transfer {
    /// The owning recipient, when the transfer is recipient-side.
    pub fn recipient_id(&self) -> Option<&RecipientId> {
        match &self.owner {
            LocationOwner::Recipient(id) => Some(id),
            LocationOwner::Asset(_) => None,
        }
    }
}

/// Transfer counts per risk tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    /// Transfers at `Low`.
    pub low: usize,
    /// Transfers at `Medium`.
    pub medium: usize,
    /// Transfers at `High`.
    pub high: usize,
    /// Transfers at `Critical`.
    pub critical: usize,
}

impl RiskDistribution {
    /// Count one transfer. `None`-tier entries are never emitted as
    /// transfers, so they have no bucket here.
    fn record(&mut self, risk: TransferRisk) {
        match risk {
            TransferRisk::None => {}
            TransferRisk::Low => self.low += 1,
            TransferRisk::Medium => self.medium += 1,
            TransferRisk::High => self.high += 1,
            TransferRisk::Critical => self.critical += 1,
        }
    }

    /// Total counted transfers.
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// A destination country with its share of the detected transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInvolvement {
    /// The destination country.
    pub country_id: CountryId,
    /// ISO-2 code.
    pub iso_code2: String,
    /// Country name.
    pub name: String,
    /// Locations transferring to this country.
    pub location_count: usize,
}

/// Aggregate statistics over a set of transfers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferSummary {
    /// Total detected transfers.
    pub total_transfers: usize,
    /// Count per risk tier.
    pub risk_distribution: RiskDistribution,
    /// Deduplicated destination countries with per-country counts,
    /// sorted by ISO-2 code.
    pub countries_involved: Vec<CountryInvolvement>,
}

impl TransferSummary {
    /// Summarize a set of transfers.
    pub fn from_transfers<'a, I>(transfers: I) -> Self
    where
        I: IntoIterator<Item = &'a Transfer>,
    {
        let mut summary = Self::default();
        for transfer in transfers {
            summary.total_transfers += 1;
            summary.risk_distribution.record(transfer.risk);
            match summary
                .countries_involved
                .iter_mut()
                .find(|c| c.country_id == transfer.destination_country_id)
            {
                Some(involvement) => involvement.location_count += 1,
                None => summary.countries_involved.push(CountryInvolvement {
                    country_id: transfer.destination_country_id.clone(),
                    iso_code2: transfer.destination_iso2.clone(),
                    name: transfer.destination_name.clone(),
                    location_count: 1,
                }),
            }
        }
        summary
            .countries_involved
            .sort_by(|a, b| a.iso_code2.cmp(&b.iso_code2));
        summary
    }
}

/// The organization-wide transfer report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationTransferReport {
    /// The analyzed organization.
    pub organization_id: OrganizationId,
    /// Every detected transfer, recipients and their descendants.
    pub transfers: Vec<Transfer>,
    /// Aggregate statistics.
    pub summary: TransferSummary,
}

/// The activity-scoped transfer analysis: recipient-side and asset-side
/// findings reported separately, with a merged summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTransferAnalysis {
    /// The analyzed activity.
    pub activity_id: ActivityId,
    /// Transfers through the activity's linked recipients (descendants
    /// included).
    pub recipient_transfers: Vec<Transfer>,
    /// Transfers through the activity's linked digital assets.
    pub asset_transfers: Vec<Transfer>,
    /// Statistics merged across both sides.
    pub summary: TransferSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(iso2: &str, risk: TransferRisk) -> Transfer {
        Transfer {
            organization_id: OrganizationId::new(),
            organization_country_id: CountryId::new(),
            owner: LocationOwner::Recipient(RecipientId::new()),
            location_id: LocationId::new(),
            service: "test".to_string(),
            destination_country_id: CountryId::new(),
            destination_iso2: iso2.to_string(),
            destination_name: iso2.to_string(),
            depth: 0,
            risk,
            transfer_mechanism_id: None,
        }
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = TransferSummary::from_transfers(std::iter::empty::<&Transfer>());
        assert_eq!(summary.total_transfers, 0);
        assert_eq!(summary.risk_distribution.total(), 0);
        assert!(summary.countries_involved.is_empty());
    }

    #[test]
    fn summary_counts_and_sorts_countries() {
        let us_a = transfer("US", TransferRisk::Critical);
        let us_b = Transfer {
            location_id: LocationId::new(),
            risk: TransferRisk::Medium,
            ..us_a.clone()
        };
        let br = transfer("BR", TransferRisk::High);

        let summary = TransferSummary::from_transfers([&us_a, &us_b, &br]);
        assert_eq!(summary.total_transfers, 3);
        assert_eq!(summary.risk_distribution.critical, 1);
        assert_eq!(summary.risk_distribution.medium, 1);
        assert_eq!(summary.risk_distribution.high, 1);
        assert_eq!(summary.risk_distribution.low, 0);

        assert_eq!(summary.countries_involved.len(), 2);
        assert_eq!(summary.countries_involved[0].iso_code2, "BR");
        assert_eq!(summary.countries_involved[1].iso_code2, "US");
        assert_eq!(summary.countries_involved[1].location_count, 2);
    }

    #[test]
    fn recipient_id_accessor() {
        let t = transfer("US", TransferRisk::Low);
        assert!(t.recipient_id().is_some());

        let asset_side = Transfer {
            owner: LocationOwner::Asset(ropa_core::AssetId::new()),
            ..t
        };
        assert!(asset_side.recipient_id().is_none());
    }

    #[test]
    fn transfer_serializes() {
        let t = transfer("US", TransferRisk::Critical);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("critical"));
        assert!(json.contains("US"));
    }
}
