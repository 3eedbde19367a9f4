//! # The Transfer Detector
//!
//! Composes the organization's home jurisdiction, the recipient
//! hierarchy, and the active-location snapshot into risk-annotated
//! transfer findings. Every call is a pure read-then-compute over the
//! register, with no state of its own, safe to retry.
//!
//! ## Fail-fast precondition
//!
//! An organization without a headquarters country cannot be analyzed: a
//! transfer report with no home jurisdiction would be all false
//! negatives. Detection raises
//! [`ConfigurationError::MissingHeadquartersCountry`] instead of
//! returning an empty report.

use std::collections::HashSet;

use ropa_core::{
    ActivityId, Cancellation, ConfigurationError, OrganizationId, RecipientId, RopaResult,
};
use ropa_reference::{Country, ReferenceStore};
use ropa_registry::{LocationOwner, ProcessingRegister, Recipient};

use crate::report::{
    ActivityTransferAnalysis, OrganizationTransferReport, Transfer, TransferSummary,
};
use crate::rules::{classify_risk, is_same_jurisdiction, is_third_country};

/// Read-only view over a register and the reference catalog, exposing
/// the transfer-detection operations.
pub struct TransferDetector<'a> {
    register: &'a ProcessingRegister,
    reference: &'a ReferenceStore,
}

impl<'a> TransferDetector<'a> {
    /// Create a detector over the given register and catalog snapshot.
    pub fn new(register: &'a ProcessingRegister, reference: &'a ReferenceStore) -> Self {
        Self {
            register,
            reference,
        }
    }

    /// Resolve the organization's home jurisdiction, failing fast when
    /// it is unset or stale.
    fn home_country(&self, org: &OrganizationId) -> RopaResult<&'a Country> {
        let organization = self.register.require_organization(org)?;
        let country_id = organization.headquarters_country_id.as_ref().ok_or(
            ConfigurationError::MissingHeadquartersCountry {
                organization: org.clone(),
            },
        )?;
        self.reference.country(country_id).ok_or_else(|| {
            ConfigurationError::UnknownHeadquartersCountry {
                organization: org.clone(),
                country: country_id.clone(),
            }
            .into()
        })
    }

    /// Whether any *other* active location in the recipient's chain
    /// (the recipient itself plus its ancestors) carries a
    /// safeguard-category mechanism.
    fn chain_has_safeguard(
        &self,
        org: &OrganizationId,
        recipient: &RecipientId,
        excluding: &ropa_core::LocationId,
    ) -> RopaResult<bool> {
        let mut chain = vec![self.register.recipient(org, recipient)?.clone()];
        chain.extend(self.register.ancestor_chain(org, recipient)?);

        for member in &chain {
            let owner = LocationOwner::Recipient(member.id.clone());
            for location in self.register.active_locations_for_owner(org, &owner)? {
                if location.id == *excluding {
                    continue;
                }
                let has_safeguard = location
                    .transfer_mechanism_id
                    .as_ref()
                    .and_then(|id| self.reference.mechanism(id))
                    .is_some_and(|m| m.provides_safeguard());
                if has_safeguard {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Classify one owner's active locations against the home
    /// jurisdiction, appending a [`Transfer`] per cross-border location.
    ///
    /// Chain mitigation only applies to recipient-owned locations;
    /// assets have no hierarchy.
    fn detect_for_owner(
        &self,
        org: &OrganizationId,
        home: &Country,
        owner: &LocationOwner,
        depth: usize,
        cancel: &Cancellation,
        out: &mut Vec<Transfer>,
    ) -> RopaResult<()> {
        for location in self.register.active_locations_for_owner(org, owner)? {
            cancel.check()?;
            let destination = self.reference.require_country(&location.country_id)?;
            if is_same_jurisdiction(home, destination) {
                continue;
            }

            let mechanism = location
                .transfer_mechanism_id
                .as_ref()
                .and_then(|id| self.reference.mechanism(id));
            let location_covered = mechanism.is_some_and(|m| m.provides_safeguard());
            let chain_mitigated = match owner {
                LocationOwner::Recipient(recipient)
                    if is_third_country(destination) && !location_covered =>
                {
                    self.chain_has_safeguard(org, recipient, &location.id)?
                }
                _ => false,
            };

            let risk = classify_risk(home, destination, mechanism, chain_mitigated);
            out.push(Transfer {
                organization_id: org.clone(),
                organization_country_id: home.id.clone(),
                owner: owner.clone(),
                location_id: location.id.clone(),
                service: location.service.clone(),
                destination_country_id: destination.id.clone(),
                destination_iso2: destination.iso_code2.clone(),
                destination_name: destination.name.clone(),
                depth,
                risk,
                transfer_mechanism_id: location.transfer_mechanism_id.clone(),
            });
        }
        Ok(())
    }

    /// Walk a recipient's descendant tree and detect transfers for every
    /// node, tagged with its depth from `root`. Recipients already seen
    /// (reachable through an earlier root) are skipped.
    fn detect_for_tree(
        &self,
        org: &OrganizationId,
        home: &Country,
        root: &Recipient,
        visited: &mut HashSet<RecipientId>,
        cancel: &Cancellation,
        out: &mut Vec<Transfer>,
    ) -> RopaResult<()> {
        for node in self.register.descendant_tree(org, &root.id, cancel)? {
            if !visited.insert(node.recipient.id.clone()) {
                continue;
            }
            self.detect_for_owner(
                org,
                home,
                &LocationOwner::Recipient(node.recipient.id.clone()),
                node.depth,
                cancel,
                out,
            )?;
        }
        Ok(())
    }

    /// Detect every cross-border transfer in an organization.
    ///
    /// Covers every recipient: hierarchy roots and, transitively, all
    /// their descendants, each tagged with its depth. A `Transfer` is
    /// emitted only where a transfer occurs (the location's country is
    /// outside the home jurisdiction); same-jurisdiction locations
    /// contribute nothing.
    pub fn detect_cross_border_transfers(
        &self,
        org: &OrganizationId,
        cancel: &Cancellation,
    ) -> RopaResult<Vec<Transfer>> {
        let home = self.home_country(org)?;
        let mut transfers = Vec::new();
        let mut visited = HashSet::new();
        for root in self.register.root_recipients(org) {
            cancel.check()?;
            self.detect_for_tree(org, home, root, &mut visited, cancel, &mut transfers)?;
        }
        tracing::debug!(
            organization = %org,
            transfers = transfers.len(),
            "cross-border detection complete"
        );
        Ok(transfers)
    }

    /// The organization-wide report: all transfers plus the aggregate
    /// summary.
    pub fn organization_transfer_report(
        &self,
        org: &OrganizationId,
        cancel: &Cancellation,
    ) -> RopaResult<OrganizationTransferReport> {
        let transfers = self.detect_cross_border_transfers(org, cancel)?;
        let summary = TransferSummary::from_transfers(&transfers);
        Ok(OrganizationTransferReport {
            organization_id: org.clone(),
            transfers,
            summary,
        })
    }

    /// Analyze one activity: its linked recipients (expanded to their
    /// descendant trees, deduplicated across linked roots) and its
    /// linked assets, reported separately with a merged summary.
    ///
    /// An activity with no links yields empty lists and an all-zero
    /// summary; that is a valid result, not an error. A missing home
    /// jurisdiction is still fatal: the per-location logic is
    /// meaningless without it.
    pub fn activity_transfer_analysis(
        &self,
        org: &OrganizationId,
        activity: &ActivityId,
        cancel: &Cancellation,
    ) -> RopaResult<ActivityTransferAnalysis> {
        let home = self.home_country(org)?;
        self.register.activity(org, activity)?;

        let mut recipient_transfers = Vec::new();
        let mut visited = HashSet::new();
        for recipient in self.register.linked_recipients(org, activity)? {
            cancel.check()?;
            self.detect_for_tree(
                org,
                home,
                recipient,
                &mut visited,
                cancel,
                &mut recipient_transfers,
            )?;
        }

        let mut asset_transfers = Vec::new();
        for asset in self.register.linked_assets(org, activity)? {
            cancel.check()?;
            self.detect_for_owner(
                org,
                home,
                &LocationOwner::Asset(asset.id.clone()),
                0,
                cancel,
                &mut asset_transfers,
            )?;
        }

        let summary =
            TransferSummary::from_transfers(recipient_transfers.iter().chain(&asset_transfers));
        Ok(ActivityTransferAnalysis {
            activity_id: activity.clone(),
            recipient_transfers,
            asset_transfers,
            summary,
        })
    }
}
