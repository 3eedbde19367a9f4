//! # The Processing Register
//!
//! An arena of records keyed by typed id: the in-memory realization of
//! the organization-scoped tables. Every record family lives in its own
//! map; parent/child and junction relationships are stored by id, never
//! by direct reference, so traversal code always operates over a
//! consistent id→record lookup.
//!
//! ## Tenancy
//!
//! Every read and write is organization-scoped. An id that exists under
//! a different organization resolves exactly like a missing id: the
//! scoped accessors in this module are the single place that rule is
//! enforced, and every operation in the sibling modules goes through
//! them.
//!
//! ## Atomicity
//!
//! Multi-record operations (create-with-locations, move) validate every
//! input fully before the first insert, so a failure leaves the arena
//! untouched, the in-memory equivalent of a rolled-back transaction.

use std::collections::HashMap;

use ropa_core::{
    ActivityId, AssetId, DataCategoryId, LinkId, LocationId, OrganizationId, RecipientId,
    RecordKind, RopaError, RopaResult,
};

use crate::activity::{ActivityAssetLink, ActivityRecipientLink, ProcessingActivity};
use crate::asset::DigitalAsset;
use crate::category::{CategoryNatureLink, DataCategory};
use crate::location::ProcessingLocation;
use crate::organization::Organization;
use crate::recipient::Recipient;

/// The organization-scoped record arena.
///
/// Construction gives an empty register; records arrive through the
/// operations defined across this crate's modules. Reference data
/// (countries, natures, mechanisms) is *not* held here; operations that
/// validate against it take a `&ReferenceStore` parameter.
#[derive(Debug, Default)]
pub struct ProcessingRegister {
    pub(crate) organizations: HashMap<OrganizationId, Organization>,
    pub(crate) recipients: HashMap<RecipientId, Recipient>,
    pub(crate) assets: HashMap<AssetId, DigitalAsset>,
    pub(crate) activities: HashMap<ActivityId, ProcessingActivity>,
    pub(crate) categories: HashMap<DataCategoryId, DataCategory>,
    pub(crate) nature_links: HashMap<LinkId, CategoryNatureLink>,
    pub(crate) activity_recipient_links: HashMap<LinkId, ActivityRecipientLink>,
    pub(crate) activity_asset_links: HashMap<LinkId, ActivityAssetLink>,
    pub(crate) locations: HashMap<LocationId, ProcessingLocation>,
    pub(crate) next_seq: u64,
}

impl ProcessingRegister {
    /// Create an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next creation-order sequence number.
    pub(crate) fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    // ── Scoped accessors ─────────────────────────────────────────────

    /// Resolve an organization or fail with `NotFound`.
    pub fn require_organization(&self, id: &OrganizationId) -> RopaResult<&Organization> {
        self.organizations
            .get(id)
            .ok_or_else(|| RopaError::not_found(RecordKind::Organization, id))
    }

    pub(crate) fn require_organization_mut(
        &mut self,
        id: &OrganizationId,
    ) -> RopaResult<&mut Organization> {
        self.organizations
            .get_mut(id)
            .ok_or_else(|| RopaError::not_found(RecordKind::Organization, id))
    }

    /// Resolve a recipient within an organization.
    pub fn recipient(&self, org: &OrganizationId, id: &RecipientId) -> RopaResult<&Recipient> {
        self.recipients
            .get(id)
            .filter(|r| r.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::Recipient, id))
    }

    pub(crate) fn recipient_mut(
        &mut self,
        org: &OrganizationId,
        id: &RecipientId,
    ) -> RopaResult<&mut Recipient> {
        self.recipients
            .get_mut(id)
            .filter(|r| r.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::Recipient, id))
    }

    /// Resolve a digital asset within an organization.
    pub fn asset(&self, org: &OrganizationId, id: &AssetId) -> RopaResult<&DigitalAsset> {
        self.assets
            .get(id)
            .filter(|a| a.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::DigitalAsset, id))
    }

    pub(crate) fn asset_mut(
        &mut self,
        org: &OrganizationId,
        id: &AssetId,
    ) -> RopaResult<&mut DigitalAsset> {
        self.assets
            .get_mut(id)
            .filter(|a| a.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::DigitalAsset, id))
    }

    /// Resolve a processing activity within an organization.
    pub fn activity(
        &self,
        org: &OrganizationId,
        id: &ActivityId,
    ) -> RopaResult<&ProcessingActivity> {
        self.activities
            .get(id)
            .filter(|a| a.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::ProcessingActivity, id))
    }

    pub(crate) fn activity_mut(
        &mut self,
        org: &OrganizationId,
        id: &ActivityId,
    ) -> RopaResult<&mut ProcessingActivity> {
        self.activities
            .get_mut(id)
            .filter(|a| a.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::ProcessingActivity, id))
    }

    /// Resolve a data category within an organization.
    pub fn category(&self, org: &OrganizationId, id: &DataCategoryId) -> RopaResult<&DataCategory> {
        self.categories
            .get(id)
            .filter(|c| c.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::DataCategory, id))
    }

    pub(crate) fn category_mut(
        &mut self,
        org: &OrganizationId,
        id: &DataCategoryId,
    ) -> RopaResult<&mut DataCategory> {
        self.categories
            .get_mut(id)
            .filter(|c| c.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::DataCategory, id))
    }

    /// Resolve a processing location within an organization.
    pub fn location(
        &self,
        org: &OrganizationId,
        id: &LocationId,
    ) -> RopaResult<&ProcessingLocation> {
        self.locations
            .get(id)
            .filter(|l| l.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::ProcessingLocation, id))
    }

    pub(crate) fn location_mut(
        &mut self,
        org: &OrganizationId,
        id: &LocationId,
    ) -> RopaResult<&mut ProcessingLocation> {
        self.locations
            .get_mut(id)
            .filter(|l| l.organization_id == *org)
            .ok_or_else(|| RopaError::not_found(RecordKind::ProcessingLocation, id))
    }

    // ── Counts (diagnostics, tests) ──────────────────────────────────

    /// Total organizations registered.
    pub fn organization_count(&self) -> usize {
        self.organizations.len()
    }

    /// Total locations, active and historical.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}
