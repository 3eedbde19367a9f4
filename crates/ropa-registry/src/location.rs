//! # The Location Registry
//!
//! A processing location is a declared fact: this owner has data of this
//! service in this country, in this role, under this transfer mechanism.
//! Locations are the raw material of transfer detection, and their
//! history is the audit trail: a location whose country changes is never
//! edited in place, it is *moved*: the old record is deactivated and a
//! new one created in the same logical operation.
//!
//! Deactivated rows are preserved indefinitely. No operation in this
//! module (or anywhere in the core) deletes them wholesale.

use serde::{Deserialize, Serialize};

use ropa_core::{
    AssetId, ConflictError, CountryId, LocationId, LocationRole, MechanismId, OrganizationId,
    PurposeId, RecipientId, RopaResult, Timestamp, ValidationError,
};
use ropa_reference::ReferenceStore;

use crate::recipient::RecipientSpec;
use crate::register::ProcessingRegister;

/// Accepted bounds for the service description, in characters.
pub const SERVICE_MIN_LEN: usize = 2;
/// Upper bound for the service description.
pub const SERVICE_MAX_LEN: usize = 200;

/// The entity a location belongs to.
///
/// Owner and organization are fixed for the lifetime of a location:
/// [`LocationUpdate`] has no field for either, so an update cannot move
/// a location across owners or tenants by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "owner_type", content = "owner_id", rename_all = "snake_case")]
pub enum LocationOwner {
    /// Owned by a recipient.
    Recipient(RecipientId),
    /// Owned by a digital asset.
    Asset(AssetId),
}

impl LocationOwner {
    /// Whether this owner is the given recipient.
    pub fn is_recipient(&self, id: &RecipientId) -> bool {
        matches!(self, Self::Recipient(owner) if owner == id)
    }

    /// Whether this owner is the given asset.
    pub fn is_asset(&self, id: &AssetId) -> bool {
        matches!(self, Self::Asset(owner) if owner == id)
    }
}

impl std::fmt::Display for LocationOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recipient(id) => write!(f, "recipient {id}"),
            Self::Asset(id) => write!(f, "asset {id}"),
        }
    }
}

/// A declared country+role+service fact about an owner's data handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingLocation {
    /// Unique identifier.
    pub id: LocationId,
    /// Owning organization, inherited from the owner at creation.
    pub organization_id: OrganizationId,
    /// The recipient or asset this location belongs to.
    pub owner: LocationOwner,
    /// What service handles the data ("EU data center", "support CRM").
    pub service: String,
    /// Where the handling happens.
    pub country_id: CountryId,
    /// Whether the data is hosted, processed, or both.
    pub role: LocationRole,
    /// Opaque reference to a processing purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_id: Option<PurposeId>,
    /// Free-text purpose when no catalog entry fits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_text: Option<String>,
    /// Legal transfer mechanism covering this location, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_mechanism_id: Option<MechanismId>,
    /// Free-form metadata (certifications, sub-region, contact).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// `false` marks a historical/superseded location, kept for audit.
    pub is_active: bool,
    /// Creation-order sequence within the register.
    #[serde(skip)]
    pub seq: u64,
    /// When the location was created.
    pub created_at: Timestamp,
    /// When the location was last updated.
    pub updated_at: Timestamp,
}

/// Inputs for creating a location.
#[derive(Debug, Clone)]
pub struct LocationSpec {
    /// Service description.
    pub service: String,
    /// Country of handling.
    pub country_id: CountryId,
    /// Hosting/processing role.
    pub role: LocationRole,
    /// Purpose catalog reference.
    pub purpose_id: Option<PurposeId>,
    /// Free-text purpose.
    pub purpose_text: Option<String>,
    /// Transfer mechanism.
    pub transfer_mechanism_id: Option<MechanismId>,
    /// Free-form metadata.
    pub metadata: Option<serde_json::Value>,
}

/// Partial update for a location.
///
/// Nullable fields use a double `Option`: the outer level distinguishes
/// "leave unchanged" (`None`) from "set" (`Some(..)`), and for the
/// nullable fields the inner level carries the explicit null:
/// `Some(None)` clears, nothing is ever nulled implicitly.
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    /// New service description.
    pub service: Option<String>,
    /// New country.
    pub country_id: Option<CountryId>,
    /// New role.
    pub role: Option<LocationRole>,
    /// New purpose reference; `Some(None)` clears.
    pub purpose_id: Option<Option<PurposeId>>,
    /// New purpose text; `Some(None)` clears.
    pub purpose_text: Option<Option<String>>,
    /// New transfer mechanism; `Some(None)` clears.
    pub transfer_mechanism_id: Option<Option<MechanismId>>,
    /// New metadata; `Some(None)` clears.
    pub metadata: Option<Option<serde_json::Value>>,
}

fn validate_service(service: &str) -> RopaResult<()> {
    let len = service.trim().chars().count();
    if !(SERVICE_MIN_LEN..=SERVICE_MAX_LEN).contains(&len) {
        return Err(ValidationError::ServiceLength {
            len,
            min: SERVICE_MIN_LEN,
            max: SERVICE_MAX_LEN,
        }
        .into());
    }
    Ok(())
}

impl ProcessingRegister {
    /// Validate a spec against the reference catalog without mutating.
    fn validate_location_spec(
        &self,
        owner: &LocationOwner,
        spec: &LocationSpec,
        reference: &ReferenceStore,
    ) -> RopaResult<()> {
        validate_service(&spec.service)?;
        reference.require_country(&spec.country_id)?;
        if let Some(mechanism) = &spec.transfer_mechanism_id {
            reference.require_mechanism(mechanism)?;
        }
        // Policy, not constraint: asset locations should say why data is
        // there. Recipient locations carry the purpose on the contract.
        if matches!(owner, LocationOwner::Asset(_))
            && spec.purpose_id.is_none()
            && spec.purpose_text.is_none()
        {
            tracing::warn!(
                owner = %owner,
                service = %spec.service,
                "asset location declared without a purpose"
            );
        }
        Ok(())
    }

    /// Resolve an owner within the organization.
    fn resolve_owner(&self, org: &OrganizationId, owner: &LocationOwner) -> RopaResult<()> {
        match owner {
            LocationOwner::Recipient(id) => self.recipient(org, id).map(|_| ()),
            LocationOwner::Asset(id) => self.asset(org, id).map(|_| ()),
        }
    }

    fn insert_location(
        &mut self,
        org: &OrganizationId,
        owner: LocationOwner,
        spec: LocationSpec,
    ) -> ProcessingLocation {
        let now = Timestamp::now();
        let location = ProcessingLocation {
            id: LocationId::new(),
            organization_id: org.clone(),
            owner,
            service: spec.service.trim().to_string(),
            country_id: spec.country_id,
            role: spec.role,
            purpose_id: spec.purpose_id,
            purpose_text: spec.purpose_text,
            transfer_mechanism_id: spec.transfer_mechanism_id,
            metadata: spec.metadata,
            is_active: true,
            seq: self.next_seq(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.locations.insert(location.id.clone(), location.clone());
        location
    }

    /// Create a location under an existing owner.
    ///
    /// The owner must exist and belong to the caller's organization; the
    /// location inherits the organization from it.
    pub fn create_location(
        &mut self,
        org: &OrganizationId,
        owner: LocationOwner,
        spec: LocationSpec,
        reference: &ReferenceStore,
    ) -> RopaResult<ProcessingLocation> {
        self.resolve_owner(org, &owner)?;
        self.validate_location_spec(&owner, &spec, reference)?;
        let location = self.insert_location(org, owner, spec);
        tracing::debug!(location = %location.id, country = %location.country_id, "location created");
        Ok(location)
    }

    /// Create a recipient together with its locations, all-or-nothing.
    ///
    /// Every location spec is validated before the recipient is
    /// inserted; a failing spec means no recipient and no locations,
    /// never an owner left behind with no valid compliance data.
    pub fn create_recipient_with_locations(
        &mut self,
        org: &OrganizationId,
        recipient_spec: RecipientSpec,
        location_specs: Vec<LocationSpec>,
        reference: &ReferenceStore,
    ) -> RopaResult<(crate::recipient::Recipient, Vec<ProcessingLocation>)> {
        self.require_organization(org)?;
        if recipient_spec.name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                field: "recipient name",
            }
            .into());
        }
        if let Some(parent) = &recipient_spec.parent_recipient_id {
            self.recipient(org, parent)?;
        }
        // A placeholder owner: validation only needs the owner *type*.
        let probe = LocationOwner::Recipient(RecipientId::new());
        for spec in &location_specs {
            self.validate_location_spec(&probe, spec, reference)?;
        }

        let recipient = self.create_recipient(org, recipient_spec)?;
        let owner = LocationOwner::Recipient(recipient.id.clone());
        let locations = location_specs
            .into_iter()
            .map(|spec| self.insert_location(org, owner.clone(), spec))
            .collect();
        Ok((recipient, locations))
    }

    /// Partially update an active location.
    ///
    /// Historical (inactive) locations are immutable. Owner and
    /// organization cannot change; use [`move_location`] when the
    /// country changes, to preserve point-in-time history.
    ///
    /// [`move_location`]: ProcessingRegister::move_location
    pub fn update_location(
        &mut self,
        org: &OrganizationId,
        id: &LocationId,
        update: LocationUpdate,
        reference: &ReferenceStore,
    ) -> RopaResult<ProcessingLocation> {
        let current = self.location(org, id)?;
        if !current.is_active {
            return Err(ConflictError::LocationInactive {
                location: id.clone(),
            }
            .into());
        }
        if let Some(service) = &update.service {
            validate_service(service)?;
        }
        if let Some(country) = &update.country_id {
            reference.require_country(country)?;
        }
        if let Some(Some(mechanism)) = &update.transfer_mechanism_id {
            reference.require_mechanism(mechanism)?;
        }

        let record = self.location_mut(org, id)?;
        if let Some(service) = update.service {
            record.service = service.trim().to_string();
        }
        if let Some(country) = update.country_id {
            record.country_id = country;
        }
        if let Some(role) = update.role {
            record.role = role;
        }
        if let Some(purpose_id) = update.purpose_id {
            record.purpose_id = purpose_id;
        }
        if let Some(purpose_text) = update.purpose_text {
            record.purpose_text = purpose_text;
        }
        if let Some(mechanism) = update.transfer_mechanism_id {
            record.transfer_mechanism_id = mechanism;
        }
        if let Some(metadata) = update.metadata {
            record.metadata = metadata;
        }
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Mark a location inactive.
    ///
    /// Idempotent: a second call is a no-op success. The row is never
    /// deleted; it is the audit trail of what was true as of what date.
    pub fn deactivate_location(
        &mut self,
        org: &OrganizationId,
        id: &LocationId,
    ) -> RopaResult<ProcessingLocation> {
        let record = self.location_mut(org, id)?;
        if record.is_active {
            record.is_active = false;
            record.updated_at = Timestamp::now();
            tracing::debug!(location = %id, "location deactivated");
        }
        Ok(record.clone())
    }

    /// Atomically supersede a location: deactivate the source and create
    /// a new active record under the same owner with the merged fields.
    ///
    /// The merged replacement is validated in full before either half
    /// happens; a failing update leaves the source active and unmodified.
    /// Returns the new record.
    pub fn move_location(
        &mut self,
        org: &OrganizationId,
        id: &LocationId,
        update: LocationUpdate,
        reference: &ReferenceStore,
    ) -> RopaResult<ProcessingLocation> {
        let source = self.location(org, id)?.clone();
        if !source.is_active {
            return Err(ConflictError::LocationInactive {
                location: id.clone(),
            }
            .into());
        }

        let merged = LocationSpec {
            service: update.service.unwrap_or_else(|| source.service.clone()),
            country_id: update.country_id.unwrap_or_else(|| source.country_id.clone()),
            role: update.role.unwrap_or(source.role),
            purpose_id: update
                .purpose_id
                .unwrap_or_else(|| source.purpose_id.clone()),
            purpose_text: update
                .purpose_text
                .unwrap_or_else(|| source.purpose_text.clone()),
            transfer_mechanism_id: update
                .transfer_mechanism_id
                .unwrap_or_else(|| source.transfer_mechanism_id.clone()),
            metadata: update.metadata.unwrap_or_else(|| source.metadata.clone()),
        };
        self.validate_location_spec(&source.owner, &merged, reference)?;

        // Validation passed; both halves now succeed unconditionally.
        self.deactivate_location(org, id)?;
        let replacement = self.insert_location(org, source.owner, merged);
        tracing::debug!(
            from = %id,
            to = %replacement.id,
            "location moved"
        );
        Ok(replacement)
    }

    /// Active locations of an owner, in creation order.
    pub fn active_locations_for_owner(
        &self,
        org: &OrganizationId,
        owner: &LocationOwner,
    ) -> RopaResult<Vec<&ProcessingLocation>> {
        self.resolve_owner(org, owner)?;
        let mut locations: Vec<&ProcessingLocation> = self
            .locations
            .values()
            .filter(|l| l.organization_id == *org && l.owner == *owner && l.is_active)
            .collect();
        locations.sort_by_key(|l| l.seq);
        Ok(locations)
    }

    /// All locations of an owner, history included, in creation order.
    pub fn locations_for_owner(
        &self,
        org: &OrganizationId,
        owner: &LocationOwner,
    ) -> RopaResult<Vec<&ProcessingLocation>> {
        self.resolve_owner(org, owner)?;
        let mut locations: Vec<&ProcessingLocation> = self
            .locations
            .values()
            .filter(|l| l.organization_id == *org && l.owner == *owner)
            .collect();
        locations.sort_by_key(|l| l.seq);
        Ok(locations)
    }

    /// Locations in a country across all owners of a tenant.
    pub fn locations_by_country(
        &self,
        org: &OrganizationId,
        country: &CountryId,
        active_only: bool,
    ) -> RopaResult<Vec<&ProcessingLocation>> {
        self.require_organization(org)?;
        let mut locations: Vec<&ProcessingLocation> = self
            .locations
            .values()
            .filter(|l| {
                l.organization_id == *org
                    && l.country_id == *country
                    && (!active_only || l.is_active)
            })
            .collect();
        locations.sort_by_key(|l| l.seq);
        Ok(locations)
    }
}
