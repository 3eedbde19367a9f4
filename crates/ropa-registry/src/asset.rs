//! Digital assets.
//!
//! A digital asset is a system that hosts or processes personal data: a
//! SaaS product, a database, an internal service. Assets own processing
//! locations the same way recipients do, and participate in activity
//! links with RESTRICT delete semantics.

use serde::{Deserialize, Serialize};

use ropa_core::{
    AssetId, ConflictError, OrganizationId, RopaResult, Timestamp, ValidationError,
};

use crate::register::ProcessingRegister;

/// A system hosting or processing personal data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalAsset {
    /// Unique identifier.
    pub id: AssetId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Soft-delete flag; inactive assets are preserved for audit.
    pub is_active: bool,
    /// When the asset was created.
    pub created_at: Timestamp,
    /// When the asset was last updated.
    pub updated_at: Timestamp,
}

impl ProcessingRegister {
    /// Create a digital asset.
    pub fn create_asset(
        &mut self,
        org: &OrganizationId,
        name: &str,
        description: Option<String>,
    ) -> RopaResult<DigitalAsset> {
        self.require_organization(org)?;
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                field: "asset name",
            }
            .into());
        }
        let now = Timestamp::now();
        let asset = DigitalAsset {
            id: AssetId::new(),
            organization_id: org.clone(),
            name: name.trim().to_string(),
            description,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        };
        self.assets.insert(asset.id.clone(), asset.clone());
        Ok(asset)
    }

    /// Rename an asset or replace its description.
    pub fn update_asset(
        &mut self,
        org: &OrganizationId,
        id: &AssetId,
        name: Option<&str>,
        description: Option<Option<String>>,
    ) -> RopaResult<DigitalAsset> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName {
                    field: "asset name",
                }
                .into());
            }
        }
        let record = self.asset_mut(org, id)?;
        if let Some(name) = name {
            record.name = name.trim().to_string();
        }
        if let Some(description) = description {
            record.description = description;
        }
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Soft-delete an asset. Idempotent: deactivating an inactive asset
    /// is a no-op success.
    pub fn deactivate_asset(&mut self, org: &OrganizationId, id: &AssetId) -> RopaResult<DigitalAsset> {
        let record = self.asset_mut(org, id)?;
        if record.is_active {
            record.is_active = false;
            record.updated_at = Timestamp::now();
        }
        Ok(record.clone())
    }

    /// Hard-delete an asset.
    ///
    /// RESTRICT: fails while any activity still links the asset.
    /// Cascades to the asset's locations, historical ones included.
    pub fn delete_asset(&mut self, org: &OrganizationId, id: &AssetId) -> RopaResult<()> {
        self.asset(org, id)?;
        if self
            .activity_asset_links
            .values()
            .any(|l| l.asset_id == *id)
        {
            return Err(ConflictError::AssetStillLinked { asset: id.clone() }.into());
        }
        self.locations
            .retain(|_, l| !l.owner.is_asset(id));
        self.assets.remove(id);
        Ok(())
    }

    /// All assets of an organization, sorted by name.
    pub fn assets_for_organization(&self, org: &OrganizationId) -> Vec<&DigitalAsset> {
        let mut assets: Vec<&DigitalAsset> = self
            .assets
            .values()
            .filter(|a| a.organization_id == *org)
            .collect();
        assets.sort_by(|a, b| a.name.cmp(&b.name));
        assets
    }
}
