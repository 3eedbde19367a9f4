//! Tenant organizations.
//!
//! An organization is the ownership boundary for every other record in
//! the register and the reference jurisdiction for transfer detection
//! (via its headquarters country). Deleting an organization cascades to
//! everything it owns.

use serde::{Deserialize, Serialize};

use ropa_core::{CountryId, OrganizationId, RopaResult, Timestamp, ValidationError};
use ropa_reference::ReferenceStore;

use crate::register::ProcessingRegister;

/// A tenant organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Home jurisdiction for transfer analysis. Optional until setup is
    /// complete; transfer detection fails fast while it is unset.
    pub headquarters_country_id: Option<CountryId>,
    /// When the organization was registered.
    pub created_at: Timestamp,
    /// When the organization was last updated.
    pub updated_at: Timestamp,
}

impl ProcessingRegister {
    /// Register a new organization.
    ///
    /// The headquarters country, when supplied, must exist in the
    /// reference catalog.
    pub fn create_organization(
        &mut self,
        name: &str,
        headquarters_country_id: Option<CountryId>,
        reference: &ReferenceStore,
    ) -> RopaResult<Organization> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                field: "organization name",
            }
            .into());
        }
        if let Some(country) = &headquarters_country_id {
            reference.require_country(country)?;
        }

        let now = Timestamp::now();
        let organization = Organization {
            id: OrganizationId::new(),
            name: name.trim().to_string(),
            headquarters_country_id,
            created_at: now.clone(),
            updated_at: now,
        };
        tracing::debug!(organization = %organization.id, "organization registered");
        self.organizations
            .insert(organization.id.clone(), organization.clone());
        Ok(organization)
    }

    /// Rename an organization.
    pub fn rename_organization(
        &mut self,
        org: &OrganizationId,
        name: &str,
    ) -> RopaResult<Organization> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                field: "organization name",
            }
            .into());
        }
        let record = self.require_organization_mut(org)?;
        record.name = name.trim().to_string();
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Set or clear the headquarters country.
    pub fn set_headquarters(
        &mut self,
        org: &OrganizationId,
        country: Option<CountryId>,
        reference: &ReferenceStore,
    ) -> RopaResult<Organization> {
        if let Some(id) = &country {
            reference.require_country(id)?;
        }
        let record = self.require_organization_mut(org)?;
        record.headquarters_country_id = country;
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Delete an organization and cascade to every record it owns:
    /// recipients, assets, activities, categories, all junction rows,
    /// and all locations including historical ones.
    pub fn delete_organization(&mut self, org: &OrganizationId) -> RopaResult<()> {
        self.require_organization(org)?;

        self.recipients.retain(|_, r| r.organization_id != *org);
        self.assets.retain(|_, a| a.organization_id != *org);
        self.activities.retain(|_, a| a.organization_id != *org);
        self.categories.retain(|_, c| c.organization_id != *org);
        self.nature_links.retain(|_, l| l.organization_id != *org);
        self.activity_recipient_links
            .retain(|_, l| l.organization_id != *org);
        self.activity_asset_links
            .retain(|_, l| l.organization_id != *org);
        self.locations.retain(|_, l| l.organization_id != *org);
        self.organizations.remove(org);

        tracing::debug!(organization = %org, "organization deleted with cascade");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ropa_core::RopaError;

    fn reference() -> ReferenceStore {
        ReferenceStore::builtin()
    }

    #[test]
    fn create_and_lookup() {
        let reference = reference();
        let mut register = ProcessingRegister::new();
        let de = reference.country_by_iso2("DE").unwrap().id.clone();
        let org = register
            .create_organization("Acme GmbH", Some(de.clone()), &reference)
            .unwrap();
        let fetched = register.require_organization(&org.id).unwrap();
        assert_eq!(fetched.name, "Acme GmbH");
        assert_eq!(fetched.headquarters_country_id, Some(de));
    }

    #[test]
    fn empty_name_rejected() {
        let reference = reference();
        let mut register = ProcessingRegister::new();
        let err = register
            .create_organization("  ", None, &reference)
            .unwrap_err();
        assert!(matches!(err, RopaError::Validation(_)));
    }

    #[test]
    fn unknown_headquarters_rejected() {
        let reference = reference();
        let mut register = ProcessingRegister::new();
        let err = register
            .create_organization("Acme", Some(CountryId::new()), &reference)
            .unwrap_err();
        assert!(matches!(err, RopaError::NotFound { .. }));
    }

    #[test]
    fn set_headquarters_and_clear() {
        let reference = reference();
        let mut register = ProcessingRegister::new();
        let org = register
            .create_organization("Acme", None, &reference)
            .unwrap();
        let fr = reference.country_by_iso2("FR").unwrap().id.clone();

        let updated = register
            .set_headquarters(&org.id, Some(fr.clone()), &reference)
            .unwrap();
        assert_eq!(updated.headquarters_country_id, Some(fr));

        let cleared = register
            .set_headquarters(&org.id, None, &reference)
            .unwrap();
        assert_eq!(cleared.headquarters_country_id, None);
    }

    #[test]
    fn delete_cascades() {
        let reference = reference();
        let mut register = ProcessingRegister::new();
        let org = register
            .create_organization("Acme", None, &reference)
            .unwrap();
        register.delete_organization(&org.id).unwrap();
        assert!(register.require_organization(&org.id).is_err());
    }
}
