//! Data categories and their nature links.
//!
//! A data category is an organization-owned classification bucket
//! ("Employee HR Data", "Customer Contact Data"). Its Article 9 flag is
//! derived from the reference natures linked to it (see
//! [`classification`](crate::classification)) and recomputed on every
//! link-set change unless a manual override is in effect.
//!
//! Nature links are first-class junction rows with (category, nature)
//! uniqueness, mirroring the association-table layout of the storage
//! contract.

use serde::{Deserialize, Serialize};

use ropa_core::{
    ConflictError, DataCategoryId, DataNatureId, LinkId, OrganizationId, RopaResult,
    SensitivityLevel, Timestamp, ValidationError,
};
use ropa_reference::{DataNature, ReferenceStore};

use crate::classification::{
    derive_special_category, resolve_special_category, OverrideRequest, SpecialCategoryStatus,
};
use crate::register::ProcessingRegister;

/// An organization-owned classification bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCategory {
    /// Unique identifier.
    pub id: DataCategoryId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sensitivity tier.
    pub sensitivity: SensitivityLevel,
    /// Example fields illustrating the category ("date of birth", "IBAN").
    #[serde(default)]
    pub example_fields: Vec<String>,
    /// How the Article 9 flag was determined.
    pub special_category: SpecialCategoryStatus,
    /// Soft-delete flag.
    pub is_active: bool,
    /// When the category was created.
    pub created_at: Timestamp,
    /// When the category was last updated.
    pub updated_at: Timestamp,
}

impl DataCategory {
    /// The effective special-category flag.
    pub fn is_special_category(&self) -> bool {
        self.special_category.value()
    }
}

/// Junction row linking a category to a data nature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNatureLink {
    /// Row identity.
    pub id: LinkId,
    /// Owning organization (inherited from the category).
    pub organization_id: OrganizationId,
    /// The category side.
    pub category_id: DataCategoryId,
    /// The nature side.
    pub nature_id: DataNatureId,
    /// When the link was created.
    pub linked_at: Timestamp,
}

/// Inputs for creating a data category.
#[derive(Debug, Clone)]
pub struct CategorySpec {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Sensitivity tier.
    pub sensitivity: SensitivityLevel,
    /// Example fields.
    pub example_fields: Vec<String>,
    /// Initial nature links.
    pub nature_ids: Vec<DataNatureId>,
    /// Optional override of the derived Article 9 flag.
    pub override_request: Option<OverrideRequest>,
}

/// Partial update for a data category's descriptive fields.
///
/// The Article 9 status is never patched here; it changes only through
/// link mutations and the override operations.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    /// New name.
    pub name: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New sensitivity tier.
    pub sensitivity: Option<SensitivityLevel>,
    /// Replacement example fields.
    pub example_fields: Option<Vec<String>>,
}

impl ProcessingRegister {
    /// Create a data category with its initial nature links.
    ///
    /// All-or-nothing: every nature id is resolved against the reference
    /// catalog and checked for duplicates before the category or any
    /// link is inserted.
    pub fn create_category(
        &mut self,
        org: &OrganizationId,
        spec: CategorySpec,
        reference: &ReferenceStore,
    ) -> RopaResult<DataCategory> {
        self.require_organization(org)?;
        if spec.name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                field: "category name",
            }
            .into());
        }

        let category_id = DataCategoryId::new();
        let mut seen = Vec::new();
        for nature_id in &spec.nature_ids {
            reference.require_nature(nature_id)?;
            if seen.contains(nature_id) {
                return Err(ConflictError::DuplicateNatureLink {
                    category: category_id.clone(),
                    nature: nature_id.clone(),
                }
                .into());
            }
            seen.push(nature_id.clone());
        }

        let computed = derive_special_category(
            spec.nature_ids
                .iter()
                .filter_map(|id| reference.nature(id)),
        );
        let status = resolve_special_category(computed, spec.override_request)?;

        let now = Timestamp::now();
        let category = DataCategory {
            id: category_id,
            organization_id: org.clone(),
            name: spec.name.trim().to_string(),
            description: spec.description,
            sensitivity: spec.sensitivity,
            example_fields: spec.example_fields,
            special_category: status,
            is_active: true,
            created_at: now.clone(),
            updated_at: now.clone(),
        };

        for nature_id in spec.nature_ids {
            let link = CategoryNatureLink {
                id: LinkId::new(),
                organization_id: org.clone(),
                category_id: category.id.clone(),
                nature_id,
                linked_at: now.clone(),
            };
            self.nature_links.insert(link.id.clone(), link);
        }
        self.categories.insert(category.id.clone(), category.clone());
        tracing::debug!(
            category = %category.id,
            special = category.is_special_category(),
            "data category created"
        );
        Ok(category)
    }

    /// Link a nature to a category. The pair is unique; the Article 9
    /// flag is recomputed unless an override is in effect.
    pub fn link_nature(
        &mut self,
        org: &OrganizationId,
        category: &DataCategoryId,
        nature: &DataNatureId,
        reference: &ReferenceStore,
    ) -> RopaResult<DataCategory> {
        self.category(org, category)?;
        reference.require_nature(nature)?;
        if self
            .nature_links
            .values()
            .any(|l| l.category_id == *category && l.nature_id == *nature)
        {
            return Err(ConflictError::DuplicateNatureLink {
                category: category.clone(),
                nature: nature.clone(),
            }
            .into());
        }
        let link = CategoryNatureLink {
            id: LinkId::new(),
            organization_id: org.clone(),
            category_id: category.clone(),
            nature_id: nature.clone(),
            linked_at: Timestamp::now(),
        };
        self.nature_links.insert(link.id.clone(), link);
        self.recompute_category(org, category, reference)
    }

    /// Remove a category↔nature link and recompute. Removing an absent
    /// link is a no-op (the recompute still runs).
    pub fn unlink_nature(
        &mut self,
        org: &OrganizationId,
        category: &DataCategoryId,
        nature: &DataNatureId,
        reference: &ReferenceStore,
    ) -> RopaResult<DataCategory> {
        self.category(org, category)?;
        self.nature_links
            .retain(|_, l| !(l.category_id == *category && l.nature_id == *nature));
        self.recompute_category(org, category, reference)
    }

    /// Assert a manual override of the Article 9 flag.
    pub fn set_special_category_override(
        &mut self,
        org: &OrganizationId,
        category: &DataCategoryId,
        request: OverrideRequest,
        reference: &ReferenceStore,
    ) -> RopaResult<DataCategory> {
        self.category(org, category)?;
        let computed = derive_special_category(self.linked_natures(org, category, reference)?);
        let status = resolve_special_category(computed, Some(request))?;
        let record = self.category_mut(org, category)?;
        record.special_category = status;
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Clear any override and return to the derived flag.
    pub fn clear_special_category_override(
        &mut self,
        org: &OrganizationId,
        category: &DataCategoryId,
        reference: &ReferenceStore,
    ) -> RopaResult<DataCategory> {
        self.category(org, category)?;
        let computed = derive_special_category(self.linked_natures(org, category, reference)?);
        let record = self.category_mut(org, category)?;
        record.special_category = SpecialCategoryStatus::Computed { value: computed };
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Patch descriptive fields.
    pub fn update_category(
        &mut self,
        org: &OrganizationId,
        category: &DataCategoryId,
        update: CategoryUpdate,
    ) -> RopaResult<DataCategory> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName {
                    field: "category name",
                }
                .into());
            }
        }
        let record = self.category_mut(org, category)?;
        if let Some(name) = update.name {
            record.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            record.description = description;
        }
        if let Some(sensitivity) = update.sensitivity {
            record.sensitivity = sensitivity;
        }
        if let Some(example_fields) = update.example_fields {
            record.example_fields = example_fields;
        }
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Soft-delete a category. Idempotent.
    pub fn deactivate_category(
        &mut self,
        org: &OrganizationId,
        category: &DataCategoryId,
    ) -> RopaResult<DataCategory> {
        let record = self.category_mut(org, category)?;
        if record.is_active {
            record.is_active = false;
            record.updated_at = Timestamp::now();
        }
        Ok(record.clone())
    }

    /// All categories of an organization, sorted by name.
    pub fn categories_for_organization(&self, org: &OrganizationId) -> Vec<&DataCategory> {
        let mut categories: Vec<&DataCategory> = self
            .categories
            .values()
            .filter(|c| c.organization_id == *org)
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    /// The natures currently linked to a category.
    pub fn linked_natures<'a>(
        &self,
        org: &OrganizationId,
        category: &DataCategoryId,
        reference: &'a ReferenceStore,
    ) -> RopaResult<Vec<&'a DataNature>> {
        self.category(org, category)?;
        Ok(self
            .nature_links
            .values()
            .filter(|l| l.category_id == *category)
            .filter_map(|l| reference.nature(&l.nature_id))
            .collect())
    }

    /// Re-derive the Article 9 flag after a link-set change. Overridden
    /// categories keep their asserted value.
    fn recompute_category(
        &mut self,
        org: &OrganizationId,
        category: &DataCategoryId,
        reference: &ReferenceStore,
    ) -> RopaResult<DataCategory> {
        let computed = derive_special_category(self.linked_natures(org, category, reference)?);
        let record = self.category_mut(org, category)?;
        if !record.special_category.is_overridden() {
            record.special_category = SpecialCategoryStatus::Computed { value: computed };
        }
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }
}
