//! Processing activities and their junction links.
//!
//! An activity is the Article 30 unit of record: one processing
//! operation, linked to the recipients that receive its data and the
//! digital assets that host it. Links are first-class rows with their
//! own identity and composite uniqueness, so link-level metadata can be
//! added without restructuring.
//!
//! Delete semantics follow the storage contract: deleting an activity
//! cascades its links but never the recipients/assets it references;
//! deleting a recipient or asset is RESTRICTed while any activity still
//! links it.

use serde::{Deserialize, Serialize};

use ropa_core::{
    ActivityId, AssetId, ConflictError, LinkId, OrganizationId, RecipientId, RopaResult,
    Timestamp, ValidationError,
};

use crate::asset::DigitalAsset;
use crate::recipient::Recipient;
use crate::register::ProcessingRegister;

/// One processing operation in the register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingActivity {
    /// Unique identifier.
    pub id: ActivityId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// When the activity was created.
    pub created_at: Timestamp,
    /// When the activity was last updated.
    pub updated_at: Timestamp,
}

/// Junction row linking an activity to a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecipientLink {
    /// Row identity.
    pub id: LinkId,
    /// Owning organization (inherited from both sides).
    pub organization_id: OrganizationId,
    /// The activity side.
    pub activity_id: ActivityId,
    /// The recipient side.
    pub recipient_id: RecipientId,
    /// When the link was created.
    pub linked_at: Timestamp,
}

/// Junction row linking an activity to a digital asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityAssetLink {
    /// Row identity.
    pub id: LinkId,
    /// Owning organization (inherited from both sides).
    pub organization_id: OrganizationId,
    /// The activity side.
    pub activity_id: ActivityId,
    /// The asset side.
    pub asset_id: AssetId,
    /// When the link was created.
    pub linked_at: Timestamp,
}

impl ProcessingRegister {
    /// Create a processing activity.
    pub fn create_activity(
        &mut self,
        org: &OrganizationId,
        name: &str,
        description: Option<String>,
    ) -> RopaResult<ProcessingActivity> {
        self.require_organization(org)?;
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                field: "activity name",
            }
            .into());
        }
        let now = Timestamp::now();
        let activity = ProcessingActivity {
            id: ActivityId::new(),
            organization_id: org.clone(),
            name: name.trim().to_string(),
            description,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        };
        self.activities.insert(activity.id.clone(), activity.clone());
        Ok(activity)
    }

    /// Soft-delete an activity. Idempotent.
    pub fn deactivate_activity(
        &mut self,
        org: &OrganizationId,
        id: &ActivityId,
    ) -> RopaResult<ProcessingActivity> {
        let record = self.activity_mut(org, id)?;
        if record.is_active {
            record.is_active = false;
            record.updated_at = Timestamp::now();
        }
        Ok(record.clone())
    }

    /// Hard-delete an activity, cascading its junction links. The
    /// recipients and assets it referenced are untouched.
    pub fn delete_activity(&mut self, org: &OrganizationId, id: &ActivityId) -> RopaResult<()> {
        self.activity(org, id)?;
        self.activity_recipient_links
            .retain(|_, l| l.activity_id != *id);
        self.activity_asset_links.retain(|_, l| l.activity_id != *id);
        self.activities.remove(id);
        Ok(())
    }

    /// Link a recipient to an activity. The pair is unique.
    pub fn link_recipient_to_activity(
        &mut self,
        org: &OrganizationId,
        activity: &ActivityId,
        recipient: &RecipientId,
    ) -> RopaResult<ActivityRecipientLink> {
        self.activity(org, activity)?;
        self.recipient(org, recipient)?;
        if self
            .activity_recipient_links
            .values()
            .any(|l| l.activity_id == *activity && l.recipient_id == *recipient)
        {
            return Err(ConflictError::DuplicateActivityRecipientLink {
                activity: activity.clone(),
                recipient: recipient.clone(),
            }
            .into());
        }
        let link = ActivityRecipientLink {
            id: LinkId::new(),
            organization_id: org.clone(),
            activity_id: activity.clone(),
            recipient_id: recipient.clone(),
            linked_at: Timestamp::now(),
        };
        self.activity_recipient_links
            .insert(link.id.clone(), link.clone());
        Ok(link)
    }

    /// Remove an activity↔recipient link. Removing an absent link is a
    /// no-op.
    pub fn unlink_recipient_from_activity(
        &mut self,
        org: &OrganizationId,
        activity: &ActivityId,
        recipient: &RecipientId,
    ) -> RopaResult<()> {
        self.activity(org, activity)?;
        self.activity_recipient_links
            .retain(|_, l| !(l.activity_id == *activity && l.recipient_id == *recipient));
        Ok(())
    }

    /// Link a digital asset to an activity. The pair is unique.
    pub fn link_asset_to_activity(
        &mut self,
        org: &OrganizationId,
        activity: &ActivityId,
        asset: &AssetId,
    ) -> RopaResult<ActivityAssetLink> {
        self.activity(org, activity)?;
        self.asset(org, asset)?;
        if self
            .activity_asset_links
            .values()
            .any(|l| l.activity_id == *activity && l.asset_id == *asset)
        {
            return Err(ConflictError::DuplicateActivityAssetLink {
                activity: activity.clone(),
                asset: asset.clone(),
            }
            .into());
        }
        let link = ActivityAssetLink {
            id: LinkId::new(),
            organization_id: org.clone(),
            activity_id: activity.clone(),
            asset_id: asset.clone(),
            linked_at: Timestamp::now(),
        };
        self.activity_asset_links
            .insert(link.id.clone(), link.clone());
        Ok(link)
    }

    /// Remove an activity↔asset link. Removing an absent link is a no-op.
    pub fn unlink_asset_from_activity(
        &mut self,
        org: &OrganizationId,
        activity: &ActivityId,
        asset: &AssetId,
    ) -> RopaResult<()> {
        self.activity(org, activity)?;
        self.activity_asset_links
            .retain(|_, l| !(l.activity_id == *activity && l.asset_id == *asset));
        Ok(())
    }

    /// Recipients linked to an activity, sorted by name.
    pub fn linked_recipients(
        &self,
        org: &OrganizationId,
        activity: &ActivityId,
    ) -> RopaResult<Vec<&Recipient>> {
        self.activity(org, activity)?;
        let mut recipients: Vec<&Recipient> = self
            .activity_recipient_links
            .values()
            .filter(|l| l.activity_id == *activity)
            .filter_map(|l| self.recipients.get(&l.recipient_id))
            .collect();
        recipients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(recipients)
    }

    /// Assets linked to an activity, sorted by name.
    pub fn linked_assets(
        &self,
        org: &OrganizationId,
        activity: &ActivityId,
    ) -> RopaResult<Vec<&DigitalAsset>> {
        self.activity(org, activity)?;
        let mut assets: Vec<&DigitalAsset> = self
            .activity_asset_links
            .values()
            .filter(|l| l.activity_id == *activity)
            .filter_map(|l| self.assets.get(&l.asset_id))
            .collect();
        assets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(assets)
    }
}
