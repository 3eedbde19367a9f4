//! Recipients and the processor hierarchy.
//!
//! Recipients form a tree per organization via `parent_recipient_id`,
//! stored by id, never by direct reference. Acyclicity is enforced at
//! the mutation boundary with an explicit ancestor walk; traversal code
//! may therefore assume a tree and never needs its own cycle detection.

use serde::{Deserialize, Serialize};

use ropa_core::{
    Cancellation, ConflictError, OrganizationId, RecipientId, RecipientKind, RopaError,
    RopaResult, Timestamp, ValidationError,
};

use crate::register::ProcessingRegister;

/// A party receiving or processing an organization's personal data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Unique identifier.
    pub id: RecipientId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// The recipient's role.
    pub kind: RecipientKind,
    /// Parent in the processor hierarchy; `None` at roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_recipient_id: Option<RecipientId>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// When the recipient was created.
    pub created_at: Timestamp,
    /// When the recipient was last updated.
    pub updated_at: Timestamp,
}

/// Inputs for creating a recipient.
#[derive(Debug, Clone)]
pub struct RecipientSpec {
    /// Display name.
    pub name: String,
    /// The recipient's role.
    pub kind: RecipientKind,
    /// Optional parent; must already exist in the same organization.
    pub parent_recipient_id: Option<RecipientId>,
}

/// A recipient tagged with its depth in a descendant traversal.
///
/// Depth is counted from the queried node: 0 is the node itself, 1 its
/// direct sub-processors, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientDepth {
    /// The visited recipient.
    pub recipient: Recipient,
    /// Distance from the traversal root.
    pub depth: usize,
}

impl ProcessingRegister {
    /// Create a recipient.
    ///
    /// A fresh node cannot close a loop, so no cycle check is needed
    /// here, only the parent's existence within the organization.
    pub fn create_recipient(
        &mut self,
        org: &OrganizationId,
        spec: RecipientSpec,
    ) -> RopaResult<Recipient> {
        self.require_organization(org)?;
        if spec.name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                field: "recipient name",
            }
            .into());
        }
        if let Some(parent) = &spec.parent_recipient_id {
            self.recipient(org, parent)?;
        }
        let now = Timestamp::now();
        let recipient = Recipient {
            id: RecipientId::new(),
            organization_id: org.clone(),
            name: spec.name.trim().to_string(),
            kind: spec.kind,
            parent_recipient_id: spec.parent_recipient_id,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        };
        self.recipients.insert(recipient.id.clone(), recipient.clone());
        Ok(recipient)
    }

    /// Rename a recipient or change its kind.
    pub fn update_recipient(
        &mut self,
        org: &OrganizationId,
        id: &RecipientId,
        name: Option<&str>,
        kind: Option<RecipientKind>,
    ) -> RopaResult<Recipient> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName {
                    field: "recipient name",
                }
                .into());
            }
        }
        let record = self.recipient_mut(org, id)?;
        if let Some(name) = name {
            record.name = name.trim().to_string();
        }
        if let Some(kind) = kind {
            record.kind = kind;
        }
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// Whether making `candidate_parent` the parent of `recipient` would
    /// create a loop.
    ///
    /// Walks the candidate's ancestor chain by id; the link is cyclic iff
    /// `recipient` appears in it (self-parenting included, since the
    /// chain starts at the candidate itself).
    pub fn would_create_cycle(
        &self,
        org: &OrganizationId,
        candidate_parent: &RecipientId,
        recipient: &RecipientId,
    ) -> RopaResult<bool> {
        let mut cursor = Some(candidate_parent.clone());
        // The insert-time invariant keeps chains acyclic, so this walk is
        // bounded by the arena size.
        let mut remaining = self.recipients.len() + 1;
        while let Some(current) = cursor {
            if current == *recipient {
                return Ok(true);
            }
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            cursor = self.recipient(org, &current)?.parent_recipient_id.clone();
        }
        Ok(false)
    }

    /// Re-parent a recipient, or detach it with `None`.
    ///
    /// Rejects with [`RopaError::Cycle`], leaving the record untouched,
    /// when the new link would close a loop.
    pub fn set_parent(
        &mut self,
        org: &OrganizationId,
        id: &RecipientId,
        parent: Option<RecipientId>,
    ) -> RopaResult<Recipient> {
        self.recipient(org, id)?;
        if let Some(candidate) = &parent {
            if self.would_create_cycle(org, candidate, id)? {
                return Err(RopaError::Cycle {
                    recipient: id.clone(),
                    candidate_parent: candidate.clone(),
                });
            }
        }
        let record = self.recipient_mut(org, id)?;
        record.parent_recipient_id = parent;
        record.updated_at = Timestamp::now();
        Ok(record.clone())
    }

    /// The chain of ancestors from a recipient's parent up to its root,
    /// nearest first.
    pub fn ancestor_chain(
        &self,
        org: &OrganizationId,
        id: &RecipientId,
    ) -> RopaResult<Vec<Recipient>> {
        let mut chain = Vec::new();
        let mut cursor = self.recipient(org, id)?.parent_recipient_id.clone();
        let mut remaining = self.recipients.len();
        while let Some(current) = cursor {
            let parent = self.recipient(org, &current)?;
            chain.push(parent.clone());
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            cursor = parent.parent_recipient_id.clone();
        }
        Ok(chain)
    }

    /// Every recipient reachable downward from `id`, each exactly once,
    /// tagged with its depth (0 = the queried node).
    ///
    /// Breadth-first over a child index built from the arena. The
    /// traversal is bounded by the organization's data; the cancellation
    /// token is checked per visited node.
    pub fn descendant_tree(
        &self,
        org: &OrganizationId,
        id: &RecipientId,
        cancel: &Cancellation,
    ) -> RopaResult<Vec<RecipientDepth>> {
        let root = self.recipient(org, id)?;

        let mut result = vec![RecipientDepth {
            recipient: root.clone(),
            depth: 0,
        }];
        let mut frontier = std::collections::VecDeque::new();
        frontier.push_back((id.clone(), 0usize));
        while let Some((current, depth)) = frontier.pop_front() {
            cancel.check()?;
            let mut children: Vec<&Recipient> = self
                .recipients
                .values()
                .filter(|r| {
                    r.organization_id == *org && r.parent_recipient_id.as_ref() == Some(&current)
                })
                .collect();
            children.sort_by(|a, b| a.name.cmp(&b.name));
            for child in children {
                result.push(RecipientDepth {
                    recipient: child.clone(),
                    depth: depth + 1,
                });
                frontier.push_back((child.id.clone(), depth + 1));
            }
        }
        Ok(result)
    }

    /// Root recipients (no parent) of an organization, sorted by name.
    pub fn root_recipients(&self, org: &OrganizationId) -> Vec<&Recipient> {
        let mut roots: Vec<&Recipient> = self
            .recipients
            .values()
            .filter(|r| r.organization_id == *org && r.parent_recipient_id.is_none())
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        roots
    }

    /// All recipients of an organization, sorted by name.
    pub fn recipients_for_organization(&self, org: &OrganizationId) -> Vec<&Recipient> {
        let mut recipients: Vec<&Recipient> = self
            .recipients
            .values()
            .filter(|r| r.organization_id == *org)
            .collect();
        recipients.sort_by(|a, b| a.name.cmp(&b.name));
        recipients
    }

    /// Soft-delete a recipient. Idempotent; the hierarchy link is kept
    /// so historical traversals stay meaningful.
    pub fn deactivate_recipient(
        &mut self,
        org: &OrganizationId,
        id: &RecipientId,
    ) -> RopaResult<Recipient> {
        let record = self.recipient_mut(org, id)?;
        if record.is_active {
            record.is_active = false;
            record.updated_at = Timestamp::now();
        }
        Ok(record.clone())
    }

    /// Hard-delete a recipient.
    ///
    /// RESTRICT: fails while any activity links it or any child still
    /// points at it. Cascades to the recipient's locations, historical
    /// ones included.
    pub fn delete_recipient(&mut self, org: &OrganizationId, id: &RecipientId) -> RopaResult<()> {
        self.recipient(org, id)?;
        if self
            .activity_recipient_links
            .values()
            .any(|l| l.recipient_id == *id)
        {
            return Err(ConflictError::RecipientStillLinked {
                recipient: id.clone(),
            }
            .into());
        }
        if self
            .recipients
            .values()
            .any(|r| r.parent_recipient_id.as_ref() == Some(id))
        {
            return Err(ConflictError::RecipientHasChildren {
                recipient: id.clone(),
            }
            .into());
        }
        self.locations.retain(|_, l| !l.owner.is_recipient(id));
        self.recipients.remove(id);
        Ok(())
    }
}
