//! Link management service
//!
//! Business rules for an owner's link collection, shared by the HTTP
//! handlers and the CLI. Every operation is scoped to the caller's owner id.

use std::sync::Arc;

use tracing::info;

use crate::errors::{LinkbioError, Result};
use crate::storage::{Link, LinkChanges, NewLink, ReorderOutcome, SeaOrmStorage};
use crate::utils::validate_link_url;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const ICON_MAX_LEN: usize = 64;

// ============ Request DTOs ============

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Request to update an existing link
///
/// `None` keeps the stored value. For `description` and `icon`,
/// `Some("")` clears the field.
#[derive(Debug, Clone, Default)]
pub struct UpdateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

// ============ Service ============

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// All of the owner's links, ordered by position
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Link>> {
        self.storage.list_links(owner_id, false).await
    }

    /// Only the links visible on the public page
    pub async fn list_active(&self, owner_id: &str) -> Result<Vec<Link>> {
        self.storage.list_links(owner_id, true).await
    }

    /// Append a new link at the end of the owner's list
    pub async fn create(&self, owner_id: &str, req: CreateLinkRequest) -> Result<Link> {
        let title = validate_title(&req.title)?;
        let url = validate_url_field(&req.url)?;
        let description = validate_optional(req.description, "Description", DESCRIPTION_MAX_LEN)?;
        let icon = validate_optional(req.icon, "Icon", ICON_MAX_LEN)?;

        if !self.storage.profile_exists(owner_id).await? {
            return Err(LinkbioError::validation(
                "Create a profile before adding links",
            ));
        }

        let new_link = NewLink {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title,
            url,
            description,
            icon,
        };

        let link = self.storage.insert_link(&new_link).await?;
        info!("LinkService: created '{}' for owner {}", link.id, owner_id);
        Ok(link)
    }

    /// Partially update a link's content fields
    pub async fn update(
        &self,
        owner_id: &str,
        link_id: &str,
        req: UpdateLinkRequest,
    ) -> Result<Link> {
        let changes = LinkChanges {
            title: req.title.as_deref().map(validate_title).transpose()?,
            url: req.url.as_deref().map(validate_url_field).transpose()?,
            description: req
                .description
                .map(|d| validate_optional(Some(d), "Description", DESCRIPTION_MAX_LEN))
                .transpose()?,
            icon: req
                .icon
                .map(|i| validate_optional(Some(i), "Icon", ICON_MAX_LEN))
                .transpose()?,
        };

        if changes.is_empty() {
            return Err(LinkbioError::validation("Nothing to update"));
        }

        let link = self.storage.update_link(owner_id, link_id, &changes).await?;
        info!("LinkService: updated '{}'", link_id);
        Ok(link)
    }

    /// Remove a link; remaining positions are left untouched
    pub async fn delete(&self, owner_id: &str, link_id: &str) -> Result<()> {
        self.storage.delete_link(owner_id, link_id).await?;
        info!("LinkService: deleted '{}'", link_id);
        Ok(())
    }

    /// Show or hide a link on the public page
    pub async fn set_active(&self, owner_id: &str, link_id: &str, active: bool) -> Result<()> {
        self.storage
            .set_link_active(owner_id, link_id, active)
            .await
    }

    /// Rewrite positions so the list matches `ordered_ids` exactly
    ///
    /// `ordered_ids` must be a permutation of the owner's current link ids.
    /// On success the authoritative list is returned.
    pub async fn reorder(&self, owner_id: &str, ordered_ids: &[String]) -> Result<Vec<Link>> {
        match self.storage.reorder_links(owner_id, ordered_ids).await? {
            ReorderOutcome::Applied => self.list(owner_id).await,
            ReorderOutcome::Mismatch(reason) => Err(LinkbioError::validation(reason)),
        }
    }
}

// ============ Validation ============

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LinkbioError::validation("Title cannot be empty"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(LinkbioError::validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(title.to_string())
}

fn validate_url_field(url: &str) -> Result<String> {
    validate_link_url(url).map_err(|e| LinkbioError::validation(e.to_string()))?;
    Ok(url.trim().to_string())
}

/// Blank input becomes `None`
fn validate_optional(value: Option<String>, field: &str, max_len: usize) -> Result<Option<String>> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max_len {
        return Err(LinkbioError::validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(Some(value))
}
