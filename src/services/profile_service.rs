//! Profile service
//!
//! Owns profile validation and the public page read path.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::errors::{LinkbioError, Result};
use crate::storage::{Link, Profile, ProfileRecord, SeaOrmStorage};
use crate::utils::{normalize_handle, validate_web_url};

pub const DISPLAY_NAME_MAX_LEN: usize = 100;
pub const BIO_MAX_LEN: usize = 500;
pub const DEFAULT_THEME: &str = "default";

/// Request to create or overwrite the caller's profile
#[derive(Debug, Clone, Default)]
pub struct SaveProfileRequest {
    pub handle: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<String>,
}

/// Everything the public page needs for one handle
#[derive(Debug, Clone, Serialize)]
pub struct PublicPage {
    pub profile: Profile,
    pub links: Vec<Link>,
}

pub struct ProfileService {
    storage: Arc<SeaOrmStorage>,
}

impl ProfileService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Idempotent upsert keyed by owner
    pub async fn save(&self, owner_id: &str, req: SaveProfileRequest) -> Result<Profile> {
        let record = build_record(owner_id, req)?;
        let profile = self.storage.upsert_profile(&record).await?;
        info!(
            "ProfileService: saved profile for owner {} (handle '{}')",
            owner_id, profile.handle
        );
        Ok(profile)
    }

    pub async fn get(&self, owner_id: &str) -> Result<Profile> {
        self.storage
            .get_profile(owner_id)
            .await?
            .ok_or_else(|| LinkbioError::not_found_or_forbidden("Profile not found"))
    }

    /// Resolve a handle into the profile plus its active links
    pub async fn public_page(&self, handle: &str) -> Result<PublicPage> {
        let not_found = || LinkbioError::not_found_or_forbidden(format!("No page for '{}'", handle));

        let handle = normalize_handle(handle).map_err(|_| not_found())?;
        let profile = self
            .storage
            .get_profile_by_handle(&handle)
            .await?
            .ok_or_else(not_found)?;

        let links = self.storage.list_links(&profile.owner_id, true).await?;
        Ok(PublicPage { profile, links })
    }
}

fn build_record(owner_id: &str, req: SaveProfileRequest) -> Result<ProfileRecord> {
    let handle = normalize_handle(&req.handle).map_err(|e| LinkbioError::validation(e.to_string()))?;

    let display_name = req.display_name.trim().to_string();
    if display_name.is_empty() {
        return Err(LinkbioError::validation("Display name cannot be empty"));
    }
    if display_name.chars().count() > DISPLAY_NAME_MAX_LEN {
        return Err(LinkbioError::validation(format!(
            "Display name must be at most {} characters",
            DISPLAY_NAME_MAX_LEN
        )));
    }

    let bio = non_blank(req.bio);
    if let Some(bio) = &bio
        && bio.chars().count() > BIO_MAX_LEN
    {
        return Err(LinkbioError::validation(format!(
            "Bio must be at most {} characters",
            BIO_MAX_LEN
        )));
    }

    let avatar_url = non_blank(req.avatar_url);
    if let Some(url) = &avatar_url {
        validate_web_url(url).map_err(|e| LinkbioError::validation(e.to_string()))?;
    }

    let theme = non_blank(req.theme).unwrap_or_else(|| DEFAULT_THEME.to_string());
    if !theme
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        || theme.len() > 32
    {
        return Err(LinkbioError::validation(format!("Invalid theme: {}", theme)));
    }

    Ok(ProfileRecord {
        owner_id: owner_id.to_string(),
        handle,
        display_name,
        bio,
        avatar_url,
        theme,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
