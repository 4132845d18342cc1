use crate::storage::{Link, Profile};
use migration::entities::{link, profile};

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        url: model.url,
        description: model.description,
        icon: model.icon,
        position: model.position,
        is_active: model.is_active,
        click_count: model.click_count.max(0),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 Sea-ORM Model 转换为 Profile
pub fn model_to_profile(model: profile::Model) -> Profile {
    Profile {
        owner_id: model.owner_id,
        handle: model.handle,
        display_name: model.display_name,
        bio: model.bio,
        avatar_url: model.avatar_url,
        theme: model.theme,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_link_clamps_negative_click_count() {
        let now = Utc::now();
        let model = link::Model {
            id: "l1".to_string(),
            owner_id: "o1".to_string(),
            title: "Blog".to_string(),
            url: "https://example.com".to_string(),
            description: None,
            icon: Some("github".to_string()),
            position: 3,
            is_active: false,
            click_count: -4,
            created_at: now,
            updated_at: now,
        };

        let link = model_to_link(model);
        assert_eq!(link.click_count, 0);
        assert_eq!(link.position, 3);
        assert!(!link.is_active);
        assert_eq!(link.icon.as_deref(), Some("github"));
    }
}
