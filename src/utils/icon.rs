//! 链接图标解析
//!
//! 存储层保存的是自由文本图标名，对外统一解析为封闭的 `IconKind`。
//! 同时接受简单名称（`github`）和带 `Fa` 前缀的组件名（`FaGithub`），
//! 无法识别时回退为 `External`。

use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IconKind {
    #[default]
    #[strum(serialize = "external", serialize = "externallinkalt", serialize = "link")]
    External,
    Github,
    #[strum(serialize = "twitter", serialize = "x")]
    Twitter,
    Instagram,
    Youtube,
    Linkedin,
    Facebook,
    Tiktok,
    #[strum(serialize = "email", serialize = "envelope", serialize = "mail")]
    Email,
    #[strum(serialize = "website", serialize = "globe")]
    Website,
}

impl IconKind {
    /// 解析存储的图标名，未知或缺失时返回 `External`
    pub fn resolve(name: Option<&str>) -> Self {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Self::External;
        };

        let bare = name
            .strip_prefix("Fa")
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
            .unwrap_or(name);

        bare.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_resolve_plain_and_component_names() {
        assert_eq!(IconKind::resolve(Some("github")), IconKind::Github);
        assert_eq!(IconKind::resolve(Some("FaGithub")), IconKind::Github);
        assert_eq!(IconKind::resolve(Some("FaTwitter")), IconKind::Twitter);
        assert_eq!(IconKind::resolve(Some("YouTube")), IconKind::Youtube);
        assert_eq!(IconKind::resolve(Some("FaEnvelope")), IconKind::Email);
    }

    #[test]
    fn test_resolve_falls_back_to_external() {
        assert_eq!(IconKind::resolve(None), IconKind::External);
        assert_eq!(IconKind::resolve(Some("  ")), IconKind::External);
        assert_eq!(IconKind::resolve(Some("FaUnknownThing")), IconKind::External);
        assert_eq!(IconKind::resolve(Some("FaExternalLinkAlt")), IconKind::External);
    }

    #[test]
    fn test_every_kind_resolves_from_its_own_name() {
        for kind in IconKind::iter() {
            assert_eq!(IconKind::resolve(Some(kind.as_ref())), kind);
        }
    }
}
