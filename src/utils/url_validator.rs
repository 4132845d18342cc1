//! URL 验证模块
//!
//! 链接目标允许 http(s) 与 mailto，头像等资源只允许 http(s)。

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(f, "Protocol not allowed: {}", proto),
            Self::DangerousProtocol(proto) => write!(f, "Dangerous protocol blocked: {}", proto),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

const WEB_SCHEMES: &[&str] = &["http", "https"];
const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// 验证链接目标（http/https/mailto）
pub fn validate_link_url(url: &str) -> Result<(), UrlValidationError> {
    validate_with_schemes(url, LINK_SCHEMES)
}

/// 验证网页资源地址（http/https）
pub fn validate_web_url(url: &str) -> Result<(), UrlValidationError> {
    validate_with_schemes(url, WEB_SCHEMES)
}

fn validate_with_schemes(url: &str, allowed: &[&str]) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let url_lower = url.to_lowercase();
    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    let scheme = parsed.scheme();
    if !allowed.contains(&scheme) {
        return Err(UrlValidationError::InvalidProtocol(format!("{}:", scheme)));
    }

    // http(s) 必须带主机名
    if scheme != "mailto" && parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }

    Ok(())
}
