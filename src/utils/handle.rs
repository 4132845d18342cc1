//! 公开主页 handle 校验

/// 与路由冲突的保留字
const RESERVED_HANDLES: &[&str] = &["api", "admin", "auth", "dashboard", "health", "static"];

pub const HANDLE_MIN_LEN: usize = 3;
pub const HANDLE_MAX_LEN: usize = 32;

#[derive(Debug, PartialEq, Eq)]
pub enum HandleError {
    Length(usize),
    InvalidChar(char),
    Reserved(String),
}

impl std::fmt::Display for HandleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length(len) => write!(
                f,
                "Handle must be {}-{} characters, got {}",
                HANDLE_MIN_LEN, HANDLE_MAX_LEN, len
            ),
            Self::InvalidChar(c) => write!(
                f,
                "Handle may only contain a-z, 0-9, '-' and '_' (found {:?})",
                c
            ),
            Self::Reserved(handle) => write!(f, "Handle '{}' is reserved", handle),
        }
    }
}

impl std::error::Error for HandleError {}

/// 规范化并校验 handle，返回小写形式
pub fn normalize_handle(raw: &str) -> Result<String, HandleError> {
    let handle = raw.trim().to_lowercase();

    let len = handle.chars().count();
    if !(HANDLE_MIN_LEN..=HANDLE_MAX_LEN).contains(&len) {
        return Err(HandleError::Length(len));
    }

    if let Some(c) = handle
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(HandleError::InvalidChar(c));
    }

    if RESERVED_HANDLES.contains(&handle.as_str()) {
        return Err(HandleError::Reserved(handle));
    }

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize_handle("  Alice_01 ").unwrap(), "alice_01");
    }

    #[test]
    fn test_rejects_bad_length() {
        assert_eq!(normalize_handle("ab"), Err(HandleError::Length(2)));
        assert!(matches!(
            normalize_handle(&"a".repeat(33)),
            Err(HandleError::Length(33))
        ));
    }

    #[test]
    fn test_rejects_invalid_chars() {
        assert_eq!(normalize_handle("bob smith"), Err(HandleError::InvalidChar(' ')));
        assert_eq!(normalize_handle("bob/x"), Err(HandleError::InvalidChar('/')));
        assert!(matches!(
            normalize_handle("café"),
            Err(HandleError::InvalidChar('é'))
        ));
    }

    #[test]
    fn test_rejects_reserved() {
        assert_eq!(
            normalize_handle("API"),
            Err(HandleError::Reserved("api".to_string()))
        );
    }
}
