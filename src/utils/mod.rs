pub mod handle;
pub mod icon;
pub mod ip;
pub mod url_validator;

pub use handle::{HandleError, normalize_handle};
pub use icon::IconKind;
pub use url_validator::{UrlValidationError, validate_link_url, validate_web_url};

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}
