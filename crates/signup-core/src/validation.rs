//! Field validation for signup input.
//!
//! Each rule is a pure function returning the first problem it finds as
//! [`DomainError::InvalidInput`]. Callers run them in order and stop at the
//! first failure.

use crate::error::DomainError;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 255;
pub const PASSWORD_MIN_BYTES: usize = 8;
pub const PASSWORD_MAX_BYTES: usize = 72;
pub const CONTENT_MAX_CHARS: usize = 5000;
/// 5 MiB.
pub const IMAGE_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// What the validator needs to know about an uploaded file.
#[derive(Debug, Clone, Copy)]
pub struct ImageMeta<'a> {
    pub filename: &'a str,
    pub size: u64,
}

pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid("name is required"));
    }
    let len = name.chars().count();
    if len < NAME_MIN_CHARS {
        return Err(DomainError::invalid("name must be at least 2 characters"));
    }
    if len > NAME_MAX_CHARS {
        return Err(DomainError::invalid("name must not exceed 255 characters"));
    }
    Ok(())
}

/// Passwords are not trimmed and are measured in bytes, since that is what
/// reaches the hasher.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.is_empty() {
        return Err(DomainError::invalid("password is required"));
    }
    if password.len() < PASSWORD_MIN_BYTES {
        return Err(DomainError::invalid(
            "password must be at least 8 characters",
        ));
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return Err(DomainError::invalid(
            "password must not exceed 72 characters",
        ));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::invalid("content is required"));
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(DomainError::invalid(
            "content must not exceed 5000 characters",
        ));
    }
    Ok(())
}

pub fn validate_image(image: Option<ImageMeta<'_>>) -> Result<(), DomainError> {
    let Some(image) = image else {
        return Err(DomainError::invalid("Image file is required"));
    };

    if image.size > IMAGE_MAX_BYTES {
        return Err(DomainError::invalid("image file must not exceed 5MB"));
    }

    let ext = extension_of(image.filename).to_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(DomainError::invalid(
            "only .jpg, .jpeg, .png, and .gif files are allowed",
        ));
    }

    Ok(())
}

/// Everything from the last dot of the final `/`-separated component, or an
/// empty string when that component has no dot. A leading dot counts, so
/// `.png` has the extension `.png`.
pub fn extension_of(filename: &str) -> String {
    let base = filename.rsplit('/').next().unwrap_or(filename);
    base.rfind('.')
        .map(|dot| base[dot..].to_string())
        .unwrap_or_default()
}
