//! Multipart signup form reader.

use actix_multipart::{Field, Multipart, MultipartError};
use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;

use signup_core::validation::{IMAGE_MAX_BYTES, ImageMeta};

use crate::middleware::error::{AppError, AppResult};

const PARSE_FAILED: &str = "Failed to parse form data";

/// The uploaded `image` part.
#[derive(Debug)]
pub struct ImageUpload {
    pub filename: String,
    /// Bytes received for the part, including any that were not buffered.
    pub size: u64,
    /// Buffered content. Empty when `size` exceeds [`IMAGE_MAX_BYTES`].
    pub body: Bytes,
}

impl ImageUpload {
    pub fn meta(&self) -> ImageMeta<'_> {
        ImageMeta {
            filename: &self.filename,
            size: self.size,
        }
    }
}

/// Fields of a signup request. Absent text fields are empty strings.
#[derive(Default)]
pub struct SignupForm {
    pub name: String,
    pub password: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("content_len", &self.content.len())
            .field("image", &self.image)
            .finish()
    }
}

/// Tracks bytes read across every part of one form.
struct Budget {
    used: usize,
    limit: usize,
}

impl Budget {
    fn take(&mut self, n: usize) -> AppResult<()> {
        self.used = self.used.saturating_add(n);
        if self.used > self.limit {
            tracing::debug!(limit = self.limit, "Multipart form exceeds size limit");
            return Err(AppError::BadRequest(PARSE_FAILED.to_string()));
        }
        Ok(())
    }
}

fn malformed(err: MultipartError) -> AppError {
    tracing::debug!(error = %err, "Malformed multipart body");
    AppError::BadRequest(PARSE_FAILED.to_string())
}

/// Read the whole signup form, keeping the first value of each field.
pub async fn read_signup_form(mut payload: Multipart, limit: usize) -> AppResult<SignupForm> {
    let mut budget = Budget { used: 0, limit };
    let mut name = None;
    let mut password = None;
    let mut content = None;
    let mut image = None;

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let disposition = field.content_disposition();
        let field_name = disposition.get_name().unwrap_or_default().to_string();
        let filename = disposition
            .get_filename()
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        match (field_name.as_str(), filename) {
            ("image", Some(filename)) if image.is_none() => {
                image = Some(read_image(&mut field, filename, &mut budget).await?);
            }
            ("name", None) if name.is_none() => {
                name = Some(read_text(&mut field, &mut budget).await?);
            }
            ("password", None) if password.is_none() => {
                password = Some(read_text(&mut field, &mut budget).await?);
            }
            ("content", None) if content.is_none() => {
                content = Some(read_text(&mut field, &mut budget).await?);
            }
            _ => drain(&mut field, &mut budget).await?,
        }
    }

    Ok(SignupForm {
        name: name.unwrap_or_default(),
        password: password.unwrap_or_default(),
        content: content.unwrap_or_default(),
        image,
    })
}

async fn read_text(field: &mut Field, budget: &mut Budget) -> AppResult<String> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.take(chunk.len())?;
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf.to_vec()).map_err(|_| AppError::BadRequest(PARSE_FAILED.to_string()))
}

async fn read_image(
    field: &mut Field,
    filename: String,
    budget: &mut Budget,
) -> AppResult<ImageUpload> {
    let mut buf = BytesMut::new();
    let mut size: u64 = 0;
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.take(chunk.len())?;
        size += chunk.len() as u64;
        if size <= IMAGE_MAX_BYTES {
            buf.extend_from_slice(&chunk);
        }
    }

    let body = if size <= IMAGE_MAX_BYTES {
        buf.freeze()
    } else {
        Bytes::new()
    };

    Ok(ImageUpload {
        filename,
        size,
        body,
    })
}

async fn drain(field: &mut Field, budget: &mut Budget) -> AppResult<()> {
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.take(chunk.len())?;
    }
    Ok(())
}
