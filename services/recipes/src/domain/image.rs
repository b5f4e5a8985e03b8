//! Recipe image payloads: base64 (optionally a `data:` URL) holding PNG, JPEG, GIF or WebP.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::RecipesServiceError;

/// Decoded images larger than this are rejected.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detect the format from magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

/// A decoded image ready to be stored.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

/// Decode `data:image/<fmt>;base64,<data>` or bare base64.
pub fn decode_image_payload(payload: &str) -> Result<DecodedImage, RecipesServiceError> {
    let payload = payload.trim();
    let data = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (meta, data) = rest
                .split_once(',')
                .ok_or(RecipesServiceError::InvalidImage)?;
            if !meta.ends_with(";base64") {
                return Err(RecipesServiceError::InvalidImage);
            }
            data
        }
        None => payload,
    };
    if data.is_empty() {
        return Err(RecipesServiceError::MissingImage);
    }

    let bytes = STANDARD
        .decode(data)
        .map_err(|_| RecipesServiceError::InvalidImage)?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(RecipesServiceError::InvalidImage);
    }
    let format = ImageFormat::sniff(&bytes).ok_or(RecipesServiceError::InvalidImage)?;
    Ok(DecodedImage { bytes, format })
}
