#![forbid(unsafe_code)]
//! Image ingestion pipeline: turns an uploaded file into a validated,
//! normalized, durably stored artifact with a stable relative reference.
//!
//! Every stored image is the same square JPEG regardless of what was
//! uploaded: scaled to fill the target canvas, overflow cropped centered
//! (never letterboxed), re-encoded at a fixed quality. Validation and
//! decoding happen before anything touches the filesystem, so a rejected
//! upload leaves no artifact behind.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::ImageFormat;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const CRATE_NAME: &str = "carta-imaging";

#[derive(Debug)]
pub enum ImagingError {
    /// Declared content type is not an accepted image type.
    UnsupportedMediaType(String),
    /// Upload exceeds the configured byte budget.
    PayloadTooLarge { size: usize, max: usize },
    /// Bytes are not a valid image of the declared type.
    Decode(String),
    /// Destination directory or file could not be written.
    Storage(String),
}

impl Display for ImagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedMediaType(ct) => {
                write!(f, "unsupported media type {ct}; only JPG, PNG and WebP are accepted")
            }
            Self::PayloadTooLarge { size, max } => {
                write!(f, "upload of {size} bytes exceeds the {max} byte limit")
            }
            Self::Decode(msg) => write!(f, "image decode failed: {msg}"),
            Self::Storage(msg) => write!(f, "image storage failed: {msg}"),
        }
    }
}

impl std::error::Error for ImagingError {}

#[derive(Debug, Clone)]
pub struct ImagingConfig {
    pub upload_dir: PathBuf,
    /// Public URL prefix under which `upload_dir` is served.
    pub public_prefix: String,
    pub max_bytes: usize,
    /// Edge of the square target canvas, in pixels.
    pub edge: u32,
    pub jpeg_quality: u8,
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("public/menu-images"),
            public_prefix: "/menu-images".to_string(),
            max_bytes: 5 * 1024 * 1024,
            edge: 400,
            jpeg_quality: 80,
        }
    }
}

/// A durably stored, normalized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Relative reference suitable for an item's `image` field.
    pub url: String,
    pub path: PathBuf,
}

pub struct ImagePipeline {
    config: ImagingConfig,
}

impl ImagePipeline {
    #[must_use]
    pub fn new(config: ImagingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ImagingConfig {
        &self.config
    }

    /// Validates, normalizes and stores one upload.
    ///
    /// Validation order: declared content type, then byte budget, then
    /// decode as the declared format. Normalization is cover fit to the
    /// square canvas followed by JPEG re-encode. The artifact filename is
    /// `<unix-millis>-<sanitized original name>`, written through a temp
    /// file and a rename.
    pub fn ingest(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, ImagingError> {
        let format = declared_format(content_type)
            .ok_or_else(|| ImagingError::UnsupportedMediaType(content_type.to_string()))?;
        if bytes.len() > self.config.max_bytes {
            return Err(ImagingError::PayloadTooLarge {
                size: bytes.len(),
                max: self.config.max_bytes,
            });
        }
        let normalized = self.normalize(format, bytes)?;
        self.store(original_name, &normalized)
    }

    fn normalize(&self, format: ImageFormat, bytes: &[u8]) -> Result<Vec<u8>, ImagingError> {
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| ImagingError::Decode(e.to_string()))?;
        let square = decoded
            .resize_to_fill(self.config.edge, self.config.edge, FilterType::Lanczos3)
            .to_rgb8();
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(Cursor::new(&mut out), self.config.jpeg_quality)
            .encode_image(&square)
            .map_err(|e| ImagingError::Storage(format!("jpeg encode: {e}")))?;
        Ok(out)
    }

    fn store(&self, original_name: &str, jpeg: &[u8]) -> Result<StoredImage, ImagingError> {
        fs::create_dir_all(&self.config.upload_dir).map_err(|e| {
            ImagingError::Storage(format!("create {}: {e}", self.config.upload_dir.display()))
        })?;
        let filename = format!("{}-{}", unix_millis(), sanitize_file_name(original_name));
        let path = self.config.upload_dir.join(&filename);
        let tmp = self.config.upload_dir.join(format!("{filename}.tmp"));
        fs::write(&tmp, jpeg)
            .map_err(|e| ImagingError::Storage(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| ImagingError::Storage(format!("rename {}: {e}", path.display())))?;
        let prefix = self.config.public_prefix.trim_end_matches('/');
        Ok(StoredImage {
            url: format!("{prefix}/{filename}"),
            path,
        })
    }
}

/// Maps a declared content type to the format the decoder must enforce.
/// `image/jpg` is not a registered type but legacy clients send it.
fn declared_format(content_type: &str) -> Option<ImageFormat> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
        "image/png" => Some(ImageFormat::Png),
        "image/webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// Strips everything but ASCII alphanumerics, `.` and `-` from the
/// client-supplied filename.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect()
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
