#![forbid(unsafe_code)]
//! Wire contract shared by the HTTP surface and its clients.

use carta_model::Catalog;
use serde::{Deserialize, Serialize};

pub const CRATE_NAME: &str = "carta-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorCode {
    ValidationFailed,
    UnsupportedMediaType,
    PayloadTooLarge,
    DecodeFailed,
    Unauthorized,
    StorageUnavailable,
    CorruptDocument,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "ValidationFailed",
            Self::UnsupportedMediaType => "UnsupportedMediaType",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::DecodeFailed => "DecodeFailed",
            Self::Unauthorized => "Unauthorized",
            Self::StorageUnavailable => "StorageUnavailable",
            Self::CorruptDocument => "CorruptDocument",
            Self::Internal => "Internal",
        }
    }

    /// 400 for anything the client can fix, 401 for a bad credential,
    /// 500 for everything the server owns.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailed
            | Self::UnsupportedMediaType
            | Self::PayloadTooLarge
            | Self::DecodeFailed => 400,
            Self::Unauthorized => 401,
            Self::StorageUnavailable | Self::CorruptDocument | Self::Internal => 500,
        }
    }
}

/// Body of every failure response, nested as `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ApiErrorCode::Unauthorized, "invalid password")
    }
}

/// `POST /api/menu` body. The `menuData` field name is the original
/// admin client's contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMenuRequest {
    pub password: String,
    #[serde(rename = "menuData")]
    pub menu: Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMenuResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
}
