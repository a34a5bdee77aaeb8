// SPDX-License-Identifier: Apache-2.0

use crate::save::SaveError;
use crate::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use carta_api::{ApiError, ApiErrorCode, SaveMenuRequest, SaveMenuResponse, UploadResponse};
use carta_imaging::ImagingError;
use carta_store::StoreError;
use serde_json::json;

fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err }))).into_response()
}

fn store_error(err: &StoreError) -> ApiError {
    match err {
        StoreError::Unavailable(msg) => ApiError::new(ApiErrorCode::StorageUnavailable, msg),
        StoreError::Corrupt(msg) => ApiError::new(ApiErrorCode::CorruptDocument, msg),
    }
}

fn imaging_error(err: &ImagingError) -> ApiError {
    match err {
        ImagingError::UnsupportedMediaType(_) => {
            ApiError::new(ApiErrorCode::UnsupportedMediaType, err.to_string())
        }
        ImagingError::PayloadTooLarge { .. } => {
            ApiError::new(ApiErrorCode::PayloadTooLarge, err.to_string())
        }
        ImagingError::Decode(_) => ApiError::new(ApiErrorCode::DecodeFailed, err.to_string()),
        ImagingError::Storage(msg) => ApiError::new(ApiErrorCode::StorageUnavailable, msg),
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn get_menu(State(state): State<AppState>) -> Response {
    let store = state.store.clone();
    let loaded = tokio::task::spawn_blocking(move || store.load()).await;
    match loaded {
        Ok(Ok(catalog)) => Json(catalog).into_response(),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "catalog load failed");
            api_error_response(store_error(&err))
        }
        Err(err) => {
            tracing::error!(error = %err, "catalog load task failed");
            api_error_response(ApiError::new(ApiErrorCode::Internal, "internal error"))
        }
    }
}

pub async fn save_menu(
    State(state): State<AppState>,
    Json(request): Json<SaveMenuRequest>,
) -> Response {
    let save = state.save.clone();
    let committed =
        tokio::task::spawn_blocking(move || save.commit(&request.password, &request.menu)).await;
    match committed {
        Ok(Ok(())) => Json(SaveMenuResponse { success: true }).into_response(),
        Ok(Err(SaveError::Unauthorized)) => {
            tracing::warn!("save rejected: invalid password");
            api_error_response(ApiError::unauthorized())
        }
        Ok(Err(SaveError::Store(err))) => {
            tracing::error!(error = %err, "catalog replace failed");
            api_error_response(store_error(&err))
        }
        Err(err) => {
            tracing::error!(error = %err, "save task failed");
            api_error_response(ApiError::new(ApiErrorCode::Internal, "internal error"))
        }
    }
}

pub async fn upload_image(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return api_error_response(ApiError::new(
                    ApiErrorCode::ValidationFailed,
                    err.to_string(),
                ));
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let media_type = field.content_type().unwrap_or("").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return api_error_response(ApiError::new(
                    ApiErrorCode::ValidationFailed,
                    err.to_string(),
                ));
            }
        };

        let pipeline = state.pipeline.clone();
        let stored = tokio::task::spawn_blocking(move || {
            pipeline.ingest(&file_name, &media_type, &bytes)
        })
        .await;
        return match stored {
            Ok(Ok(image)) => {
                tracing::info!(url = %image.url, "image stored");
                Json(UploadResponse {
                    success: true,
                    url: image.url,
                })
                .into_response()
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "image rejected");
                api_error_response(imaging_error(&err))
            }
            Err(err) => {
                tracing::error!(error = %err, "upload task failed");
                api_error_response(ApiError::new(ApiErrorCode::Internal, "internal error"))
            }
        };
    }
    api_error_response(ApiError::new(
        ApiErrorCode::ValidationFailed,
        "no file field in upload",
    ))
}
