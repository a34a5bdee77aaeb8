// SPDX-License-Identifier: Apache-2.0

use carta_imaging::{ImagePipeline, ImagingConfig};
use carta_server::{build_router, AppState, ServerConfig};
use carta_store::LocalFsStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn config_from_env() -> Result<ServerConfig, String> {
    let admin_secret = std::env::var("CARTA_ADMIN_SECRET").unwrap_or_default();
    if admin_secret.is_empty() {
        return Err("CARTA_ADMIN_SECRET must be set to a non-empty value".to_string());
    }
    let defaults = ImagingConfig::default();
    let imaging = ImagingConfig {
        upload_dir: PathBuf::from(env_string(
            "CARTA_UPLOAD_DIR",
            &defaults.upload_dir.to_string_lossy(),
        )),
        public_prefix: env_string("CARTA_PUBLIC_PREFIX", &defaults.public_prefix),
        max_bytes: env_usize("CARTA_MAX_UPLOAD_BYTES", defaults.max_bytes),
        edge: env_u32("CARTA_IMAGE_EDGE", defaults.edge),
        jpeg_quality: env_u8("CARTA_JPEG_QUALITY", defaults.jpeg_quality),
    };
    let max_body_bytes = env_usize("CARTA_MAX_BODY_BYTES", imaging.max_bytes + 1024 * 1024);
    Ok(ServerConfig {
        bind: env_string("CARTA_BIND", "127.0.0.1:8080"),
        menu_path: PathBuf::from(env_string("CARTA_MENU_PATH", "data/menu.json")),
        admin_secret,
        imaging,
        max_body_bytes,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config_from_env()?;
    let store = Arc::new(LocalFsStore::new(config.menu_path.clone()));
    let pipeline = Arc::new(ImagePipeline::new(config.imaging.clone()));
    let state = AppState::new(store, pipeline, config.admin_secret.clone(), config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(
        bind = %config.bind,
        menu = %config.menu_path.display(),
        "carta-server listening"
    );
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
