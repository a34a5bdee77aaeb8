use carta_imaging::ImagingConfig;
use std::path::PathBuf;

/// Runtime configuration, normally assembled from `CARTA_*` environment
/// variables in `main`. The body limit leaves headroom above the image
/// budget for multipart framing.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub menu_path: PathBuf,
    pub admin_secret: String,
    pub imaging: ImagingConfig,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let imaging = ImagingConfig::default();
        Self {
            bind: "127.0.0.1:8080".to_string(),
            menu_path: PathBuf::from("data/menu.json"),
            admin_secret: String::new(),
            max_body_bytes: imaging.max_bytes + 1024 * 1024,
            imaging,
        }
    }
}
