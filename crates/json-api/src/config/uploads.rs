//! Uploads Config

use std::path::PathBuf;

use clap::Args;

/// Image upload storage.
#[derive(Debug, Args)]
pub struct UploadsConfig {
    /// Directory uploaded images are written to
    #[arg(long, env = "UPLOADS_DIR", default_value = "public/uploads")]
    pub uploads_dir: PathBuf,

    /// Public base URL used to build image links
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "http://localhost:3000")]
    pub public_base_url: String,
}
