use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use tokio::fs;
use uuid::Uuid;

use crate::domain::image::ImageFormat;
use crate::domain::repository::ImageStore;
use crate::error::RecipesServiceError;

/// Directory under the media root holding recipe images.
pub const RECIPE_IMAGE_DIR: &str = "recipes/images";

/// Filesystem-backed image store rooted at `MEDIA_ROOT`.
///
/// Files land at `{root}/recipes/images/{uuid}.{ext}`. Writes go to `{root}/.tmp` first and
/// are renamed into place, so a half-written file is never visible under its final name.
/// Only [`FsImageStore::image_dir`] is served publicly.
#[derive(Clone)]
pub struct FsImageStore {
    root: Arc<PathBuf>,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding finished recipe images.
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(RECIPE_IMAGE_DIR)
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(Uuid::new_v4().to_string())
    }

    /// Resolve a stored media-relative path, refusing anything that escapes the root.
    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        plain.then(|| self.root.join(relative))
    }
}

impl ImageStore for FsImageStore {
    async fn save(&self, bytes: &[u8], format: ImageFormat) -> Result<String, RecipesServiceError> {
        let relative = format!(
            "{RECIPE_IMAGE_DIR}/{}.{}",
            Uuid::now_v7(),
            format.extension()
        );
        let final_path = self.root.join(&relative);
        let temp_path = self.temp_path();

        if let Some(parent) = temp_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("create media temp dir")?;
        }
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("create recipe image dir")?;
        }

        if let Err(e) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(anyhow::Error::new(e).context("write recipe image").into());
        }
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(anyhow::Error::new(e).context("move recipe image").into());
        }

        tracing::debug!(path = %relative, size = bytes.len(), "recipe image stored");
        Ok(relative)
    }

    async fn remove(&self, path: &str) -> Result<(), RecipesServiceError> {
        let Some(full) = self.resolve(path) else {
            tracing::warn!(%path, "refusing to remove image outside media root");
            return Ok(());
        };
        match fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove recipe image {path}"))
                .into()),
        }
    }
}
