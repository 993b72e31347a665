//! Persistence of rendered posters under the static directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

use poster_common::{PosterError, PosterResult};

/// Writes posters as `<yyyymmdd>_<uuid>.png` into one directory.
#[derive(Debug, Clone)]
pub struct PosterStorage {
    dir: PathBuf,
}

impl PosterStorage {
    /// Open the output directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a poster generated on `date`.
    pub fn file_name(date: NaiveDate) -> String {
        format!("{}_{}.png", date.format("%Y%m%d"), Uuid::new_v4())
    }

    /// Write `data` and return the file name it was stored under.
    pub async fn persist(&self, data: &[u8], date: NaiveDate) -> PosterResult<String> {
        let file_name = Self::file_name(date);
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, data).await.map_err(|e| {
            PosterError::RenderError(format!("failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), bytes = data.len(), "Persisted poster");
        Ok(file_name)
    }
}
