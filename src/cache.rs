//! On-disk persistence for the cart.
//!
//! The cart survives restarts as a single JSON snapshot in the cache
//! directory. Writes go to a temp file in the same directory and are renamed
//! into place, so an interrupted save never leaves a half-written snapshot.
//! A snapshot that fails to parse is deleted and treated as an empty cart.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cart::CartSnapshot;
use crate::config;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CartCache {
    /// Directory holding the snapshot file.
    pub cache_dir: PathBuf,
}

impl CartCache {
    /// Open a cache rooted at `cache_dir`, or the platform default.
    /// Creates the directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { cache_dir: dir })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.cache_dir.join(config::CART_SNAPSHOT_FILE)
    }

    /// Load the saved cart. A missing file is an empty snapshot; a corrupt
    /// one is removed and also yields an empty snapshot.
    pub fn load(&self) -> Result<CartSnapshot> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(CartSnapshot::default());
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<CartSnapshot>(&contents) {
            Ok(snapshot) => {
                debug!(path = %path.display(), items = snapshot.items.len(), "loaded cart snapshot");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cart snapshot, removing");
                let _ = fs::remove_file(&path);
                Ok(CartSnapshot::default())
            }
        }
    }

    /// Atomically replace the saved snapshot.
    pub fn save(&self, snapshot: &CartSnapshot) -> Result<()> {
        let path = self.snapshot_path();
        write_atomic(&self.cache_dir, &path, &serde_json::to_vec_pretty(snapshot)?)?;
        debug!(path = %path.display(), items = snapshot.items.len(), "saved cart snapshot");
        Ok(())
    }

    /// Delete the saved snapshot, if any.
    pub fn clear(&self) -> Result<()> {
        let path = self.snapshot_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn write_atomic(dir: &Path, dest: &Path, bytes: &[u8]) -> Result<()> {
    fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    // A failed persist drops the temp file, which deletes it.
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
