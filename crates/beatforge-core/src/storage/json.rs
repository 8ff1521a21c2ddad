use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::beatmap::Beatmap;
use crate::error::{Error, Result};
use crate::storage::BeatmapStore;

/// Beatmaps stored as `<dir>/<id>.json`, pretty-printed
#[derive(Debug, Clone)]
pub struct JsonBeatmapStore {
    dir: PathBuf,
}

impl JsonBeatmapStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a beatmap id. Bytes outside `[A-Za-z0-9-]` are written
    /// as `_xx` (lowercase hex), so distinct ids never share a file.
    pub fn path_for(&self, id: &str) -> PathBuf {
        let mut name = String::with_capacity(id.len());
        for byte in id.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("_{:02x}", byte));
            }
        }
        self.dir.join(format!("{}.json", name))
    }

    /// Read a single beatmap file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Beatmap> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl BeatmapStore for JsonBeatmapStore {
    fn get_by_id(&self, id: &str) -> Result<Beatmap> {
        let path = self.path_for(id);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::BeatmapNotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Every parseable `.json` file in the directory, sorted by id.
    /// Unreadable files are skipped with a warning.
    fn get_all(&self) -> Result<Vec<Beatmap>> {
        let mut beatmaps = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_file(&path) {
                Ok(beatmap) => beatmaps.push(beatmap),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        beatmaps.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(beatmaps)
    }

    fn save(&mut self, beatmap: &Beatmap) -> Result<()> {
        let path = self.path_for(beatmap.id());
        fs::write(&path, serde_json::to_string_pretty(beatmap)?)?;
        debug!("Saved beatmap {} to {}", beatmap.id(), path.display());
        Ok(())
    }
}
