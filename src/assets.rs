//! Lookup of bundled assets by bare identifier.
//!
//! Assets live flat in one directory and are addressed as `<id>.<extension>`,
//! e.g. `Adele_-_Easy_On_Me.mp3` or `v1.mp4`.

use std::path::{Path, PathBuf};

use crate::error::PlayerError;

pub const AUDIO_EXTENSION: &str = "mp3";
pub const VIDEO_EXTENSION: &str = "mp4";

#[derive(Debug, Clone)]
pub struct AssetLibrary {
    root: PathBuf,
}

impl AssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, id: &str, extension: &str) -> Result<PathBuf, PlayerError> {
        let path = self.root.join(format!("{id}.{extension}"));
        if path.is_file() {
            Ok(path)
        } else {
            Err(PlayerError::AssetNotFound(format!("{id}.{extension}")))
        }
    }

    pub fn resolve_audio(&self, id: &str) -> Result<PathBuf, PlayerError> {
        self.resolve(id, AUDIO_EXTENSION)
    }

    pub fn resolve_video(&self, id: &str) -> Result<PathBuf, PlayerError> {
        self.resolve(id, VIDEO_EXTENSION)
    }
}
