use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use scriptshield_core::{Persistence, ShieldsState};

const ENV_STATE_FILE: &str = "SCRIPTSHIELD_STATE_FILE";

#[derive(Debug, Error)]
pub enum AppPersistenceError {
    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
    #[error("persisted snapshot is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no usable data directory on this platform")]
    NoDataDir,
}

pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    pub fn open_default() -> Result<Self, AppPersistenceError> {
        let path = env::var_os(ENV_STATE_FILE)
            .map(PathBuf::from)
            .unwrap_or(default_state_path()?);
        Self::open_path(path)
    }

    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self, AppPersistenceError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_state(&self) -> Result<Option<ShieldsState>, AppPersistenceError> {
        let payload = match fs::read(&self.path) {
            Ok(payload) => payload,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_slice(&payload)?))
    }
}

impl Persistence for JsonPersistence {
    type Error = AppPersistenceError;

    fn commit(&mut self, state: &ShieldsState) -> Result<(), Self::Error> {
        let payload = serde_json::to_vec_pretty(state)?;
        // Stage then rename; the snapshot file is never left torn.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

fn default_state_path() -> Result<PathBuf, AppPersistenceError> {
    dirs::data_dir()
        .map(|dir| dir.join("scriptshield").join("state.json"))
        .ok_or(AppPersistenceError::NoDataDir)
}
