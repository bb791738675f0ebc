use crate::{AuthError, AuthErrorResult};

use shop_core::Session;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

/// On-disk copy of the current session so it survives restarts.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session.
    ///
    /// A missing file is the normal "signed out" case. A corrupted file is
    /// logged and treated the same way; it gets overwritten on the next save.
    pub fn load(&self) -> Option<Session> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session file at {:?}", self.path);
                return None;
            }
            Err(e) => {
                warn!("Could not read session file {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                info!("Restored persisted session for {}", session.user.id);
                Some(session)
            }
            Err(e) => {
                warn!("Session file corrupted at {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Write via temp file + rename so a crash never leaves half a session.
    pub fn save(&self, session: &Session) -> AuthErrorResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| AuthError::session_file(dir.to_path_buf(), e))?;
        }

        let temp_path = self
            .path
            .with_extension(format!("json.tmp.{}", std::process::id()));
        let json = serde_json::to_string(session)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| AuthError::session_file(temp_path.clone(), e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| AuthError::session_file(temp_path.clone(), e))?;
            file.sync_all()
                .map_err(|e| AuthError::session_file(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AuthError::session_file(self.path.clone(), e)
        })?;

        debug!("Saved session for {} to {:?}", session.user.id, self.path);
        Ok(())
    }

    /// Remove the persisted session. Missing file is fine.
    pub fn clear(&self) -> AuthErrorResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::session_file(self.path.clone(), e)),
        }
    }
}
