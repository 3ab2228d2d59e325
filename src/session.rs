//! Keeping the bearer token between command line invocations.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, auth::AuthToken};

/// What is written to the session file after logging in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The ID the user logged in with.
    pub user_id: String,
    /// The bearer token.
    pub token: AuthToken,
}

impl Session {
    /// Read the session at `path`. A missing file means "not logged in".
    ///
    /// # Errors
    ///
    /// Returns [Error::Session] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, Error> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Error::Session(format!("could not read {path:?}: {error}"))),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|error| Error::Session(format!("could not parse {path:?}: {error}")))
    }

    /// Like [Session::load], but a session that cannot be read is logged and
    /// treated as "not logged in" so that logging in or out can replace it.
    pub fn restore(path: &Path) -> Option<Self> {
        match Self::load(path) {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!("ignoring saved session: {error}");
                None
            }
        }
    }

    /// Write the session to `path`, readable only by the current user on Unix.
    ///
    /// # Errors
    ///
    /// Returns [Error::Session] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|error| Error::Session(error.to_string()))?;

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        options
            .open(path)
            .and_then(|mut file| file.write_all(contents.as_bytes()))
            .map_err(|error| Error::Session(format!("could not write {path:?}: {error}")))
    }

    /// Delete the session at `path`. Deleting a missing session is not an error.
    ///
    /// # Errors
    ///
    /// Returns [Error::Session] if the file exists but cannot be removed.
    pub fn remove(path: &Path) -> Result<(), Error> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Error::Session(format!("could not remove {path:?}: {error}"))),
        }
    }
}
