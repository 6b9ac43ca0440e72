use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::domain::{PlayerProfile, SessionId};

/// Storage abstraction for finalized profiles, one per session.
pub trait ProfileStore: Send + Sync {
    fn save(&self, session: &SessionId, profile: PlayerProfile) -> Result<(), StoreError>;
    fn fetch(&self, session: &SessionId) -> Result<Option<PlayerProfile>, StoreError>;
    /// Returns whether a profile was removed.
    fn clear(&self, session: &SessionId) -> Result<bool, StoreError>;
}

/// Error enumeration for profile storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid session id '{0}'")]
    InvalidSession(String),
    #[error("profile storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored profile is corrupt: {0}")]
    Corrupt(String),
}

/// Durable store writing one JSON document per session into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    root: PathBuf,
}

impl JsonFileProfileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, session: &SessionId) -> Result<PathBuf, StoreError> {
        let valid = !session.0.is_empty()
            && session.0.len() <= 128
            && session
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidSession(session.0.clone()));
        }
        Ok(self.root.join(format!("{}.json", session.0)))
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn save(&self, session: &SessionId, profile: PlayerProfile) -> Result<(), StoreError> {
        let path = self.path_for(session)?;
        let body = serde_json::to_vec_pretty(&profile)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        // each write stages in its own file; readers never observe a partial document
        let mut staging = NamedTempFile::new_in(&self.root)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        staging
            .write_all(&body)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        staging
            .persist(&path)
            .map(|_| ())
            .map_err(|err| StoreError::Unavailable(err.error.to_string()))
    }

    fn fetch(&self, session: &SessionId) -> Result<Option<PlayerProfile>, StoreError> {
        let path = self.path_for(session)?;
        match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|err| StoreError::Corrupt(err.to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }

    fn clear(&self, session: &SessionId) -> Result<bool, StoreError> {
        let path = self.path_for(session)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::Unavailable(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::test_support::profile;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileProfileStore::open(dir.path().join("profiles")).expect("store opens");
        let session = SessionId("player-1".to_string());

        assert!(store.fetch(&session).expect("fetch works").is_none());

        let saved = profile();
        store.save(&session, saved.clone()).expect("save works");
        assert_eq!(store.fetch(&session).expect("fetch works"), Some(saved));

        assert!(store.clear(&session).expect("clear works"));
        assert!(!store.clear(&session).expect("second clear works"));
        assert!(store.fetch(&session).expect("fetch works").is_none());
    }

    #[test]
    fn concurrent_saves_for_one_session_all_succeed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileProfileStore::open(dir.path()).expect("store opens");
        let session = SessionId("same".to_string());

        std::thread::scope(|scope| {
            let writers: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (0..50)
                            .filter(|_| store.save(&session, profile()).is_err())
                            .count()
                    })
                })
                .collect();
            let failures: usize = writers
                .into_iter()
                .map(|writer| writer.join().expect("writer thread"))
                .sum();
            assert_eq!(failures, 0);
        });

        let stored = store
            .fetch(&session)
            .expect("fetch works")
            .expect("profile stored");
        assert_eq!(stored.targets, profile().targets);
        let leftovers = fs::read_dir(dir.path())
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().map_or(true, |ext| ext != "json"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn file_store_rejects_path_traversal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileProfileStore::open(dir.path()).expect("store opens");

        match store.fetch(&SessionId("../etc/passwd".to_string())) {
            Err(StoreError::InvalidSession(id)) => assert_eq!(id, "../etc/passwd"),
            other => panic!("expected invalid session, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_documents_surface_as_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileProfileStore::open(dir.path()).expect("store opens");
        fs::write(dir.path().join("broken.json"), b"{not json").expect("write fixture");

        assert!(matches!(
            store.fetch(&SessionId("broken".to_string())),
            Err(StoreError::Corrupt(_))
        ));
    }
}
