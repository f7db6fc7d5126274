use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{JobDraft, JobId, JobPosting};

/// Storage abstraction so the listing service can be exercised in isolation.
pub trait JobRepository: Send + Sync {
    /// Persist a draft, assigning its identifier.
    fn insert(&self, draft: JobDraft, created_at: DateTime<Utc>)
        -> Result<JobPosting, RepositoryError>;
    /// Every posting, newest `created_at` first.
    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    fn by_poster(&self, poster: &str) -> Result<Vec<JobPosting>, RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

#[derive(Debug, Default)]
struct StoreState {
    postings: Vec<JobPosting>,
    last_sequence: u64,
    snapshot: Option<PathBuf>,
}

impl StoreState {
    fn persist(&self) -> Result<(), RepositoryError> {
        match &self.snapshot {
            Some(path) => write_snapshot(path, &self.postings),
            None => Ok(()),
        }
    }

    fn track_sequence(&mut self, id: &JobId) {
        if let Some(sequence) = id.sequence() {
            self.last_sequence = self.last_sequence.max(sequence);
        }
    }
}

/// Mutex-guarded posting store, optionally mirrored to a JSON snapshot file.
///
/// With a snapshot configured, every write rewrites the whole file with blocking
/// `std::fs` calls while the lock is held. Writes are serialized, and each one stalls
/// the calling runtime worker for the duration of the rewrite, so the snapshot suits
/// small boards only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryJobRepository {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryJobRepository {
    /// Open a store backed by `path`. A missing file starts an empty store.
    pub fn with_snapshot(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let postings = read_snapshot(&path)?;
        let mut state = StoreState::default();
        for posting in postings {
            if state.postings.iter().any(|stored| stored.id == posting.id) {
                return Err(RepositoryError::Snapshot(format!(
                    "duplicate id {} in {}",
                    posting.id,
                    path.display()
                )));
            }
            state.track_sequence(&posting.id);
            state.postings.push(posting);
        }
        state.snapshot = Some(path);

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Bulk-load existing postings, rejecting identifiers that are already stored.
    pub fn seed(
        &self,
        postings: impl IntoIterator<Item = JobPosting>,
    ) -> Result<usize, RepositoryError> {
        let mut state = self.lock()?;
        let before = state.postings.len();
        let sequence_before = state.last_sequence;
        for posting in postings {
            if state.postings.iter().any(|stored| stored.id == posting.id) {
                state.postings.truncate(before);
                state.last_sequence = sequence_before;
                return Err(RepositoryError::Conflict);
            }
            state.track_sequence(&posting.id);
            state.postings.push(posting);
        }

        if let Err(err) = state.persist() {
            state.postings.truncate(before);
            state.last_sequence = sequence_before;
            return Err(err);
        }
        Ok(state.postings.len() - before)
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.postings.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl JobRepository for InMemoryJobRepository {
    fn insert(
        &self,
        draft: JobDraft,
        created_at: DateTime<Utc>,
    ) -> Result<JobPosting, RepositoryError> {
        let mut state = self.lock()?;
        let id = JobId::from_sequence(state.last_sequence + 1);
        if state.postings.iter().any(|stored| stored.id == id) {
            return Err(RepositoryError::Conflict);
        }

        let posting = JobPosting::from_draft(id, draft, created_at);
        state.postings.push(posting.clone());
        if let Err(err) = state.persist() {
            state.postings.pop();
            return Err(err);
        }
        state.track_sequence(&posting.id);
        Ok(posting)
    }

    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let state = self.lock()?;
        let mut postings: Vec<JobPosting> = state.postings.iter().rev().cloned().collect();
        postings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(postings)
    }

    fn by_poster(&self, poster: &str) -> Result<Vec<JobPosting>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .postings
            .iter()
            .filter(|posting| posting.posted_by == poster)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.postings.iter().find(|posting| &posting.id == id).cloned())
    }
}

fn read_snapshot(path: &Path) -> Result<Vec<JobPosting>, RepositoryError> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
        Ok(content) => serde_json::from_str(&content).map_err(|err| {
            RepositoryError::Snapshot(format!("failed to parse {}: {err}", path.display()))
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(RepositoryError::Snapshot(format!(
            "failed to read {}: {err}",
            path.display()
        ))),
    }
}

fn write_snapshot(path: &Path, postings: &[JobPosting]) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| snapshot_error(path, err))?;
    }

    let json = serde_json::to_string_pretty(postings).map_err(|err| snapshot_error(path, err))?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json).map_err(|err| snapshot_error(path, err))?;
    fs::rename(&staging, path).map_err(|err| snapshot_error(path, err))
}

fn snapshot_error(path: &Path, err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Snapshot(format!("failed to write {}: {err}", path.display()))
}
