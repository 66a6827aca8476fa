//! Persistence of the per-subject staircase state.
//!
//! The adaptive testing session writes one [`StaircaseState`] per subject when
//! it ends; every later testing session for that subject reads it back. A
//! store only ever holds the latest state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, StoreError};
use crate::staircase::StaircaseState;

/// Storage for one staircase state per subject.
pub trait DeltaStore {
    /// Stored state for `subject_id`, or `None` if the subject has not
    /// completed an adaptive session.
    fn load(&self, subject_id: u64) -> Result<Option<StaircaseState>>;

    /// Overwrite the stored state for `subject_id`.
    fn save(&mut self, subject_id: u64, state: StaircaseState) -> Result<()>;
}

/// In-process store, useful for simulations and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDeltaStore {
    states: HashMap<u64, StaircaseState>,
}

impl MemoryDeltaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subjects with a stored value.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no value has been stored.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl DeltaStore for MemoryDeltaStore {
    fn load(&self, subject_id: u64) -> Result<Option<StaircaseState>> {
        Ok(self.states.get(&subject_id).copied())
    }

    fn save(&mut self, subject_id: u64, state: StaircaseState) -> Result<()> {
        self.states.insert(subject_id, state);
        Ok(())
    }
}

/// On-disk document for one subject: the subject id next to the flattened
/// staircase fields (`delta`, `trial_counter`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    /// Subject the state belongs to.
    pub subject_id: u64,
    /// Final staircase state of the subject's adaptive session.
    #[serde(flatten)]
    pub state: StaircaseState,
}

/// Directory of JSON files, one `subj_<id>_delta.json` per subject.
#[derive(Debug, Clone)]
pub struct JsonDeltaStore {
    dir: PathBuf,
}

impl JsonDeltaStore {
    /// Use `dir` as the store root. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the state for `subject_id`.
    pub fn path_for(&self, subject_id: u64) -> PathBuf {
        self.dir.join(format!("subj_{subject_id}_delta.json"))
    }
}

fn store_err(path: &Path, source: impl Into<StoreError>) -> Error {
    Error::Store {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

impl DeltaStore for JsonDeltaStore {
    fn load(&self, subject_id: u64) -> Result<Option<StaircaseState>> {
        let path = self.path_for(subject_id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_err(&path, e)),
        };
        let stored: StoredState =
            serde_json::from_str(&text).map_err(|e| store_err(&path, e))?;
        if stored.subject_id != subject_id {
            return Err(Error::config(format!(
                "{} belongs to subject {}, expected {subject_id}",
                path.display(),
                stored.subject_id
            )));
        }
        tracing::info!(
            subject_id,
            delta = stored.state.delta,
            trial_counter = stored.state.trial_counter,
            path = %path.display(),
            "loaded staircase state"
        );
        Ok(Some(stored.state))
    }

    fn save(&mut self, subject_id: u64, state: StaircaseState) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| store_err(&self.dir, e))?;
        let path = self.path_for(subject_id);
        let text = serde_json::to_string_pretty(&StoredState { subject_id, state })
            .map_err(|e| store_err(&path, e))?;
        fs::write(&path, text).map_err(|e| store_err(&path, e))?;
        tracing::info!(
            subject_id,
            delta = state.delta,
            trial_counter = state.trial_counter,
            path = %path.display(),
            "saved staircase state"
        );
        Ok(())
    }
}
