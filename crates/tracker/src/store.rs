use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use common::{Result, TrackerState};

/// Persistence seam for the tracker state.
///
/// The engine calls `load` exactly once and `save` exactly once per
/// invocation; all mutation happens in memory between the two. Failures
/// are fatal to the invocation — no retry, no partial recovery.
pub trait StateStore {
    fn load(&self) -> Result<TrackerState>;
    fn save(&self, state: &TrackerState) -> Result<()>;
}

/// JSON file store. The whole state blob is read on `load` and rewritten
/// in full on `save` (last-writer-wins, single invocation at a time).
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    /// A missing file is an empty state, not an error: the first
    /// `register` creates it.
    fn load(&self) -> Result<TrackerState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No state file, starting empty");
            return Ok(TrackerState::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, state: &TrackerState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "State saved");
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<TrackerState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: TrackerState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<TrackerState> {
        let guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, state: &TrackerState) -> Result<()> {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *guard = state.clone();
        Ok(())
    }
}
