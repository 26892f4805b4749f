//! Durable storage for [`GeneratorState`].

use std::{
    fs, io,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::{Error, GeneratorState};

/// A slot that holds one [`GeneratorState`] record across process restarts.
pub trait StateStore {
    /// Returns the previously saved state, or `None` if nothing has been saved yet.
    fn load(&mut self) -> Result<Option<GeneratorState>, Error>;

    /// Persists `state`, replacing any prior record.
    fn save(&mut self, state: &GeneratorState) -> Result<(), Error>;
}

/// A [`StateStore`] that keeps the state as JSON in a single file.
///
/// Saving writes to a temporary file in the same directory and renames it over the target, so a
/// crash mid-write leaves the previous record intact.
///
/// # Examples
///
/// ```rust
/// use uuid1::{FileStore, Generator, NodeFallback};
///
/// let dir = tempfile::tempdir()?;
/// let g = Generator::builder(FileStore::new(dir.path().join("uuid_state.json")))
///     .node_fallback(NodeFallback::Random)
///     .build()?;
/// println!("{}", g.generate()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, state: &GeneratorState) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, state)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl StateStore for FileStore {
    fn load(&mut self) -> Result<Option<GeneratorState>, Error> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::Load(err.into())),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| Error::Load(err.into()))
    }

    fn save(&mut self, state: &GeneratorState) -> Result<(), Error> {
        self.write_atomic(state)
            .map_err(|err| Error::Save(err.into()))?;
        log::debug!("saved generator state to {}", self.path.display());
        Ok(())
    }
}

/// A [`StateStore`] that keeps the state in memory.
///
/// Clones share the same slot, so a clone kept by the caller observes what a generator saves.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<Mutex<Option<GeneratorState>>>);

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `state`.
    pub fn with_state(state: GeneratorState) -> Self {
        Self(Arc::new(Mutex::new(Some(state))))
    }

    /// Returns a copy of the stored state.
    pub fn get(&self) -> Option<GeneratorState> {
        self.0.lock().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> Result<Option<GeneratorState>, Error> {
        Ok(self.get())
    }

    fn save(&mut self, state: &GeneratorState) -> Result<(), Error> {
        *self.0.lock() = Some(state.clone());
        Ok(())
    }
}
