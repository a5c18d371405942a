//! Load-or-create storage for a single JSON config file

use crate::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Where a loaded config came from.
#[derive(Debug)]
pub enum Origin {
    /// Parsed from an existing file.
    File,
    /// Built by the default factory and written to disk.
    Created,
    /// Built by the default factory, but writing it failed.
    Unsaved(Error),
}

#[derive(Debug)]
pub struct Loaded<T> {
    pub config: T,
    pub origin: Origin,
}

impl<T> Loaded<T> {
    pub fn into_inner(self) -> T {
        self.config
    }

    pub fn is_from_file(&self) -> bool {
        matches!(self.origin, Origin::File)
    }
}

/// Handle to a JSON config file holding a `T`.
///
/// The store only remembers the path; every call goes to disk.
pub struct ConfigStore<T> {
    path: PathBuf,
    _config: PhantomData<fn() -> T>,
}

impl<T> ConfigStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _config: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, config: &T) -> Result<()>
    where
        T: Serialize,
    {
        let content = serde_json::to_string_pretty(config).map_err(Error::Serialization)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        std::fs::write(&self.path, content).map_err(|e| Error::io(&self.path, e))?;
        tracing::debug!("Saved config to {}", self.path.display());

        Ok(())
    }
}

impl<T> ConfigStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Read and parse the file without creating it.
    pub fn read(&self) -> Result<T> {
        let content = self.read_content()?;
        self.parse(&content)
    }

    pub fn load_with<F>(&self, factory: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        self.load_detailed(|| Ok::<T, Infallible>(factory()))
            .map(Loaded::into_inner)
    }

    pub fn try_load_with<F, E>(&self, factory: F) -> Result<T>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        self.load_detailed(factory).map(Loaded::into_inner)
    }

    pub fn load_or_default(&self) -> Result<T>
    where
        T: Default,
    {
        self.load_with(T::default)
    }

    /// Load the file, or build a default with `factory` and persist it.
    ///
    /// A failed write of the fresh default does not fail the load; it is
    /// reported through [`Origin::Unsaved`]. An existing file is never
    /// rewritten; if it cannot be checked, read or parsed the load fails.
    pub fn load_detailed<F, E>(&self, factory: F) -> Result<Loaded<T>>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        let exists = self
            .path
            .try_exists()
            .map_err(|e| Error::io(&self.path, e))?;
        if !exists {
            return self.create_default(factory);
        }

        let content = self.read_content()?;
        let config = self.parse(&content)?;
        tracing::debug!("Loaded config from {}", self.path.display());

        Ok(Loaded {
            config,
            origin: Origin::File,
        })
    }

    fn create_default<F, E>(&self, factory: F) -> Result<Loaded<T>>
    where
        F: FnOnce() -> std::result::Result<T, E>,
        E: fmt::Display,
    {
        let config = factory().map_err(|e| Error::Instantiation(e.to_string()))?;

        tracing::info!("Creating new config file {}", self.path.display());
        let origin = match self.save(&config) {
            Ok(()) => Origin::Created,
            Err(e) => {
                tracing::warn!("Could not write default config: {}", e);
                Origin::Unsaved(e)
            }
        };

        Ok(Loaded { config, origin })
    }

    fn read_content(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))
    }

    fn parse(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl<T> Clone for ConfigStore<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> fmt::Debug for ConfigStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .finish()
    }
}
