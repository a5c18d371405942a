//! Load-or-create JSON configuration files for any serde type.

pub mod error;
pub mod paths;
pub mod store;

pub use error::{Error, Result};
pub use store::{ConfigStore, Loaded, Origin};

use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Load the config at `path`, creating it from `factory` if it does not exist.
pub fn load<T, F>(path: impl AsRef<Path>, factory: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    ConfigStore::new(path.as_ref()).load_with(factory)
}

/// Write `config` to `path` as pretty-printed JSON.
pub fn save<T: Serialize>(config: &T, path: impl AsRef<Path>) -> Result<()> {
    ConfigStore::<T>::new(path.as_ref()).save(config)
}
