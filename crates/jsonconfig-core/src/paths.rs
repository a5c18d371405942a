//! Platform config locations

use crate::{Error, Result};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub fn config_dir(app_name: &str) -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(app_name))
        .ok_or(Error::NoConfigDir)
}

pub fn default_config_path(app_name: &str) -> Result<PathBuf> {
    Ok(config_dir(app_name)?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_layout() {
        // Not every CI platform has a config dir
        if let Ok(path) = default_config_path("myapp") {
            assert!(path.ends_with("myapp/config.json"));
            assert_eq!(path.parent().unwrap(), config_dir("myapp").unwrap());
        }
    }
}
