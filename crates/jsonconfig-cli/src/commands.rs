//! Subcommands of the `jsonconfig` binary

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use jsonconfig_core::{ConfigStore, Origin};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::io::Write;
use std::path::Path;

use crate::keys::{get_key, parse_value, set_key};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the config file with an empty object if it does not exist
    Init,

    /// Print the config file
    Show,

    /// Print the value at a dotted key path
    Get { key: String },

    /// Set a dotted key path to a value (parsed as JSON when possible)
    Set { key: String, value: String },

    /// Rewrite the config file pretty-printed
    Fmt,
}

fn empty_document() -> Value {
    Value::Object(Map::new())
}

fn read_document(store: &ConfigStore<Value>) -> Result<Value> {
    store
        .read()
        .with_context(|| format!("Failed to read {}", store.path().display()))
}

pub fn run(command: &Command, path: &Path, out: &mut impl Write) -> Result<()> {
    let store = ConfigStore::<Value>::new(path);

    match command {
        Command::Init => {
            let loaded = store.load_detailed(|| Ok::<_, Infallible>(empty_document()))?;
            match loaded.origin {
                Origin::File => writeln!(out, "{} already exists", path.display())?,
                Origin::Created => writeln!(out, "Created {}", path.display())?,
                Origin::Unsaved(e) => {
                    return Err(e).with_context(|| format!("Could not create {}", path.display()));
                }
            }
        }
        Command::Show => {
            let doc = read_document(&store)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
        Command::Get { key } => {
            let doc = read_document(&store)?;
            match get_key(&doc, key)? {
                Some(Value::String(s)) => writeln!(out, "{}", s)?,
                Some(value) => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
                None => bail!("Key '{}' not found in {}", key, path.display()),
            }
        }
        Command::Set { key, value } => {
            let mut doc = store.load_with(empty_document)?;
            set_key(&mut doc, key, parse_value(value))?;
            store
                .save(&doc)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Set {} in {}", key, path.display());
        }
        Command::Fmt => {
            let doc = read_document(&store)?;
            store.save(&doc)?;
            writeln!(out, "Formatted {}", path.display())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn run_to_string(command: Command, path: &Path) -> Result<String> {
        let mut out = Vec::new();
        run(&command, path, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_init_creates_empty_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let output = run_to_string(Command::Init, &path).unwrap();
        assert!(output.starts_with("Created"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        let output = run_to_string(Command::Init, &path).unwrap();
        assert!(output.contains("already exists"));
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        run_to_string(
            Command::Set {
                key: "audio.volume".to_string(),
                value: "80".to_string(),
            },
            &path,
        )
        .unwrap();
        run_to_string(
            Command::Set {
                key: "name".to_string(),
                value: "alice".to_string(),
            },
            &path,
        )
        .unwrap();

        let volume = run_to_string(
            Command::Get {
                key: "audio.volume".to_string(),
            },
            &path,
        )
        .unwrap();
        assert_eq!(volume, "80\n");

        let name = run_to_string(
            Command::Get {
                key: "name".to_string(),
            },
            &path,
        )
        .unwrap();
        assert_eq!(name, "alice\n");

        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({"audio": {"volume": 80}, "name": "alice"}));
    }

    #[test]
    fn test_get_missing_key_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"volume": 50}"#).unwrap();

        let err = run_to_string(
            Command::Get {
                key: "name".to_string(),
            },
            &path,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_show_missing_file_does_not_create_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        assert!(run_to_string(Command::Show, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_fmt_rewrites_pretty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"volume":80,"name":"alice"}"#).unwrap();

        // Untyped documents are written with sorted keys
        run_to_string(Command::Fmt, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"name\": \"alice\",\n  \"volume\": 80\n}"
        );
    }

    #[test]
    fn test_set_on_malformed_file_leaves_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let result = run_to_string(
            Command::Set {
                key: "name".to_string(),
                value: "alice".to_string(),
            },
            &path,
        );
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_fmt_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{\"volume\": 80,").unwrap();

        let err = run_to_string(Command::Fmt, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"volume\": 80,");
    }

    #[cfg(unix)]
    #[test]
    fn test_init_unwritable_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        // Dangling link into a missing directory cannot be written through
        std::os::unix::fs::symlink(temp_dir.path().join("gone/config.json"), &path).unwrap();

        let err = run_to_string(Command::Init, &path).unwrap_err();
        assert!(err.to_string().starts_with("Could not create"));
        assert!(!temp_dir.path().join("gone").exists());
    }
}
