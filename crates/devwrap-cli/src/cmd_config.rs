use clap::Subcommand;
use std::path::Path;

use crate::config::{self, Config, KNOWN_KEYS};

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (e.g. dwell_secs)
        key: String,
        /// Config value (true/false/number/string)
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, path: &Path) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Set { key, value } => set(path, &key, &value),
        ConfigCmd::Get { key } => get(path, &key),
        ConfigCmd::List => list(path),
    }
}

// ── Command Implementations ──

/// `devwrap config set <key> <value>`
pub fn set(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        anyhow::bail!("unknown config key `{key}` (known: {})", KNOWN_KEYS.join(", "));
    }
    let mut map = config::read_map(path)?;
    map.insert(key.to_string(), config::parse_value(value));

    // Reject values that would make the whole file fall back to defaults.
    let cfg = match serde_json::from_value::<Config>(serde_json::Value::Object(map.clone())) {
        Ok(cfg) => cfg,
        Err(e) => anyhow::bail!("invalid value for `{key}`: {e}"),
    };
    if let Err(e) = cfg.validate() {
        anyhow::bail!("invalid value for `{key}`: {e}");
    }

    config::write_map(path, &map)?;
    println!("{key} = {value}");
    Ok(())
}

/// `devwrap config get <key>`
pub fn get(path: &Path, key: &str) -> anyhow::Result<()> {
    let map = config::read_map(path)?;
    match map.get(key) {
        Some(val) => println!("{val}"),
        None => println!("(not set)"),
    }
    Ok(())
}

/// `devwrap config list`
pub fn list(path: &Path) -> anyhow::Result<()> {
    let map = config::read_map(path)?;
    if map.is_empty() {
        println!("(no config set)");
    } else {
        for (k, v) in &map {
            println!("{k} = {v}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_writes_known_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        set(&path, "dwell_secs", "3").unwrap();
        assert_eq!(Config::load(&path).dwell_secs, 3);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        assert!(set(&path, "colour", "red").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn set_rejects_wrong_type() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        set(&path, "year", "2025").unwrap();
        assert!(set(&path, "year", "soon").is_err());
        assert_eq!(Config::load(&path).year, 2025);
    }

    #[test]
    fn set_rejects_out_of_range_durations() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        assert!(set(&path, "dwell_secs", "9223372036854775807").is_err());
        assert!(set(&path, "dwell_secs", "0").is_err());
        assert!(set(&path, "request_timeout_secs", "100000").is_err());
        assert!(!path.exists());
        set(&path, "dwell_secs", "3600").unwrap();
        assert_eq!(Config::load(&path).dwell_secs, 3600);
    }

    #[test]
    fn set_preserves_other_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        set(&path, "share_origin", "https://wrapped.example").unwrap();
        set(&path, "share_command", "wl-copy").unwrap();
        let cfg = Config::load(&path);
        assert_eq!(cfg.share_origin, "https://wrapped.example");
        assert_eq!(cfg.share_command.as_deref(), Some("wl-copy"));
    }

    #[test]
    fn get_and_list_on_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        get(&path, "year").unwrap();
        list(&path).unwrap();
    }
}
