use anyhow::{anyhow, Context, Result};
use serde_derive::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::console::Console;

pub const CONFIG_FILE: &str = "Launcher.toml";

pub const DEFAULT_UPDATE_SCRIPT: &str = "update.bat";
pub const DEFAULT_MAIN_EXECUTABLE: &str = "SIP Toast.exe";

/// Optional overrides read from `Launcher.toml` next to the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub update_script: String,
    pub main_executable: String,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_script: String::from(DEFAULT_UPDATE_SCRIPT),
            main_executable: String::from(DEFAULT_MAIN_EXECUTABLE),
            verbose: false,
        }
    }
}

/// Directory holding the running executable.
pub fn install_dir() -> Result<PathBuf> {
    let executable = env::current_exe().context("locate launcher executable")?;
    dir_of(&executable)
}

pub fn dir_of(executable: &Path) -> Result<PathBuf> {
    executable
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("{} has no parent directory", executable.display()))
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Reads `Launcher.toml` from `dir`. A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<Config> {
    let path = config_path(dir);
    if !Path::is_file(&path) {
        return Ok(Config::default());
    }

    let contents =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;

    Ok(config)
}

/// Like [`load_config`], but a broken file only costs a console warning.
pub fn load_config_or_default(dir: &Path, console: &Console) -> Config {
    match load_config(dir) {
        Ok(config) => config,
        Err(err) => {
            console.warn(&format!("ignoring config: {err:#}"));
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.update_script, "update.bat");
        assert_eq!(config.main_executable, "SIP Toast.exe");
        assert!(!config.verbose);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "main_executable = \"Other.exe\"\n").unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.main_executable, "Other.exe");
        assert_eq!(config.update_script, DEFAULT_UPDATE_SCRIPT);
        assert!(!config.verbose);
    }

    #[test]
    fn full_config_overrides_every_key() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            config_path(tmp.path()),
            "update_script = \"pre.cmd\"\nmain_executable = \"Tool.exe\"\nverbose = true\n",
        )
        .unwrap();

        let wanted = Config {
            update_script: "pre.cmd".to_string(),
            main_executable: "Tool.exe".to_string(),
            verbose: true,
        };
        assert_eq!(load_config(tmp.path()).unwrap(), wanted);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "verbose = \"maybe\"\n").unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE));
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(config_path(tmp.path()), "not toml at all [[\n").unwrap();

        let config = load_config_or_default(tmp.path(), &Console::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn dir_of_strips_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let exe = tmp.path().join("update.exe");
        assert_eq!(dir_of(&exe).unwrap(), tmp.path());
    }

    #[test]
    fn install_dir_contains_test_binary() {
        let dir = install_dir().unwrap();
        let exe = env::current_exe().unwrap();
        assert_eq!(exe.parent().unwrap(), dir);
    }
}
