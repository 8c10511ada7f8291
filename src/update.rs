use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::{
    console::Console,
    process::{get_os, update_command, update_command_line},
    utility::Config,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No script, no interpreter for this platform, or it failed to start.
    Skipped,
    /// The script ran to completion. `code` is `None` when it was killed.
    Finished { code: Option<i32> },
}

pub fn script_path(dir: &Path, config: &Config) -> PathBuf {
    dir.join(&config.update_script)
}

/// Runs the update script, if there is one, and blocks until it exits.
///
/// A missing script or an interpreter that cannot be started yields
/// [`UpdateOutcome::Skipped`].
pub fn run_update_step(
    dir: &Path,
    config: &Config,
    console: &Console,
    exec: impl FnOnce(&mut Command) -> io::Result<ExitStatus>,
) -> UpdateOutcome {
    let script = script_path(dir, config);
    if !script.is_file() {
        console.step(&format!("no {} found, skipping update", config.update_script));
        return UpdateOutcome::Skipped;
    }

    let os = get_os();
    let Some(mut cmd) = update_command(os, dir, &script) else {
        console.warn("no script interpreter for this platform, skipping update");
        return UpdateOutcome::Skipped;
    };

    if let Some(line) = update_command_line(os, &script) {
        console.step(&format!("running {line}"));
    }

    match exec(&mut cmd) {
        Ok(status) => {
            let code = status.code();
            match code {
                Some(0) => console.done("update finished"),
                Some(code) => console.warn(&format!("update exited with {code}")),
                None => console.warn("update exit status unknown"),
            }
            UpdateOutcome::Finished { code }
        }
        Err(err) => {
            console.warn(&format!("update did not start: {err}"));
            UpdateOutcome::Skipped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_script_is_skipped_without_running_anything() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ran = false;
        let outcome = run_update_step(tmp.path(), &Config::default(), &Console::default(), |_| {
            ran = true;
            Err(io::Error::new(io::ErrorKind::Other, "unreachable"))
        });
        assert_eq!(outcome, UpdateOutcome::Skipped);
        assert!(!ran);
    }

    #[test]
    fn start_failure_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("update.bat"), "exit 0\n").unwrap();
        let outcome = run_update_step(tmp.path(), &Config::default(), &Console::default(), |_| {
            Err(io::Error::from(io::ErrorKind::NotFound))
        });
        assert_eq!(outcome, UpdateOutcome::Skipped);
    }

    #[test]
    fn script_path_uses_configured_name() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config {
            update_script: "pre-launch.cmd".to_string(),
            ..Config::default()
        };
        assert_eq!(script_path(tmp.path(), &config), tmp.path().join("pre-launch.cmd"));
    }

    #[cfg(unix)]
    #[test]
    fn script_exit_code_is_captured() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("update.bat"), "exit 3\n").unwrap();
        let outcome = run_update_step(tmp.path(), &Config::default(), &Console::default(), |cmd| {
            cmd.status()
        });
        assert_eq!(outcome, UpdateOutcome::Finished { code: Some(3) });
    }
}
