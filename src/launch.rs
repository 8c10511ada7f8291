use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::{
    console::Console,
    notify,
    process::{main_command, main_command_line, spawn_detached},
    update::run_update_step,
    utility::Config,
};

#[derive(Debug)]
pub struct LaunchError {
    executable: String,
    source: io::Error,
}

impl LaunchError {
    pub fn new(executable: impl Into<String>, source: io::Error) -> Self {
        Self {
            executable: executable.into(),
            source,
        }
    }

    /// Platform error code reported by the OS, if any.
    pub fn code(&self) -> Option<i32> {
        self.source.raw_os_error()
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "Failed to launch {} (Error: {})", self.executable, code),
            None => write!(f, "Failed to launch {} (Error: {})", self.executable, self.source),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug)]
pub enum LaunchOutcome {
    Launched,
    Failed(LaunchError),
}

impl LaunchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::Launched => 0,
            LaunchOutcome::Failed(_) => 1,
        }
    }
}

pub fn main_app_path(dir: &Path, config: &Config) -> PathBuf {
    dir.join(&config.main_executable)
}

/// Starts the main application without waiting for it.
pub fn launch_main_app(
    dir: &Path,
    config: &Config,
    console: &Console,
    spawn: impl FnOnce(&mut Command) -> io::Result<()>,
) -> LaunchOutcome {
    let executable = main_app_path(dir, config);
    let mut cmd = main_command(dir, &executable);
    console.step(&format!("starting {}", main_command_line(&executable)));

    match spawn(&mut cmd) {
        Ok(()) => {
            console.done("launched");
            LaunchOutcome::Launched
        }
        Err(err) => LaunchOutcome::Failed(LaunchError::new(config.main_executable.clone(), err)),
    }
}

/// Update step, then main application. Shows the error box on failure.
pub fn run(dir: &Path, config: &Config, console: &Console) -> LaunchOutcome {
    run_with_deps(
        dir,
        config,
        console,
        |cmd| cmd.status(),
        spawn_detached,
        notify::show_error,
    )
}

pub fn run_with_deps(
    dir: &Path,
    config: &Config,
    console: &Console,
    run_update: impl FnOnce(&mut Command) -> io::Result<ExitStatus>,
    spawn_main: impl FnOnce(&mut Command) -> io::Result<()>,
    notify: impl FnOnce(&str),
) -> LaunchOutcome {
    run_update_step(dir, config, console, run_update);

    let outcome = launch_main_app(dir, config, console, spawn_main);
    if let LaunchOutcome::Failed(err) = &outcome {
        console.warn(&err.to_string());
        notify(&err.to_string());
    }
    outcome
}
