use anyhow::Result;
use std::process;

use update_launcher::{
    console::Console,
    launch::{self, LaunchOutcome},
    notify,
    utility::{install_dir, load_config_or_default},
};

fn main() {
    let code = match run() {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            notify::show_error(&format!("{err:#}"));
            1
        }
    };

    process::exit(code);
}

fn run() -> Result<LaunchOutcome> {
    let console = Console::from_env();
    let dir = install_dir()?;

    let config = load_config_or_default(&dir, &console);
    let console = console.or(config.verbose);
    console.step(&format!("install directory {}", dir.display()));

    Ok(launch::run(&dir, &config, &console))
}
