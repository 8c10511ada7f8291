use colored::Colorize;
use std::env;

pub const VERBOSE_ENV: &str = "UPDATE_LAUNCHER_VERBOSE";

/// Status lines on stderr. Silent unless verbose output was asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    enabled: bool,
}

impl Console {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_env() -> Self {
        Self::new(env_flag(env::var(VERBOSE_ENV).ok().as_deref()))
    }

    /// Turns output on when the config asks for it; never turns it off.
    pub fn or(self, enabled: bool) -> Self {
        Self::new(self.enabled || enabled)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn step(&self, msg: &str) {
        if self.enabled {
            eprintln!("> {}", msg);
        }
    }

    pub fn done(&self, msg: &str) {
        if self.enabled {
            eprintln!("> {}", msg.green());
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.enabled {
            eprintln!("> {}", msg.yellow());
        }
    }
}

fn env_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => !matches!(v.trim(), "" | "0" | "false" | "no"),
        None => false,
    }
}
