use std::{fmt, str::FromStr};

use crate::fixture::Literal;

/// What a fatal outcome does to the rest of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalPolicy {
    /// Report the fatal error for that iteration and keep going
    Continue,
    /// Stop after the fatal iteration without the completion marker
    Halt,
}

impl Default for FatalPolicy {
    fn default() -> Self {
        FatalPolicy::Continue
    }
}

impl fmt::Display for FatalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FatalPolicy::Continue => write!(f, "continue"),
            FatalPolicy::Halt => write!(f, "halt"),
        }
    }
}

impl FromStr for FatalPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(FatalPolicy::Continue),
            "halt" => Ok(FatalPolicy::Halt),
            _ => Err(format!(
                "unknown fatal policy {:?}, expected continue or halt",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Overrides the fixture's base
    pub base: Option<Literal>,
    pub on_fatal: FatalPolicy,
    pub completion_marker: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            base: None,
            on_fatal: FatalPolicy::default(),
            completion_marker: "===Done===".into(),
        }
    }
}

impl RunConfig {
    /// Base used when neither the config nor the fixture names one
    pub const DEFAULT_BASE: f64 = 20.3;

    pub fn new() -> Self {
        Self::default()
    }
}
