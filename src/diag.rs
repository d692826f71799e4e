use std::fmt;

use crate::Config;

/// Diagnostic logging handle.
///
/// Debug lines are only emitted when the configuration enables diagnostics
/// (local development hosts by default). Warnings are always emitted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.debug())
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn log(&self, args: fmt::Arguments<'_>) {
        if self.enabled {
            tracing::debug!(target: "kosge", "[KOSGE] {args}");
        }
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(target: "kosge", "[KOSGE] {args}");
    }
}
