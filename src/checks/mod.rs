//! Consistency checks over the static language pages of the site.
//!
//! Paths are relative to a site root that contains `frontend/`.

pub mod events;
pub mod languages;

use std::fs;
use std::path::{Component, Path, PathBuf};

pub use events::{check_event_sections, EventsReport, PageReport, LANGUAGE_PAGES};
pub use languages::{check_language_config, FileCheck, LanguagesReport, PageSwitchReport};

/// Error type of the site checks.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_to_string(path: &Path) -> Result<String, CheckError> {
    fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Resolves `.` and `..` lexically, without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
