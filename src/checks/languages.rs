use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{normalize, read_to_string, CheckError};

pub const LOCALES_DIR: &str = "frontend/locales";
pub const LANGUAGE_CONFIG_PATH: &str = "frontend/locales/language_config.json";
pub const MAIN_PAGE_PATH: &str = "frontend/public/index.html";

/// Code of the language served by the main page.
pub const MAIN_LANGUAGE: &str = "de";

/// `frontend/locales/language_config.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct LanguageConfig {
    pub available_languages: BTreeMap<String, LanguageEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LanguageEntry {
    pub file: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Whether a configured language file exists.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FileCheck {
    pub code: String,
    pub file: String,
    pub resolved: PathBuf,
    pub exists: bool,
}

/// One `'key': 'path'` entry of a page's language switcher.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SwitchEntry {
    pub key: String,
    pub path: String,
    pub expected: String,
}

impl SwitchEntry {
    pub fn matches(&self) -> bool {
        self.path == self.expected
    }
}

/// The language switcher found in one page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PageSwitchReport {
    pub code: String,
    pub page: PathBuf,
    /// `None` when the page has no `languageConfig = {...}` block.
    pub entries: Option<Vec<SwitchEntry>>,
    pub error: Option<String>,
}

impl PageSwitchReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
            && self
                .entries
                .as_ref()
                .is_some_and(|entries| entries.iter().all(SwitchEntry::matches))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LanguagesReport {
    pub files: Vec<FileCheck>,
    pub pages: Vec<PageSwitchReport>,
}

impl LanguagesReport {
    pub fn is_ok(&self) -> bool {
        self.files.iter().all(|file| file.exists) && self.pages.iter().all(PageSwitchReport::is_ok)
    }
}

fn block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"languageConfig\s*=\s*\{([^}]*)\}").expect("valid block regex"))
}

fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"['"]([^'"]+)['"]\s*:\s*['"]([^'"]+)['"]"#).expect("valid entry regex")
    })
}

/// Extracts the `key → path` pairs of the first `languageConfig = {...}` block.
pub fn parse_switch_block(html: &str) -> Option<Vec<(String, String)>> {
    let block = block_regex().captures(html)?;
    Some(
        entry_regex()
            .captures_iter(&block[1])
            .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
            .collect(),
    )
}

/// Switcher target expected in a page under `frontend/locales/`.
pub fn expected_switch_path(key: &str) -> String {
    if key == MAIN_LANGUAGE {
        "../index.html".to_owned()
    } else {
        format!("{key}.html")
    }
}

/// Page holding the content for language `code`, relative to the site root.
pub fn page_for(code: &str) -> PathBuf {
    if code == MAIN_LANGUAGE {
        PathBuf::from(MAIN_PAGE_PATH)
    } else {
        Path::new(LOCALES_DIR).join(format!("{code}.html"))
    }
}

/// Verifies the language configuration against the files on disk and the
/// switchers embedded in each language page.
pub fn check_language_config(root: &Path) -> Result<LanguagesReport, CheckError> {
    let config_path = root.join(LANGUAGE_CONFIG_PATH);
    let raw = read_to_string(&config_path)?;
    let config: LanguageConfig =
        serde_json::from_str(&raw).map_err(|source| CheckError::Json {
            path: config_path.clone(),
            source,
        })?;

    let locales = root.join(LOCALES_DIR);
    let files = config
        .available_languages
        .iter()
        .map(|(code, entry)| {
            let resolved = normalize(&locales.join(&entry.file));
            FileCheck {
                code: code.clone(),
                file: entry.file.clone(),
                exists: resolved.is_file(),
                resolved,
            }
        })
        .collect();

    let pages = config
        .available_languages
        .keys()
        .map(|code| {
            let page = root.join(page_for(code));
            let mut report = PageSwitchReport {
                code: code.clone(),
                page: page.clone(),
                entries: None,
                error: None,
            };
            match read_to_string(&page) {
                Ok(html) => {
                    report.entries = parse_switch_block(&html).map(|pairs| {
                        pairs
                            .into_iter()
                            .map(|(key, path)| SwitchEntry {
                                expected: expected_switch_path(&key),
                                key,
                                path,
                            })
                            .collect()
                    });
                }
                Err(err) => {
                    tracing::warn!(target: "kosge", "{err}");
                    report.error = Some(err.to_string());
                }
            }
            report
        })
        .collect();

    Ok(LanguagesReport { files, pages })
}
