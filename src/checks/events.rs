use std::path::{Path, PathBuf};

use serde::Serialize;

use super::read_to_string;
use crate::{HtmlPage, PageAnchors};

/// A translated copy of the site's main page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LanguagePage {
    pub name: &'static str,
    pub path: &'static str,
}

pub const LANGUAGE_PAGES: [LanguagePage; 6] = [
    LanguagePage {
        name: "German",
        path: "frontend/public/index.html",
    },
    LanguagePage {
        name: "English",
        path: "frontend/locales/en.html",
    },
    LanguagePage {
        name: "Turkish",
        path: "frontend/locales/tr.html",
    },
    LanguagePage {
        name: "Russian",
        path: "frontend/locales/ru.html",
    },
    LanguagePage {
        name: "Arabic",
        path: "frontend/locales/ar.html",
    },
    LanguagePage {
        name: "Simple German",
        path: "frontend/locales/einfach.html",
    },
];

const EVENT_COUNT: usize = 4;

/// Element ids every language page must carry, with a readable label.
pub fn expected_elements() -> Vec<(String, String)> {
    let sections = (1..=EVENT_COUNT).map(|n| (format!("event{n}"), format!("Event {n} Section")));
    let modals = (1..=EVENT_COUNT).map(|n| {
        (
            format!("participants-modal-{n}"),
            format!("Event {n} Modal"),
        )
    });
    sections.chain(modals).collect()
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PageReport {
    pub language: String,
    pub path: PathBuf,
    pub passed: usize,
    /// Labels of the expected elements that were not found.
    pub missing: Vec<String>,
    /// Set when the page could not be read at all.
    pub error: Option<String>,
}

impl PageReport {
    pub fn failed(&self) -> usize {
        self.missing.len()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.missing.is_empty()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EventsReport {
    pub pages: Vec<PageReport>,
}

impl EventsReport {
    pub fn is_ok(&self) -> bool {
        self.pages.iter().all(PageReport::is_ok)
    }
}

/// Checks that each language page has all event sections and participant modals.
pub fn check_event_sections(root: &Path) -> EventsReport {
    let expected = expected_elements();
    let pages = LANGUAGE_PAGES
        .iter()
        .map(|page| {
            let path = root.join(page.path);
            let mut report = PageReport {
                language: page.name.to_owned(),
                path: path.clone(),
                passed: 0,
                missing: Vec::new(),
                error: None,
            };
            match read_to_string(&path) {
                Ok(html) => {
                    let anchors = HtmlPage::parse(&html);
                    for (id, label) in &expected {
                        if anchors.has_id(id) {
                            report.passed += 1;
                        } else {
                            report.missing.push(label.clone());
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(target: "kosge", "{err}");
                    report.error = Some(err.to_string());
                }
            }
            report
        })
        .collect();
    EventsReport { pages }
}
