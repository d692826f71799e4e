//! Anchor lookup over page markup.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::ui::{FormState, Input, InputKind};

/// The elements UI components attach to.
pub trait PageAnchors {
    fn has_id(&self, id: &str) -> bool;

    /// Number of elements carrying `class`.
    fn class_count(&self, class: &str) -> usize;

    fn has_class(&self, class: &str) -> bool {
        self.class_count(class) > 0
    }

    /// Forms marked `data-validate`, with their controls.
    fn validated_forms(&self) -> Vec<FormState>;
}

/// Anchors scanned from static HTML text.
#[derive(Clone, Debug, Default)]
pub struct HtmlPage {
    ids: HashSet<String>,
    classes: HashMap<String, usize>,
    forms: Vec<FormState>,
}

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid id regex")
    })
}

fn class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("valid class regex")
    })
}

fn form_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<form\b([^>]*)>(.*?)</form>").expect("valid form regex"))
}

fn control_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(input|textarea|select)\b([^>]*)>").expect("valid control regex")
    })
}

fn attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
            .expect("valid attribute regex")
    })
}

/// Parses a tag's attribute list; names are lowercased, bare attributes map to "".
fn parse_attrs(raw: &str) -> HashMap<String, String> {
    attr_regex()
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            (caps[1].to_ascii_lowercase(), value.to_owned())
        })
        .collect()
}

fn quoted(caps: &regex::Captures<'_>) -> String {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or_else(String::new, |m| m.as_str().to_owned())
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        let ids = id_regex()
            .captures_iter(html)
            .map(|caps| quoted(&caps))
            .filter(|id| !id.is_empty())
            .collect();

        let mut classes = HashMap::new();
        for caps in class_regex().captures_iter(html) {
            for class in quoted(&caps).split_whitespace() {
                *classes.entry(class.to_owned()).or_insert(0) += 1;
            }
        }

        let forms = form_regex()
            .captures_iter(html)
            .filter_map(|caps| {
                let attrs = parse_attrs(&caps[1]);
                attrs.contains_key("data-validate").then(|| {
                    FormState::new(attrs.get("id").cloned(), Self::parse_controls(&caps[2]))
                })
            })
            .collect();

        Self {
            ids,
            classes,
            forms,
        }
    }

    fn parse_controls(body: &str) -> Vec<Input> {
        control_regex()
            .captures_iter(body)
            .enumerate()
            .map(|(index, caps)| {
                let attrs = parse_attrs(&caps[2]);
                let kind = match caps[1].to_ascii_lowercase().as_str() {
                    "textarea" => InputKind::TextArea,
                    "select" => InputKind::Other,
                    _ => InputKind::from_type_attr(attrs.get("type").map(String::as_str)),
                };
                let name = attrs
                    .get("name")
                    .or_else(|| attrs.get("id"))
                    .filter(|name| !name.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("control-{index}"));
                Input {
                    name,
                    kind,
                    value: attrs.get("value").cloned().unwrap_or_default(),
                    required: attrs.contains_key("required"),
                }
            })
            .collect()
    }
}

impl PageAnchors for HtmlPage {
    fn has_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn class_count(&self, class: &str) -> usize {
        self.classes.get(class).copied().unwrap_or(0)
    }

    fn validated_forms(&self) -> Vec<FormState> {
        self.forms.clone()
    }
}
