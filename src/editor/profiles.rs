use serde_json::{Map, Value};

use crate::content::ProfileKind;

/// Profile kinds the form exposes, each as one scalar field.
pub(crate) const TRACKED_PROFILES: [ProfileKind; 3] =
    [ProfileKind::LinkedIn, ProfileKind::GitHub, ProfileKind::Email];

/// Position of the first profile entry tagged with `kind`. Later duplicates
/// are never addressed.
pub(crate) fn find_profile(profiles: &[Value], kind: &ProfileKind) -> Option<usize> {
    profiles.iter().position(|entry| {
        entry
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|tag| tag == kind.as_str())
    })
}

pub(crate) fn profile_href(profiles: &[Value], kind: &ProfileKind) -> String {
    find_profile(profiles, kind)
        .and_then(|idx| profiles[idx].get("href"))
        .map(crate::content::scalar_text)
        .unwrap_or_default()
}

/// Write `href` into the entry for `kind`.
///
/// An existing entry only has its `href` replaced, so custom chips and
/// labels survive. An empty `href` clears an existing entry rather than
/// removing it and never creates one.
pub(crate) fn upsert_profile(profiles: &mut Vec<Value>, kind: &ProfileKind, href: &str) {
    if let Some(idx) = find_profile(profiles, kind) {
        if let Some(entry) = profiles[idx].as_object_mut() {
            entry.insert("href".into(), Value::String(href.to_string()));
        }
        return;
    }

    if href.is_empty() {
        return;
    }

    let (chip, label) = kind.default_chip_and_label().unwrap_or(("", ""));
    let mut entry = Map::new();
    entry.insert("type".into(), Value::String(kind.as_str().to_string()));
    entry.insert("chip".into(), Value::String(chip.to_string()));
    entry.insert("label".into(), Value::String(label.to_string()));
    entry.insert("href".into(), Value::String(href.to_string()));
    profiles.push(Value::Object(entry));
}
