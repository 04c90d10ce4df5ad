use serde_json::{Map, Value};

use super::form::{FormFields, ProjectForm};
use super::profiles::{TRACKED_PROFILES, upsert_profile};
use super::text::{mailto, split_lines, split_paragraphs};
use crate::content::{ContentDocument, ProfileKind, ensure_array};

/// Write the form back into a copy of `working`.
///
/// Only the regions the form exposes are replaced; everything else in the
/// working copy is carried over untouched. Field values are trimmed but not
/// otherwise validated.
pub fn collect(fields: &FormFields, working: &ContentDocument) -> ContentDocument {
    let mut updated = working.deep_clone();
    let name = fields.name.trim();

    let sidebar = updated.object_at_mut("sidebar");
    put_text(sidebar, "name", name);
    put_list(sidebar, "headline_lines", split_lines(&fields.headline));
    put_list(sidebar, "degree_lines", split_lines(&fields.degree));
    put_text(sidebar, "location", fields.location.trim());
    put_text(sidebar, "employer", fields.employer.trim());

    let nav = updated.object_at_mut("sidebar.nav");
    let profiles = ensure_array(nav, "profiles");
    for kind in &TRACKED_PROFILES {
        upsert_profile(profiles, kind, &profile_field_href(fields, kind));
    }

    let topbar = updated.object_at_mut("topbar");
    if !name.is_empty() {
        put_text(topbar, "name", name);
    } else if topbar.get("name").is_none_or(Value::is_null) {
        put_text(topbar, "name", "");
    }

    let summary = updated.object_at_mut("sections.summary");
    put_list(summary, "paragraphs", split_paragraphs(&fields.summary));

    let research = updated.object_at_mut("sections.research_interests");
    put_list(research, "items", split_lines(&fields.research));

    let items = fields
        .projects
        .iter()
        .filter(|form| !form.is_blank())
        .map(project_value)
        .collect();
    updated
        .object_at_mut("sections.projects")
        .insert("items".into(), Value::Array(items));

    // `linkedin_url` has no field and stays as it was.
    let contact = updated.object_at_mut("sections.contact");
    put_text(contact, "email", fields.contact_email.trim());
    put_text(contact, "cal_url", fields.contact_meeting_link.trim());

    tracing::debug!(
        projects = fields.projects.len(),
        "collected form fields into working copy"
    );
    updated
}

fn profile_field_href(fields: &FormFields, kind: &ProfileKind) -> String {
    match kind {
        ProfileKind::LinkedIn => fields.linkedin.trim().to_string(),
        ProfileKind::GitHub => fields.github.trim().to_string(),
        ProfileKind::Email => {
            let address = fields.email.trim();
            if address.is_empty() {
                String::new()
            } else {
                mailto(address)
            }
        }
        ProfileKind::Other(_) => String::new(),
    }
}

fn project_value(form: &ProjectForm) -> Value {
    let mut item = Map::new();
    put_text(&mut item, "title", form.title.trim());
    put_text(&mut item, "url", form.link.trim());
    put_text(&mut item, "description", form.description.trim());
    put_text(&mut item, "tech_stack", form.tech.trim());
    Value::Object(item)
}

fn put_text(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), Value::String(value.to_string()));
}

fn put_list(map: &mut Map<String, Value>, key: &str, values: Vec<String>) {
    map.insert(
        key.to_string(),
        Value::Array(values.into_iter().map(Value::String).collect()),
    );
}
