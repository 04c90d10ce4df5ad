use serde_json::Value;

use super::form::{FormFields, ProjectForm};
use super::profiles::profile_href;
use super::text::{join_lines, join_paragraphs, strip_mailto};
use crate::content::{ContentDocument, ProfileKind, scalar_text};

/// Map a document onto flat form fields. Missing or mistyped regions yield
/// empty fields; this never fails.
pub fn populate(document: &ContentDocument) -> FormFields {
    let profiles = document.items_at("sidebar.nav.profiles");

    FormFields {
        name: document.text_at("sidebar.name"),
        headline: join_lines(&document.lines_at("sidebar.headline_lines")),
        degree: join_lines(&document.lines_at("sidebar.degree_lines")),
        location: document.text_at("sidebar.location"),
        employer: document.text_at("sidebar.employer"),
        linkedin: profile_href(profiles, &ProfileKind::LinkedIn),
        github: profile_href(profiles, &ProfileKind::GitHub),
        email: strip_mailto(&profile_href(profiles, &ProfileKind::Email)).to_string(),
        summary: join_paragraphs(&document.lines_at("sections.summary.paragraphs")),
        research: join_lines(&document.lines_at("sections.research_interests.items")),
        contact_email: document.text_at("sections.contact.email"),
        contact_meeting_link: document.text_at("sections.contact.cal_url"),
        projects: document
            .items_at("sections.projects.items")
            .iter()
            .map(project_form)
            .collect(),
    }
}

fn project_form(item: &Value) -> ProjectForm {
    let text = |key: &str| item.get(key).map(scalar_text).unwrap_or_default();
    ProjectForm {
        title: text("title"),
        link: text("url"),
        description: text("description"),
        tech: text("tech_stack"),
    }
}
