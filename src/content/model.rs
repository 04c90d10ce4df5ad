use serde::Deserialize;
use serde_json::Value;

use super::lenient;

/// Read-only typed view of a site content document, used by the preview
/// renderer. Built leniently: anything missing or malformed is a default.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteContent {
    #[serde(deserialize_with = "lenient::or_default")]
    pub sidebar: Sidebar,
    #[serde(deserialize_with = "lenient::or_default")]
    pub topbar: Topbar,
    #[serde(deserialize_with = "lenient::or_default")]
    pub sections: Sections,
    #[serde(deserialize_with = "lenient::or_default")]
    pub footer: Option<Footer>,
}

impl SiteContent {
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Sidebar {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub headline_lines: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub degree_lines: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub employer: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub avatar: Avatar,
    #[serde(deserialize_with = "lenient::or_default")]
    pub nav: SidebarNav,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Avatar {
    #[serde(deserialize_with = "lenient::text")]
    pub src: String,
    #[serde(deserialize_with = "lenient::text")]
    pub alt: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SidebarNav {
    #[serde(deserialize_with = "lenient::list")]
    pub main: Vec<NavLink>,
    #[serde(deserialize_with = "lenient::list")]
    pub profiles: Vec<ProfileLink>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavLink {
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(deserialize_with = "lenient::text")]
    pub href: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileLink {
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: ProfileKind,
    #[serde(deserialize_with = "lenient::text")]
    pub chip: String,
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(deserialize_with = "lenient::text")]
    pub href: String,
}

/// The `type` tag of a profile link. The set is open: unknown tags are kept
/// verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ProfileKind {
    LinkedIn,
    GitHub,
    Email,
    Other(String),
}

impl ProfileKind {
    pub fn as_str(&self) -> &str {
        match self {
            ProfileKind::LinkedIn => "linkedin",
            ProfileKind::GitHub => "github",
            ProfileKind::Email => "email",
            ProfileKind::Other(tag) => tag,
        }
    }

    /// Chip and label used when the editor has to create a missing entry.
    pub fn default_chip_and_label(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ProfileKind::LinkedIn => Some(("in", "LinkedIn")),
            ProfileKind::GitHub => Some(("gh", "GitHub")),
            ProfileKind::Email => Some(("@", "Email")),
            ProfileKind::Other(_) => None,
        }
    }
}

impl Default for ProfileKind {
    fn default() -> Self {
        ProfileKind::Other(String::new())
    }
}

impl From<String> for ProfileKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "linkedin" => ProfileKind::LinkedIn,
            "github" => ProfileKind::GitHub,
            "email" => ProfileKind::Email,
            _ => ProfileKind::Other(tag),
        }
    }
}

impl From<&str> for ProfileKind {
    fn from(tag: &str) -> Self {
        ProfileKind::from(tag.to_string())
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Topbar {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Sections {
    #[serde(deserialize_with = "lenient::or_default")]
    pub summary: Option<SummarySection>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub research_interests: Option<ListSection>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub projects: Option<ProjectsSection>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub contact: Option<ContactSection>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub chat: Option<BlurbSection>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub assistant_landing: Option<BlurbSection>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummarySection {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub paragraphs: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListSection {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub items: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectsSection {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<Project>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub tech_stack: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactSection {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub cal_url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub linkedin_url: String,
}

/// Title and description pair used by the chat and assistant landing
/// sections. Passed through untouched by the editor.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlurbSection {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Footer {
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
}
