use std::ops::Index;

/// The flat set of editable fields mirrored from a content document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub headline: String,
    pub degree: String,
    pub location: String,
    pub employer: String,
    pub linkedin: String,
    pub github: String,
    pub email: String,
    pub summary: String,
    pub research: String,
    pub contact_email: String,
    pub contact_meeting_link: String,
    pub projects: ProjectForms,
}

impl FormFields {
    pub fn field(&self, id: FieldId) -> &str {
        match id {
            FieldId::Name => &self.name,
            FieldId::Headline => &self.headline,
            FieldId::Degree => &self.degree,
            FieldId::Location => &self.location,
            FieldId::Employer => &self.employer,
            FieldId::LinkedIn => &self.linkedin,
            FieldId::GitHub => &self.github,
            FieldId::Email => &self.email,
            FieldId::Summary => &self.summary,
            FieldId::Research => &self.research,
            FieldId::ContactEmail => &self.contact_email,
            FieldId::ContactMeetingLink => &self.contact_meeting_link,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut String {
        match id {
            FieldId::Name => &mut self.name,
            FieldId::Headline => &mut self.headline,
            FieldId::Degree => &mut self.degree,
            FieldId::Location => &mut self.location,
            FieldId::Employer => &mut self.employer,
            FieldId::LinkedIn => &mut self.linkedin,
            FieldId::GitHub => &mut self.github,
            FieldId::Email => &mut self.email,
            FieldId::Summary => &mut self.summary,
            FieldId::Research => &mut self.research,
            FieldId::ContactEmail => &mut self.contact_email,
            FieldId::ContactMeetingLink => &mut self.contact_meeting_link,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Headline,
    Degree,
    Location,
    Employer,
    LinkedIn,
    GitHub,
    Email,
    Summary,
    Research,
    ContactEmail,
    ContactMeetingLink,
}

impl FieldId {
    /// Every scalar field in on-screen order.
    pub const ALL: [FieldId; 12] = [
        FieldId::Name,
        FieldId::Headline,
        FieldId::Degree,
        FieldId::Location,
        FieldId::Employer,
        FieldId::LinkedIn,
        FieldId::GitHub,
        FieldId::Email,
        FieldId::Summary,
        FieldId::Research,
        FieldId::ContactEmail,
        FieldId::ContactMeetingLink,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Headline => "Headline (one line per row)",
            FieldId::Degree => "Degrees (one line per row)",
            FieldId::Location => "Location",
            FieldId::Employer => "Employer",
            FieldId::LinkedIn => "LinkedIn URL",
            FieldId::GitHub => "GitHub URL",
            FieldId::Email => "Email",
            FieldId::Summary => "Summary (blank line between paragraphs)",
            FieldId::Research => "Research interests (one per line)",
            FieldId::ContactEmail => "Contact email",
            FieldId::ContactMeetingLink => "Meeting link",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            FieldId::Headline | FieldId::Degree | FieldId::Summary | FieldId::Research
        )
    }

    pub fn section(self) -> &'static str {
        match self {
            FieldId::Name
            | FieldId::Headline
            | FieldId::Degree
            | FieldId::Location
            | FieldId::Employer
            | FieldId::LinkedIn
            | FieldId::GitHub
            | FieldId::Email => "Profile",
            FieldId::Summary => "Summary",
            FieldId::Research => "Research Interests",
            FieldId::ContactEmail | FieldId::ContactMeetingLink => "Contact",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Title,
    Link,
    Description,
    Tech,
}

impl ProjectField {
    pub const ALL: [ProjectField; 4] = [
        ProjectField::Title,
        ProjectField::Link,
        ProjectField::Description,
        ProjectField::Tech,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectField::Title => "Title",
            ProjectField::Link => "Link (GitHub or live URL)",
            ProjectField::Description => "Short description",
            ProjectField::Tech => "Tech stack",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, ProjectField::Description)
    }
}

/// One repeated project sub-form. `link` maps to the document's `url` and
/// `tech` to `tech_stack`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub link: String,
    pub description: String,
    pub tech: String,
}

impl ProjectForm {
    pub fn field(&self, field: ProjectField) -> &str {
        match field {
            ProjectField::Title => &self.title,
            ProjectField::Link => &self.link,
            ProjectField::Description => &self.description,
            ProjectField::Tech => &self.tech,
        }
    }

    pub fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Link => &mut self.link,
            ProjectField::Description => &mut self.description,
            ProjectField::Tech => &mut self.tech,
        }
    }

    /// True when every field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        ProjectField::ALL
            .iter()
            .all(|field| self.field(*field).trim().is_empty())
    }
}

/// Ordered project sub-forms. Items have no identity beyond their position;
/// labels are derived from the position every time they are asked for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectForms {
    items: Vec<ProjectForm>,
}

impl ProjectForms {
    /// Append a sub-form and return its index.
    pub fn push(&mut self, form: ProjectForm) -> usize {
        self.items.push(form);
        self.items.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<ProjectForm> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&ProjectForm> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ProjectForm> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectForm> {
        self.items.iter()
    }

    pub fn label(index: usize) -> String {
        format!("Project #{}", index + 1)
    }
}

impl Index<usize> for ProjectForms {
    type Output = ProjectForm;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl FromIterator<ProjectForm> for ProjectForms {
    fn from_iter<I: IntoIterator<Item = ProjectForm>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ProjectForms {
    type Item = &'a ProjectForm;
    type IntoIter = std::slice::Iter<'a, ProjectForm>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
