mod collect;
mod form;
mod populate;
mod profiles;
pub mod text;

pub use collect::collect;
pub use form::{FieldId, FormFields, ProjectField, ProjectForm, ProjectForms};
pub use populate::populate;

use crate::content::ContentDocument;

#[derive(Debug, Default)]
pub struct EditorSession {
    loaded: Option<ContentDocument>,
    current: Option<ContentDocument>,
    fields: FormFields,
    source: Option<String>,
}

impl EditorSession {
    /// Create a session with nothing loaded. Collecting from it starts from
    /// an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: ContentDocument, source: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.load(document, source);
        session
    }

    /// Keep two independent copies of `document` (the loaded reference and
    /// the working copy) and populate the form from it.
    pub fn load(&mut self, document: ContentDocument, source: impl Into<String>) {
        self.fields = populate(&document);
        self.current = Some(document.deep_clone());
        self.loaded = Some(document);
        self.source = Some(source.into());
        tracing::info!(
            source = self.source.as_deref().unwrap_or_default(),
            projects = self.fields.projects.len(),
            "loaded site content"
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn loaded(&self) -> Option<&ContentDocument> {
        self.loaded.as_ref()
    }

    pub fn current(&self) -> Option<&ContentDocument> {
        self.current.as_ref()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Collect the form into the working copy and return it.
    pub fn collect(&mut self) -> &ContentDocument {
        let updated = self.preview();
        self.current.insert(updated)
    }

    /// What a collect would produce, without touching the working copy.
    pub fn preview(&self) -> ContentDocument {
        match &self.current {
            Some(current) => collect(&self.fields, current),
            None => collect(&self.fields, &ContentDocument::empty()),
        }
    }

    /// Collect, then serialize the working copy as 2-space indented JSON.
    pub fn export_json(&mut self) -> String {
        self.collect().to_pretty_json()
    }

    /// Whether collecting the form would produce a different document than
    /// collecting the untouched form of the loaded one. Edits the export
    /// cannot see, such as blank project sub-forms or trailing whitespace,
    /// do not count.
    pub fn has_changes(&self) -> bool {
        let baseline = match &self.loaded {
            Some(loaded) => collect(&populate(loaded), loaded),
            None => collect(&FormFields::default(), &ContentDocument::empty()),
        };
        self.preview() != baseline
    }

    /// Discard edits: repopulate from the loaded document and reset the
    /// working copy to it.
    pub fn revert(&mut self) {
        if let Some(loaded) = &self.loaded {
            self.fields = populate(loaded);
            self.current = Some(loaded.deep_clone());
        }
    }

    /// Append an empty project sub-form and return its index.
    pub fn add_project(&mut self) -> usize {
        self.fields.projects.push(ProjectForm::default())
    }

    pub fn remove_project(&mut self, index: usize) -> Option<ProjectForm> {
        self.fields.projects.remove(index)
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod editor_tests;
