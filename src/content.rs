use serde_json::{Map, Value};

mod lenient;
mod model;

pub use model::{
    Avatar, BlurbSection, ContactSection, Footer, ListSection, NavLink, Project, ProfileKind,
    ProfileLink, ProjectsSection, Sections, Sidebar, SidebarNav, SiteContent, SummarySection,
    Topbar,
};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("invalid site content JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The site content document: a JSON tree with the `sidebar`, `topbar`,
/// `sections` and `footer` regions. Every region is optional and reads never
/// fail on missing or mistyped data.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentDocument {
    root: Value,
}

impl Default for ContentDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl ContentDocument {
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(input: &str) -> Result<Self, ContentError> {
        let root = serde_json::from_str(input)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Produce an independent copy. `Value` owns all of its children, so the
    /// clone shares no mutable state with `self`.
    pub fn deep_clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }

    /// Resolve a dotted path such as `sections.summary.paragraphs`.
    ///
    /// Returns `None` when a segment is missing, when an intermediate value is
    /// `null` or a scalar, or when the final value is `null`. Numeric segments
    /// index into arrays.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if current.is_null() { None } else { Some(current) }
    }

    pub fn get_or<'a>(&'a self, path: &str, fallback: &'a Value) -> &'a Value {
        self.lookup(path).unwrap_or(fallback)
    }

    pub fn text_at(&self, path: &str) -> String {
        self.lookup(path).map(scalar_text).unwrap_or_default()
    }

    pub fn lines_at(&self, path: &str) -> Vec<String> {
        self.items_at(path).iter().map(scalar_text).collect()
    }

    pub fn items_at(&self, path: &str) -> &[Value] {
        match self.lookup(path) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Walk to the object at `path`, creating every missing segment. Segments
    /// holding anything other than an object are replaced by an empty object.
    pub fn object_at_mut(&mut self, path: &str) -> &mut Map<String, Value> {
        let mut current = &mut self.root;
        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            let map = ensure_object(current);
            current = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        ensure_object(current)
    }

    pub fn site(&self) -> SiteContent {
        SiteContent::from_value(&self.root)
    }

    pub fn to_pretty_json(&self) -> String {
        // Serializing a `Value` cannot fail: every map key is a string.
        serde_json::to_string_pretty(&self.root).unwrap_or_default()
    }
}

/// Text shown for a scalar JSON value. Strings pass through, numbers and
/// booleans are stringified, everything else reads as empty.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

pub(crate) fn ensure_array<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Vec<Value> {
    let slot = map.entry(key.to_string()).or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just replaced with an array"),
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod content_tests;
