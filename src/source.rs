use std::{fmt, fs, path::PathBuf};

use reqwest::header::{CACHE_CONTROL, HeaderValue};

use crate::content::{ContentDocument, ContentError};

pub const DEFAULT_LOCATION: &str = "data/site-content.json";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error(transparent)]
    Parse(#[from] ContentError),
}

/// Where the site content document is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
}

impl DocumentSource {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DocumentSource::Url(location.to_string())
        } else {
            DocumentSource::File(PathBuf::from(location))
        }
    }
}

impl Default for DocumentSource {
    fn default() -> Self {
        DocumentSource::parse(DEFAULT_LOCATION)
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => f.write_str(url),
        }
    }
}

/// Read and parse the document once. URLs are fetched with the cache
/// bypassed; a non-success status is an error.
pub fn load_document(source: &DocumentSource) -> Result<ContentDocument, LoadError> {
    let body = match source {
        DocumentSource::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?,
        DocumentSource::Url(url) => fetch(url)?,
    };
    let document = ContentDocument::from_json_str(&body)?;
    tracing::info!(%source, bytes = body.len(), "read site content");
    Ok(document)
}

fn fetch(url: &str) -> Result<String, LoadError> {
    let request_error = |source| LoadError::Request {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::Client::new()
        .get(url)
        .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
        .send()
        .map_err(request_error)?;
    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    response.text().map_err(request_error)
}

/// Status line text for the outcome of a load.
pub fn load_status(source: &DocumentSource, result: &Result<ContentDocument, LoadError>) -> String {
    match result {
        Ok(_) => format!("Loaded data from {source}"),
        Err(_) => format!("Error loading JSON. Check that {source} exists and is valid."),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_distinguishes_urls_from_paths() {
        assert_eq!(
            DocumentSource::parse("https://example.com/data/site-content.json"),
            DocumentSource::Url("https://example.com/data/site-content.json".into())
        );
        assert_eq!(
            DocumentSource::parse("data/site-content.json"),
            DocumentSource::File(PathBuf::from("data/site-content.json"))
        );
        assert_eq!(DocumentSource::default().to_string(), DEFAULT_LOCATION);
    }

    #[test]
    fn loads_a_document_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "sidebar": {{ "name": "Ada" }} }}"#).expect("write");

        let source = DocumentSource::File(file.path().to_path_buf());
        let result = load_document(&source);
        assert_eq!(
            result.as_ref().map(|doc| doc.text_at("sidebar.name")).ok(),
            Some("Ada".to_string())
        );
        assert!(load_status(&source, &result).starts_with("Loaded data from "));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = DocumentSource::File(dir.path().join("absent.json"));
        let result = load_document(&source);
        assert!(matches!(result, Err(LoadError::Read { .. })));
        assert_eq!(
            load_status(&source, &result),
            format!("Error loading JSON. Check that {source} exists and is valid.")
        );
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ truncated").expect("write");
        let result = load_document(&DocumentSource::File(file.path().to_path_buf()));
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
