use std::{
    fs,
    path::{Path, PathBuf},
};

pub const EXPORT_FILE_NAME: &str = "site-content.json";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Write `json` to `<dir>/site-content.json` and return the written path.
pub fn write_download(dir: &Path, json: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, json).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = json.len(), "wrote site content");
    Ok(path)
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// The desktop clipboard, opened on first use. The handle is kept for the
/// life of the process: on X11 the copied text is only served while it
/// exists. A missing clipboard (e.g. a headless session) fails the copy only.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|err| ExportError::Clipboard(err.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ExportError::Clipboard("not initialised".into()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|err| ExportError::Clipboard(err.to_string()))
    }
}

pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, json: &str) -> Result<(), ExportError> {
    clipboard.set_text(json).inspect_err(|err| {
        tracing::warn!(error = %err, "clipboard copy failed");
    })?;
    tracing::info!(bytes = json.len(), "copied site content to clipboard");
    Ok(())
}

pub fn download_status(result: &Result<PathBuf, ExportError>) -> String {
    match result {
        Ok(path) => format!(
            "Downloaded updated {EXPORT_FILE_NAME} to {}. Replace the file in data/ after backing up the old one.",
            path.display()
        ),
        Err(err) => format!("Could not write {EXPORT_FILE_NAME}: {err}"),
    }
}

pub fn clipboard_status(result: &Result<(), ExportError>) -> String {
    match result {
        Ok(()) => "JSON copied to clipboard.".to_string(),
        Err(_) => "Could not copy to clipboard (clipboard unavailable?).".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
        reject: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
            if self.reject {
                return Err(ExportError::Clipboard("permission denied".into()));
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn download_writes_site_content_json_into_the_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = write_download(dir.path(), "{\n  \"a\": 1\n}");
        let path = result.as_ref().expect("written").clone();

        assert_eq!(path, dir.path().join("site-content.json"));
        assert_eq!(
            fs::read_to_string(&path).expect("read back"),
            "{\n  \"a\": 1\n}"
        );
        assert!(download_status(&result).starts_with("Downloaded updated site-content.json"));
    }

    #[test]
    fn download_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = write_download(&dir.path().join("nope"), "{}");
        assert!(matches!(result, Err(ExportError::Write { .. })));
        assert!(download_status(&result).starts_with("Could not write site-content.json"));
    }

    #[test]
    fn clipboard_receives_the_same_text() {
        let mut clipboard = MemoryClipboard::default();
        let result = copy_to_clipboard(&mut clipboard, "{}");
        assert!(result.is_ok());
        assert_eq!(clipboard.contents.as_deref(), Some("{}"));
        assert_eq!(clipboard_status(&result), "JSON copied to clipboard.");
    }

    #[test]
    fn rejected_clipboard_reports_a_status() {
        let mut clipboard = MemoryClipboard {
            reject: true,
            ..MemoryClipboard::default()
        };
        let result = copy_to_clipboard(&mut clipboard, "{}");
        assert!(result.is_err());
        assert_eq!(clipboard.contents, None);
        assert_eq!(
            clipboard_status(&result),
            "Could not copy to clipboard (clipboard unavailable?)."
        );
    }
}
