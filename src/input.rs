//! Extracted documents as handed over by the PDF extraction step.

use crate::{DocumentMeta, Result, SegmentError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A document whose text and table of contents were already extracted.
///
/// ```json
/// {
///   "title": "Jahresbericht 2023",
///   "toc": ["Deckblatt", "Inhalt", "1 Einleitung", "2 Ergebnisse"],
///   "pages": ["...", "..."]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub title: String,
    /// Document identifier; the file name when absent.
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Table of contents, in reading order.
    #[serde(default)]
    pub toc: Vec<String>,
    /// Page texts, first page first.
    #[serde(default)]
    pub pages: Vec<String>,
}

impl DocumentInput {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SegmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut input: DocumentInput =
            serde_json::from_str(&raw).map_err(|source| SegmentError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        if input.topic.is_none() {
            input.topic = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
        }
        Ok(input)
    }

    /// Metadata for the records, falling back to `default_language`.
    pub fn meta(&self, default_language: &str) -> DocumentMeta {
        DocumentMeta::new(
            self.title.clone(),
            self.topic.clone().unwrap_or_default(),
            self.language
                .clone()
                .unwrap_or_else(|| default_language.to_owned()),
        )
    }
}

/// Expands `paths` into the list of document files: files are taken as
/// given, directories are walked recursively for `*.json` files in sorted
/// order.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let io_err = |source| SegmentError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_err)?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_topic_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bericht.json");
        fs::write(
            &path,
            r#"{"title": "Bericht", "toc": ["Intro"], "pages": ["Intro text"]}"#,
        )
        .unwrap();

        let input = DocumentInput::load(&path).unwrap();
        assert_eq!(input.topic.as_deref(), Some("bericht.json"));
        let meta = input.meta("de");
        assert_eq!(meta.language, "de");
        assert_eq!(meta.title, "Bericht");
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            DocumentInput::load(&missing),
            Err(SegmentError::Io { path, .. }) if path == missing
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        assert!(matches!(
            DocumentInput::load(&broken),
            Err(SegmentError::Json { .. })
        ));
    }

    #[test]
    fn test_discover_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("b");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(nested.join("c.json"), "{}").unwrap();

        let files = discover(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "c.json"]);
    }
}
