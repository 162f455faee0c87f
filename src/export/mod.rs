//! Saving and exporting the document.
//!
//! Handles filename normalization, markdown save, markdown open, and PDF
//! export. All writes go through a temp file in the target directory and a
//! rename, so a failed export never leaves a truncated file behind.

pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Target file name for a markdown save: the working name, given a `.md`
/// suffix if it does not already end in one.
pub fn markdown_target_name(file_name: &str) -> String {
    if file_name.ends_with(".md") {
        file_name.to_string()
    } else {
        format!("{file_name}.md")
    }
}

/// Target file name for a PDF export: the working name with any `.md`
/// suffix removed and `.pdf` appended.
pub fn pdf_target_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    format!("{stem}.pdf")
}

/// Write markdown content to `path` atomically.
pub fn save_markdown(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
        .with_context(|| format!("failed to save {}", path.display()))
}

/// Read a markdown file, returning its content and bare file name.
/// Non-UTF-8 bytes are replaced rather than rejected.
pub fn open_markdown(path: &Path) -> Result<(String, String)> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to open {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    let name = path
        .file_name()
        .map_or_else(|| "untitled.md".to_string(), |n| n.to_string_lossy().to_string());
    Ok((content, name))
}

/// Write bytes to a sibling temp file, then rename over the target.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    fs::write(&tmp, bytes)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| "out".to_string(), |n| n.to_string_lossy().to_string());
    name.push_str(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_name_keeps_md_suffix() {
        assert_eq!(markdown_target_name("notes.md"), "notes.md");
    }

    #[test]
    fn test_markdown_name_appends_md() {
        assert_eq!(markdown_target_name("notes"), "notes.md");
        assert_eq!(markdown_target_name("notes.txt"), "notes.txt.md");
    }

    #[test]
    fn test_pdf_name_strips_md_suffix() {
        assert_eq!(pdf_target_name("notes.md"), "notes.pdf");
    }

    #[test]
    fn test_pdf_name_without_md_suffix() {
        assert_eq!(pdf_target_name("notes"), "notes.pdf");
        assert_eq!(pdf_target_name("report.txt"), "report.txt.pdf");
    }

    #[test]
    fn test_save_and_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        save_markdown(&path, "# Hello\n").unwrap();
        let (content, name) = open_markdown(&path).unwrap();
        assert_eq!(content, "# Hello\n");
        assert_eq!(name, "doc.md");
    }

    #[test]
    fn test_save_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        save_markdown(&path, "old").unwrap();
        save_markdown(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        save_markdown(&path, "content").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec!["doc.md".to_string()]);
    }

    #[test]
    fn test_open_missing_file_errors() {
        let err = open_markdown(Path::new("/nonexistent/doc.md")).unwrap_err();
        assert!(err.to_string().contains("doc.md"));
    }
}
