use crate::config::Config;
use crate::error::{PreflightError, Result};
use crate::paths;
use crate::types::FileKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ---------------------------------------------------------------------------
// SourceFile
// ---------------------------------------------------------------------------

/// One file picked up by the scanner, with its content read once.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Display path relative to the project root, forward slashes.
    pub rel: String,
    pub kind: FileKind,
    /// `None` for unreadable or non-UTF8 files; such files are skipped by
    /// content checks but still count for presence checks.
    pub content: Option<String>,
}

impl SourceFile {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// File name without extension (`AccountHandler.cls` → `AccountHandler`).
    pub fn base_name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// MetadataScan
// ---------------------------------------------------------------------------

/// The scanned metadata tree — shared input for every check.
#[derive(Debug)]
pub struct MetadataScan {
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
    /// Count of files whose content could not be read as UTF-8.
    pub unreadable: usize,
}

impl MetadataScan {
    /// Walk the configured source directory and classify everything found.
    ///
    /// Files are sorted by relative path so check output is deterministic
    /// across platforms and filesystems.
    pub fn scan(root: &Path, config: &Config) -> Result<Self> {
        let src = paths::source_dir(root, &config.source_dir);
        if !src.is_dir() {
            return Err(PreflightError::SourceDirNotFound(
                src.display().to_string(),
            ));
        }

        let mut files = Vec::new();
        let mut unreadable = 0usize;

        let walker = WalkDir::new(&src).into_iter().filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            !(e.file_type().is_dir() && paths::SKIP_DIRS.contains(&name))
        });

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path().to_path_buf();
            let rel = relative_display(root, &path);
            let kind = classify(&path);
            let content = match std::fs::read(&path) {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => Some(text),
                    Err(_) => {
                        unreadable += 1;
                        None
                    }
                },
                Err(_) => {
                    unreadable += 1;
                    None
                }
            };
            files.push(SourceFile {
                path,
                rel,
                kind,
                content,
            });
        }

        files.sort_by(|a, b| a.rel.cmp(&b.rel));

        Ok(Self {
            root: root.to_path_buf(),
            files,
            unreadable,
        })
    }

    pub fn of_kind(&self, kind: FileKind) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    pub fn apex_sources(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.kind.is_apex_source())
    }

    pub fn xml_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.kind.is_xml())
    }
}

fn classify(path: &Path) -> FileKind {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if paths::is_meta_xml(name) {
        return FileKind::MetaXml;
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("cls") => FileKind::ApexClass,
        Some("trigger") => FileKind::ApexTrigger,
        Some("xml") => FileKind::OtherXml,
        _ => FileKind::Other,
    }
}

fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
