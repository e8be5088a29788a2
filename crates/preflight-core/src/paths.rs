use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".preflight.yaml";
pub const SFDX_PROJECT_FILE: &str = "sfdx-project.json";

pub const DEFAULT_SOURCE_DIR: &str = "force-app";
pub const DEFAULT_MANIFEST: &str = "manifest/package.xml";

/// Directories the scanner never descends into.
pub const SKIP_DIRS: &[&str] = &[".git", ".sfdx", ".vscode", "node_modules", "target"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn source_dir(root: &Path, configured: &str) -> PathBuf {
    root.join(configured)
}

pub fn manifest_path(root: &Path, configured: &str) -> PathBuf {
    root.join(configured)
}

/// True if the file name belongs to a metadata descriptor companion
/// (e.g. `AccountHandler.cls-meta.xml`).
pub fn is_meta_xml(name: &str) -> bool {
    name.ends_with("-meta.xml")
}

/// The `-meta.xml` companion expected for a source file.
pub fn expected_meta_path(source: &Path) -> Option<PathBuf> {
    let name = source.file_name()?.to_str()?;
    Some(source.with_file_name(format!("{name}-meta.xml")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
