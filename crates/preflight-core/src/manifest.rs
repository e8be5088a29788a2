use crate::error::{PreflightError, Result};
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Manifest model
// ---------------------------------------------------------------------------

/// One `<types>` block from a package manifest.
#[derive(Debug, Clone, Serialize)]
pub struct TypeEntry {
    /// `<name>` child; `None` when the block is malformed.
    pub name: Option<String>,
    pub members: Vec<String>,
}

/// Parsed `package.xml`.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub version: Option<String>,
    pub types: Vec<TypeEntry>,
}

impl Manifest {
    /// Parse manifest XML. The model is tolerant of missing `<name>` and
    /// `<version>` elements so the manifest check can report each gap as its
    /// own finding; only malformed XML is a hard parse failure.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let doc = roxmltree::Document::parse(text).map_err(|e| e.to_string())?;
        let pkg = doc.root_element();

        let mut version = None;
        let mut types = Vec::new();

        for node in pkg.children().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "version" => {
                    version = node.text().map(|t| t.trim().to_string());
                }
                "types" => {
                    let mut name = None;
                    let mut members = Vec::new();
                    for child in node.children().filter(|n| n.is_element()) {
                        match child.tag_name().name() {
                            "name" => {
                                name = child.text().map(|t| t.trim().to_string());
                            }
                            "members" => {
                                if let Some(t) = child.text() {
                                    members.push(t.trim().to_string());
                                }
                            }
                            _ => {}
                        }
                    }
                    types.push(TypeEntry { name, members });
                }
                _ => {}
            }
        }

        Ok(Self { version, types })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PreflightError::ManifestNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text).map_err(|reason| PreflightError::ManifestParse {
            path: path.display().to_string(),
            reason,
        })
    }

    /// Total members across all types, wildcard entries included.
    pub fn component_count(&self) -> usize {
        self.types.iter().map(|t| t.members.len()).sum()
    }

    /// Parsed `<version>` as a number, when present and numeric.
    pub fn api_version(&self) -> Option<f64> {
        self.version.as_deref().and_then(|v| v.parse().ok())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
