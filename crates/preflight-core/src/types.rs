use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = crate::error::PreflightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(crate::error::PreflightError::InvalidSeverity(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FileKind
// ---------------------------------------------------------------------------

/// Classification of a file found in the metadata tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Apex class source (`.cls`)
    ApexClass,
    /// Apex trigger source (`.trigger`)
    ApexTrigger,
    /// Metadata descriptor companion (`*-meta.xml`)
    MetaXml,
    /// Any other XML descriptor (objects, layouts, profiles, …)
    OtherXml,
    /// Anything else the scanner picked up
    Other,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::ApexClass => "apex_class",
            FileKind::ApexTrigger => "apex_trigger",
            FileKind::MetaXml => "meta_xml",
            FileKind::OtherXml => "other_xml",
            FileKind::Other => "other",
        }
    }

    pub fn is_apex_source(self) -> bool {
        matches!(self, FileKind::ApexClass | FileKind::ApexTrigger)
    }

    pub fn is_xml(self) -> bool {
        matches!(self, FileKind::MetaXml | FileKind::OtherXml)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
