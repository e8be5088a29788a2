use crate::types::Severity;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Finding
// ---------------------------------------------------------------------------

/// One result emitted by a check.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Id of the check that produced this finding.
    pub check: &'static str,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(check: &'static str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
            file: None,
            line: None,
        }
    }

    pub fn in_file(
        check: &'static str,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
            file: Some(file.into()),
            line: None,
        }
    }

    pub fn at_line(
        check: &'static str,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
            file: Some(file.into()),
            line: Some(line),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Accumulated findings from one runner pass.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub root: String,
    pub generated_at: String,
    pub checks_run: usize,
    pub errors: usize,
    pub warnings: usize,
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            checks_run: 0,
            errors: 0,
            warnings: 0,
            findings: Vec::new(),
        }
    }

    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: Vec<Finding>) {
        for f in findings {
            self.push(f);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Aggregate status: 0 when clean or warnings only, 1 on any error.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    pub fn summary_line(&self) -> String {
        if self.findings.is_empty() {
            format!("{} checks passed, no findings", self.checks_run)
        } else {
            format!(
                "{} checks run: {} error(s), {} warning(s)",
                self.checks_run, self.errors, self.warnings
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
