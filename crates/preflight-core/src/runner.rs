use crate::config::Config;
use crate::finding::{Finding, Report};
use crate::scan::MetadataScan;
use crate::types::Severity;
use std::path::Path;

// ---------------------------------------------------------------------------
// CheckContext
// ---------------------------------------------------------------------------

pub struct CheckContext<'a> {
    pub scan: &'a MetadataScan,
    pub config: &'a Config,
    pub root: &'a Path,
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// A fn-pointer check — the registry is a plain static list, no heap
/// allocation and no trait objects.
pub struct Check {
    pub id: &'static str,
    pub description: &'static str,
    pub default_severity: Severity,
    pub run: fn(&CheckContext) -> Vec<Finding>,
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

pub struct Runner {
    checks: Vec<Check>,
}

impl Runner {
    pub fn new(checks: Vec<Check>) -> Self {
        Self { checks }
    }

    /// Evaluate every enabled check, in registry order. Checks are
    /// independent: one check's findings never suppress another's.
    pub fn run(&self, ctx: &CheckContext) -> Report {
        let mut report = Report::new(ctx.root.display().to_string());

        for check in &self.checks {
            if ctx.config.checks.is_disabled(check.id) {
                tracing::debug!(check = check.id, "disabled by config");
                continue;
            }
            let severity = ctx
                .config
                .checks
                .severity_for(check.id, check.default_severity);

            let mut findings = (check.run)(ctx);
            for f in &mut findings {
                f.severity = severity;
            }
            tracing::debug!(check = check.id, findings = findings.len(), "check ran");
            report.checks_run += 1;
            report.extend(findings);
        }

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
