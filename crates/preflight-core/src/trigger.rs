use crate::error::{PreflightError, Result};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static FOR_LOOP_RE: OnceLock<Regex> = OnceLock::new();
static DML_RE: OnceLock<Regex> = OnceLock::new();
static SOQL_RE: OnceLock<Regex> = OnceLock::new();
static CONTEXT_RE: OnceLock<Regex> = OnceLock::new();

fn for_loop_re() -> &'static Regex {
    FOR_LOOP_RE.get_or_init(|| Regex::new(r"\bfor\s*\(").unwrap())
}

fn dml_re() -> &'static Regex {
    DML_RE.get_or_init(|| Regex::new(r"\b(?:insert|update|delete|undelete|upsert)\s+").unwrap())
}

fn soql_re() -> &'static Regex {
    SOQL_RE.get_or_init(|| Regex::new(r"(?i)\[SELECT\s+").unwrap())
}

fn context_re() -> &'static Regex {
    CONTEXT_RE.get_or_init(|| Regex::new(r"Trigger\.(?:isBefore|isAfter)").unwrap())
}

// ---------------------------------------------------------------------------
// Analysis model
// ---------------------------------------------------------------------------

/// A statement flagged inside a loop body.
#[derive(Debug, Clone, Serialize)]
pub struct LoopIssue {
    pub line: usize,
    pub code: String,
    pub loop_start: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkRecommendation {
    pub message: String,
    pub affected_lines: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerAnalysis {
    pub name: String,
    pub dml_in_loops: Vec<LoopIssue>,
    pub soql_in_loops: Vec<LoopIssue>,
    pub bulk_recommendations: Vec<BulkRecommendation>,
    /// 1–10, capped.
    pub complexity: u8,
    pub recommended_approach: &'static str,
}

impl TriggerAnalysis {
    /// Analyze a trigger body for the classic anti-patterns: DML and SOQL
    /// inside loops, plus an overall complexity estimate.
    ///
    /// Loop tracking is a line heuristic: a `for (` opens a loop, a lone `}`
    /// closes it. Nested loops collapse to the innermost open one, which is
    /// enough to attribute statements to "a loop" for reporting.
    pub fn analyze(name: impl Into<String>, body: &str) -> Self {
        let mut dml_in_loops = Vec::new();
        let mut soql_in_loops = Vec::new();

        let mut in_loop = false;
        let mut loop_start = 0usize;

        for (idx, line) in body.lines().enumerate() {
            let lineno = idx + 1;
            if for_loop_re().is_match(line) {
                in_loop = true;
                loop_start = lineno;
            }
            if in_loop && line.trim() == "}" {
                in_loop = false;
            }
            if in_loop {
                if dml_re().is_match(line) {
                    dml_in_loops.push(LoopIssue {
                        line: lineno,
                        code: line.trim().to_string(),
                        loop_start,
                    });
                }
                if soql_re().is_match(line) {
                    soql_in_loops.push(LoopIssue {
                        line: lineno,
                        code: line.trim().to_string(),
                        loop_start,
                    });
                }
            }
        }

        let mut bulk_recommendations = Vec::new();
        if !dml_in_loops.is_empty() {
            bulk_recommendations.push(BulkRecommendation {
                message: "DML operations should be collected and executed outside loops"
                    .to_string(),
                affected_lines: dml_in_loops.iter().map(|i| i.line).collect(),
            });
        }
        if !soql_in_loops.is_empty() {
            bulk_recommendations.push(BulkRecommendation {
                message: "SOQL queries should be moved outside loops or use Maps for lookups"
                    .to_string(),
                affected_lines: soql_in_loops.iter().map(|i| i.line).collect(),
            });
        }

        let complexity = complexity_score(
            body,
            dml_in_loops.len(),
            soql_in_loops.len(),
            bulk_recommendations.len(),
        );

        Self {
            name: name.into(),
            dml_in_loops,
            soql_in_loops,
            bulk_recommendations,
            complexity,
            recommended_approach: recommend(complexity),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.dml_in_loops.is_empty() && self.soql_in_loops.is_empty()
    }
}

fn complexity_score(body: &str, dml: usize, soql: usize, bulk: usize) -> u8 {
    let mut score = 1usize;
    score += dml * 2;
    score += soql * 2;
    score += bulk;

    score += context_re().find_iter(body).count();

    let loc = body.lines().filter(|l| !l.trim().is_empty()).count();
    score += (loc / 10).min(3);

    score.min(10) as u8
}

fn recommend(complexity: u8) -> &'static str {
    match complexity {
        0..=3 => "Simple handler class with separate methods for each trigger context",
        4..=6 => "Handler class with bulkified collections and helper methods",
        _ => "Unified handler framework with separate concern classes (validation, DML, etc.)",
    }
}

/// Analyze a `.trigger` file from disk.
pub fn analyze_file(path: &Path) -> Result<TriggerAnalysis> {
    if path.extension().and_then(|e| e.to_str()) != Some("trigger") {
        return Err(PreflightError::NotATrigger(path.display().to_string()));
    }
    let body = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("trigger")
        .to_string();
    Ok(TriggerAnalysis::analyze(name, &body))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
