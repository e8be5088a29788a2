use crate::output::{print_json, print_table};
use anyhow::Context;
use preflight_core::{
    checks::default_checks,
    config::Config,
    finding::Finding,
    runner::{CheckContext, Runner},
    scan::MetadataScan,
};
use std::path::Path;

pub fn run(root: &Path, list: bool, json: bool) -> anyhow::Result<()> {
    if list {
        return list_checks(json);
    }

    let config = Config::load_or_default(root).context("failed to load config")?;
    let scan = MetadataScan::scan(root, &config).context("failed to scan metadata tree")?;
    tracing::debug!(files = scan.files.len(), "scanned tree");

    let ctx = CheckContext {
        scan: &scan,
        config: &config,
        root,
    };
    let report = Runner::new(default_checks()).run(&ctx);

    if json {
        print_json(&report)?;
    } else {
        for finding in &report.findings {
            println!("{}", render(finding));
        }
        if !report.findings.is_empty() {
            println!();
        }
        println!("{}", report.summary_line());
    }

    if report.has_errors() {
        anyhow::bail!(
            "validation found {} error(s)",
            report.errors
        );
    }
    Ok(())
}

fn render(finding: &Finding) -> String {
    let location = match (&finding.file, finding.line) {
        (Some(file), Some(line)) => format!(" {file}:{line}:"),
        (Some(file), None) => format!(" {file}:"),
        _ => String::new(),
    };
    format!(
        "{}[{}]{} {}",
        finding.severity, finding.check, location, finding.message
    )
}

fn list_checks(json: bool) -> anyhow::Result<()> {
    let checks = default_checks();

    if json {
        let value: Vec<_> = checks
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "severity": c.default_severity,
                    "description": c.description,
                })
            })
            .collect();
        print_json(&value)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = checks
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.default_severity.to_string(),
                c.description.to_string(),
            ]
        })
        .collect();
    print_table(&["CHECK", "SEVERITY", "DESCRIPTION"], rows);
    Ok(())
}
