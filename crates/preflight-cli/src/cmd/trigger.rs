use crate::output::print_json;
use anyhow::Context;
use preflight_core::trigger;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let analysis = trigger::analyze_file(file)
        .with_context(|| format!("failed to analyze {}", file.display()))?;

    if json {
        print_json(&analysis)?;
        return Ok(());
    }

    println!("Trigger:     {}", analysis.name);
    println!("Complexity:  {}/10", analysis.complexity);
    println!("Approach:    {}", analysis.recommended_approach);
    println!();

    if analysis.dml_in_loops.is_empty() {
        println!("DML in loops:  none");
    } else {
        println!("DML in loops:");
        for issue in &analysis.dml_in_loops {
            println!(
                "  line {}: {} (loop at line {})",
                issue.line, issue.code, issue.loop_start
            );
        }
    }

    if analysis.soql_in_loops.is_empty() {
        println!("SOQL in loops: none");
    } else {
        println!("SOQL in loops:");
        for issue in &analysis.soql_in_loops {
            println!(
                "  line {}: {} (loop at line {})",
                issue.line, issue.code, issue.loop_start
            );
        }
    }

    if !analysis.bulk_recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &analysis.bulk_recommendations {
            let lines: Vec<String> = rec.affected_lines.iter().map(|l| l.to_string()).collect();
            println!("  - {} (lines: {})", rec.message, lines.join(", "));
        }
    }

    Ok(())
}
