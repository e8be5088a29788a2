use crate::output::{print_json, print_table};
use anyhow::Context;
use preflight_core::{config::Config, manifest::Manifest, paths};
use std::path::Path;

pub fn run(root: &Path, path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let manifest_path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let config = Config::load_or_default(root).context("failed to load config")?;
            paths::manifest_path(root, &config.manifest)
        }
    };

    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("failed to load {}", manifest_path.display()))?;

    if json {
        print_json(&manifest)?;
        return Ok(());
    }

    println!("Manifest:   {}", manifest_path.display());
    println!(
        "Version:    {}",
        manifest.version.as_deref().unwrap_or("(missing)")
    );
    println!("Components: {}\n", manifest.component_count());

    let rows: Vec<Vec<String>> = manifest
        .types
        .iter()
        .map(|t| {
            vec![
                t.name.clone().unwrap_or_else(|| "(unnamed)".to_string()),
                t.members.len().to_string(),
                t.members.join(", "),
            ]
        })
        .collect();
    print_table(&["TYPE", "COUNT", "MEMBERS"], rows);
    Ok(())
}
