use anyhow::Context;
use preflight_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    println!("Initializing preflight in: {}", root.display());

    let config_path = paths::config_path(root);
    let cfg = Config::new(&project_name);
    let data = serde_yaml::to_string(&cfg).context("failed to render config")?;
    if io::write_if_missing(&config_path, data.as_bytes())
        .context("failed to write .preflight.yaml")?
    {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    println!("\nNext: preflight check");
    Ok(())
}
