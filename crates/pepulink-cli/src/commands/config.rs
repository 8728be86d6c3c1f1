//! Configuration command

use std::path::Path;

use anyhow::Result;
use pepulink_core::config::{default_config_path, CONFIG_ENV_VAR};

use super::load_config;

pub fn cmd_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;

    println!("⚙️  Configuration");
    println!("   Source: {}", config_source(path));
    if let Some(default_path) = default_config_path() {
        println!("   Override location: {}", default_path.display());
    }
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}

/// Describe which layer the effective config comes from
pub fn config_source(path: Option<&Path>) -> String {
    if let Some(p) = path {
        return p.display().to_string();
    }
    if let Some(env) = std::env::var_os(CONFIG_ENV_VAR) {
        return format!("{} ({})", Path::new(&env).display(), CONFIG_ENV_VAR);
    }
    match default_config_path().filter(|p| p.exists()) {
        Some(p) => p.display().to_string(),
        None => "embedded defaults".to_string(),
    }
}
