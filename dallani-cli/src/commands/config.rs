use anyhow::{Context, Result, bail};
use shared::config::ClientConfig;
use std::path::Path;

/// Writes the default configuration to `output`.
///
/// # Arguments
/// * `output` - Target file; `.yaml`, `.yml`, `.json` or `.toml`
///
/// # Errors
/// Returns an error if the file already exists, the extension is unsupported
/// or writing fails.
pub fn generate_config(output: &Path) -> Result<()> {
    if output.exists() {
        bail!("{} already exists", output.display());
    }
    ClientConfig::with_defaults()
        .write_to(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Configuration file '{}' generated successfully.", output.display());
    Ok(())
}
