use anyhow::{Result, bail};

use visdiff::config;

/// `visdiff init` — write the starter config template.
pub fn init(force: bool) -> Result<()> {
    if config::config_file_exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config::default_path().display()
        );
    }
    config::write_template()?;
    println!("Wrote {}", config::default_path().display());
    Ok(())
}
