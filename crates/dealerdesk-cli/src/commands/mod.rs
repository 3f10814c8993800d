pub mod config;
pub mod init;
pub mod roles;
pub mod validate;
pub mod window;

use std::path::Path;

use dealerdesk_core::config::DealerDeskConfig;

/// Load `<base_dir>/dealerdesk.toml`, falling back to defaults when it has not been written yet.
pub fn load_config(base_dir: &Path) -> anyhow::Result<DealerDeskConfig> {
    let path = DealerDeskConfig::default_path(base_dir);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(DealerDeskConfig::default());
    }
    Ok(DealerDeskConfig::load(&path)?)
}
