use anyhow::Result;
use std::path::Path;

use dealerdesk_core::config::DealerDeskConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    println!("Initializing DealerDesk in {}", base_dir.display());

    std::fs::create_dir_all(base_dir)?;

    let config_path = DealerDeskConfig::default_path(base_dir);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
    } else {
        DealerDeskConfig::default().save(&config_path)?;
        println!("Created config: {}", config_path.display());
    }

    println!("\nNext steps:");
    println!("  1. Add a [roles] table to {} to override the built-in roles", config_path.display());
    println!("  2. Run `dealerdesk roles` to review the effective permission table");

    Ok(())
}
