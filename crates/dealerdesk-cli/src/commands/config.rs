use anyhow::Result;
use std::path::Path;

use dealerdesk_core::config::DealerDeskConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = DealerDeskConfig::default_path(base_dir);
    let config = DealerDeskConfig::load(&config_path)?;

    println!("Config: {}", config_path.display());
    println!();
    println!("  Default report window: {} days", config.reporting.default_days);
    println!("  Month rollback:        {:?}", config.reporting.month_rollback);
    println!("  Max page size:         {}", config.validation.max_page_size);
    println!("  Min password length:   {}", config.validation.min_password_length);
    println!();

    match config.role_table()? {
        None => println!("  Roles: built-in table"),
        Some(table) => {
            println!("  Roles ({} configured):", table.len());
            for (role, perms) in &table {
                println!("    - {role}: {} permissions", perms.len());
            }
        }
    }

    Ok(())
}
