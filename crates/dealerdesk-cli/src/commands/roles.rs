use anyhow::{Result, bail};
use std::path::Path;

use dealerdesk_auth::PermissionCatalog;
use dealerdesk_auth::Role;

use super::load_config;

fn catalog(base_dir: &Path) -> Result<PermissionCatalog> {
    let config = load_config(base_dir)?;
    Ok(PermissionCatalog::from_config(&config)?)
}

pub fn list(base_dir: &Path) -> Result<()> {
    let catalog = catalog(base_dir)?;
    println!("{:<14} PERMISSIONS", "ROLE");
    for (role, perms) in catalog.roles() {
        println!("{:<14} {}", role.as_str(), perms.len());
    }
    Ok(())
}

pub fn permissions(base_dir: &Path, role: &str, json: bool) -> Result<()> {
    let Some(role) = Role::from_name(role) else {
        bail!("unknown role: {role} (expected one of: {})", role_names());
    };
    let described = catalog(base_dir)?.describe_role(role);

    if json {
        println!("{}", serde_json::to_string_pretty(&described)?);
        return Ok(());
    }

    if described.permissions.is_empty() {
        println!("{role} has no permissions.");
        return Ok(());
    }
    for entry in &described.permissions {
        match &entry.description {
            Some(desc) => println!("  {:<18} {desc}", entry.permission),
            None => println!("  {}", entry.permission),
        }
    }
    Ok(())
}

pub fn check(base_dir: &Path, role: &str, permission: &str) -> Result<()> {
    let catalog = catalog(base_dir)?;
    if catalog.has_permission(role, permission) {
        println!("yes: {role} holds {permission}");
        Ok(())
    } else {
        let holders: Vec<&str> = catalog
            .roles_with(permission)
            .into_iter()
            .map(|r| r.as_str())
            .collect();
        if holders.is_empty() {
            bail!("no: {role} does not hold {permission} (no role does)");
        }
        bail!("no: {role} does not hold {permission} (held by: {})", holders.join(", "));
    }
}

fn role_names() -> String {
    Role::ALL
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
