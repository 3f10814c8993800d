use crate::error::{CoreError, Result};
use crate::types::Role;
use crate::window::MonthRollback;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level DealerDesk configuration stored as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealerDeskConfig {
    #[serde(default)]
    pub reporting: ReportingSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    /// Role → permission table keyed by wire name. Replaces the built-in table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingSettings {
    /// Window used when a report request carries neither `days` nor `months`.
    #[serde(default = "default_days")]
    pub default_days: u32,
    /// How `months` offsets treat a day-of-month missing from the target month.
    #[serde(default)]
    pub month_rollback: MonthRollback,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            default_days: default_days(),
            month_rollback: MonthRollback::default(),
        }
    }
}

fn default_days() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Upper bound for the `limit` pagination parameter.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_page_size: default_max_page_size(),
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_max_page_size() -> i64 {
    100
}

fn default_min_password_length() -> usize {
    6
}

impl DealerDeskConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| CoreError::TomlDe(e.to_string()))?;
        config.check()?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check(&self) -> Result<()> {
        if self.validation.max_page_size < 1 {
            return Err(CoreError::Config(
                "validation.max_page_size must be at least 1".to_string(),
            ));
        }
        if self.validation.min_password_length == 0 {
            return Err(CoreError::Config(
                "validation.min_password_length must be at least 1".to_string(),
            ));
        }
        self.role_table()?;
        Ok(())
    }

    /// Typed view of the `[roles]` table. Fails on a role name outside [`Role::ALL`].
    pub fn role_table(&self) -> Result<Option<BTreeMap<Role, Vec<String>>>> {
        let Some(roles) = &self.roles else {
            return Ok(None);
        };
        let mut table = BTreeMap::new();
        for (name, permissions) in roles {
            let role: Role = name.parse()?;
            table.insert(role, permissions.clone());
        }
        Ok(Some(table))
    }

    /// Resolve the config file path: `<base_dir>/dealerdesk.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("dealerdesk.toml")
    }

    /// Resolve the default home directory: `~/.dealerdesk`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".dealerdesk"))
            .ok_or_else(|| CoreError::Config("Cannot determine home directory".to_string()))
    }
}
