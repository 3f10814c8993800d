use anyhow::{Context, Result, bail};
use std::path::Path;

use dealerdesk_core::validation::endpoints;

use super::load_config;

pub fn run(base_dir: &Path, ruleset: &str, body: &str) -> Result<()> {
    let config = load_config(base_dir)?;
    let Some(rules) = endpoints::by_name(ruleset, &config.validation) else {
        bail!(
            "unknown rule set: {ruleset} (expected one of: {})",
            endpoints::NAMES.join(", ")
        );
    };
    let input: serde_json::Value =
        serde_json::from_str(body).context("request body is not valid JSON")?;

    match rules.validate(&input) {
        Ok(clean) => {
            println!("{}", serde_json::to_string_pretty(&clean)?);
            Ok(())
        }
        Err(errors) => {
            for e in errors.iter() {
                println!("  {}: {}", e.field, e.message);
            }
            bail!("{} rule(s) failed", errors.len());
        }
    }
}
