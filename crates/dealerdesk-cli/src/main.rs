mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dealerdesk")]
#[command(about = "Inspect DealerDesk roles, reporting windows and request rules")]
#[command(version)]
struct Cli {
    /// Path to the DealerDesk config directory (default: ~/.dealerdesk)
    #[arg(long, global = true, env = "DEALERDESK_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Show current configuration
    Config,

    /// List roles and how many permissions each holds
    Roles,

    /// List the permissions of a role
    Permissions {
        /// Role name (admin, distributor, dealer, sales, exportTeam)
        role: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a role holds a permission (exit code 1 when it does not)
    Check {
        role: String,
        permission: String,
    },

    /// Compute a reporting window ending now
    Window {
        /// Offset in days
        #[arg(long, conflicts_with = "months")]
        days: Option<String>,
        /// Offset in calendar months
        #[arg(long)]
        months: Option<String>,
        /// Use this RFC 3339 instant instead of the wall clock
        #[arg(long)]
        at: Option<String>,
    },

    /// Format a calendar period as YYYY-MM and show its bounds
    Period {
        #[arg(allow_negative_numbers = true)]
        year: String,
        #[arg(allow_negative_numbers = true)]
        month: String,
    },

    /// Validate a JSON request body against an endpoint rule set
    Validate {
        /// Rule set name (login, register, change-password, list-query, id-param, create-order, create-claim)
        ruleset: String,
        /// JSON object to validate
        body: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dealerdesk=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => dealerdesk_core::config::DealerDeskConfig::default_base_dir()?,
    };

    match cli.command {
        Commands::Init => commands::init::run(&base_dir),
        Commands::Config => commands::config::run(&base_dir),
        Commands::Roles => commands::roles::list(&base_dir),
        Commands::Permissions { ref role, json } => commands::roles::permissions(&base_dir, role, json),
        Commands::Check {
            ref role,
            ref permission,
        } => commands::roles::check(&base_dir, role, permission),
        Commands::Window {
            ref days,
            ref months,
            ref at,
        } => commands::window::run(&base_dir, days.as_deref(), months.as_deref(), at.as_deref()),
        Commands::Period {
            ref year,
            ref month,
        } => commands::window::period(year, month),
        Commands::Validate {
            ref ruleset,
            ref body,
        } => commands::validate::run(&base_dir, ruleset, body),
    }
}
