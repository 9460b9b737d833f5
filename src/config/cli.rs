use crate::config::toml_config::TomlConfig;
use crate::config::ClientSettings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "praga")]
#[command(about = "Client for the praga email-code login API", version)]
pub struct CliConfig {
    #[arg(long, env = "PRAGA_CONFIG", help = "TOML file with a [client] table")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "PRAGA_BASE_URL", help = "Origin serving /api (default http://localhost:8086)")]
    pub base_url: Option<String>,

    #[arg(long, env = "PRAGA_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    #[arg(long, env = "PRAGA_COOKIE_NAME")]
    pub cookie_name: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch and print the login page configuration
    Config,
    /// Check whether the session cookie is accepted
    VerifyToken,
    /// Email code operations
    Email {
        #[command(subcommand)]
        action: EmailCommand,
    },
    /// Request a code, then verify it (read from stdin unless --code is given)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EmailCommand {
    /// Ask the backend to email a login code
    Send {
        #[arg(long)]
        email: String,
    },
    /// Submit a code received by email
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
}

impl CliConfig {
    /// Defaults, then the config file, then flags and environment.
    pub fn settings(&self) -> Result<ClientSettings> {
        let mut settings = ClientSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(cookie_name) = &self.cookie_name {
            settings.cookie_name = cookie_name.clone();
        }
        if let Some(token) = &self.session_token {
            settings.session_token = Some(token.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent = user_agent.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}
