#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8086";
pub const DEFAULT_COOKIE_NAME: &str = "PRAGA_TOKEN";

/// Fully resolved client settings.
#[derive(Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub cookie_name: String,
    pub session_token: Option<String>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            session_token: None,
            user_agent: format!("praga-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("cookie_name", &self.cookie_name)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ConfigProvider for ClientSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_cookie_name("cookie_name", &self.cookie_name)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        if let Some(token) = &self.session_token {
            validation::validate_non_empty_string("session_token", token)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
