use crate::config::ClientSettings;
use crate::utils::error::{ClientError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub client: Option<ClientSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    pub base_url: Option<String>,
    pub cookie_name: Option<String>,
    pub session_token: Option<String>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRAGA_TOKEN})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlay the values present in the file onto `settings`.
    pub fn apply_to(&self, settings: &mut ClientSettings) {
        let Some(client) = &self.client else {
            return;
        };

        if let Some(base_url) = &client.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(cookie_name) = &client.cookie_name {
            settings.cookie_name = cookie_name.clone();
        }
        if let Some(token) = &client.session_token {
            settings.session_token = Some(token.clone());
        }
        if let Some(user_agent) = &client.user_agent {
            settings.user_agent = user_agent.clone();
        }
    }
}
