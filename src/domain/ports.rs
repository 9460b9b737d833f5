use crate::domain::model::ConfigResponse;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn cookie_name(&self) -> &str;
    fn session_token(&self) -> Option<&str>;
    fn user_agent(&self) -> &str;
}

/// The four backend calls. Transport failures are `Err`; a non-2xx status is
/// only an `Err` when it leaves `get_config` with an unparseable body.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get_config(&self) -> Result<ConfigResponse>;
    async fn verify_token(&self) -> Result<bool>;
    async fn email_verify(&self, email: &str, code: &str) -> Result<bool>;
    async fn email_send(&self, email: &str) -> Result<()>;
}
