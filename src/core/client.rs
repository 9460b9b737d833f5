use crate::core::{ApiClient, ConfigProvider, ConfigResponse};
use crate::domain::model::{BestEffortBody, EmailSendRequest, EmailVerifyRequest, StatusOutcome};
use crate::utils::error::{ClientError, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

pub const CONFIG_PATH: &str = "/api/config";
pub const VERIFY_TOKEN_PATH: &str = "/api/verify-token";
pub const EMAIL_VERIFY_PATH: &str = "/api/email/verify";
pub const EMAIL_SEND_PATH: &str = "/api/email/send";

/// reqwest-backed [`ApiClient`].
///
/// Every request goes through one client sharing one cookie jar, so cookies
/// the backend sets are replayed on later calls to the same origin and never
/// sent anywhere else.
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    cookie_name: String,
    cookies: Arc<Jar>,
}

impl HttpApiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url =
            Url::parse(config.base_url()).map_err(|e| ClientError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: config.base_url().to_string(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        let cookies = Arc::new(Jar::default());
        if let Some(token) = config.session_token() {
            tracing::debug!("Seeding session cookie {} for {}", config.cookie_name(), base_url);
            cookies.add_cookie_str(
                &format!("{}={}; Path=/", config.cookie_name(), token),
                &base_url,
            );
        }

        let client = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url,
            cookie_name: config.cookie_name().to_string(),
            cookies,
        })
    }

    /// Current value of the session cookie held for the base URL, if any.
    pub fn session_cookie(&self) -> Option<String> {
        let header = self.cookies.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.cookie_name).then(|| value.to_string())
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn send_for_status(&self, path: &str, request: RequestBuilder) -> Result<StatusOutcome> {
        let response = request.send().await?;
        let outcome = StatusOutcome::new(response.status().as_u16());
        tracing::debug!("{} answered {}", path, outcome.status);
        Ok(outcome)
    }

    async fn send_for_body<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<BestEffortBody<T>> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        tracing::debug!("{} answered {}", path, status);

        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).map_err(|source| ClientError::DecodeError {
            path: path.to_string(),
            status,
            source,
        })?;

        Ok(BestEffortBody { status, body })
    }
}

#[async_trait::async_trait]
impl ApiClient for HttpApiClient {
    async fn get_config(&self) -> Result<ConfigResponse> {
        let request = self.client.get(self.endpoint(CONFIG_PATH));
        let body = self.send_for_body(CONFIG_PATH, request).await?;
        Ok(body.into_inner())
    }

    async fn verify_token(&self) -> Result<bool> {
        let request = self.client.post(self.endpoint(VERIFY_TOKEN_PATH));
        let outcome = self.send_for_status(VERIFY_TOKEN_PATH, request).await?;
        Ok(outcome.into())
    }

    async fn email_verify(&self, email: &str, code: &str) -> Result<bool> {
        let request = self
            .client
            .post(self.endpoint(EMAIL_VERIFY_PATH))
            .json(&EmailVerifyRequest { email, code });
        let outcome = self.send_for_status(EMAIL_VERIFY_PATH, request).await?;
        Ok(outcome.into())
    }

    async fn email_send(&self, email: &str) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint(EMAIL_SEND_PATH))
            .json(&EmailSendRequest { email });
        // Status carries no signal for this endpoint.
        self.send_for_status(EMAIL_SEND_PATH, request).await?;
        Ok(())
    }
}
