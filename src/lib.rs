pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ClientSettings;
pub use crate::core::{
    client::HttpApiClient,
    observable::{Observable, SubscriptionId},
    store::{AppState, RefreshOrdering},
};
pub use domain::model::ConfigResponse;
pub use domain::ports::{ApiClient, ConfigProvider};
pub use utils::error::{ClientError, Result};
