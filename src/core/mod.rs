pub mod client;
pub mod observable;
pub mod store;

pub use crate::domain::model::ConfigResponse;
pub use crate::domain::ports::{ApiClient, ConfigProvider};
pub use crate::utils::error::Result;
