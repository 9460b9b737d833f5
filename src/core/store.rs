use crate::core::observable::Observable;
use crate::core::{ApiClient, ConfigResponse};
use crate::utils::error::Result;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How overlapping `refresh_config` calls resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshOrdering {
    /// The refresh that completes last wins, whatever order they were issued in.
    #[default]
    CompletionOrder,
    /// A result from a refresh issued before the currently applied one is dropped.
    IssueOrder,
}

/// Application-wide UI state, owned by the application root and handed to
/// whatever needs it.
pub struct AppState {
    verified: Observable<bool>,
    config: Observable<Option<ConfigResponse>>,
    client: Arc<dyn ApiClient>,
    ordering: RefreshOrdering,
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl AppState {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self::with_ordering(client, RefreshOrdering::default())
    }

    pub fn with_ordering(client: Arc<dyn ApiClient>, ordering: RefreshOrdering) -> Self {
        Self {
            verified: Observable::new(false),
            config: Observable::new(None),
            client,
            ordering,
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
        }
    }

    /// Set by the caller; nothing in this crate derives it from a response.
    pub fn verified(&self) -> &Observable<bool> {
        &self.verified
    }

    /// `None` until the first successful refresh.
    pub fn config(&self) -> &Observable<Option<ConfigResponse>> {
        &self.config
    }

    pub fn client(&self) -> &Arc<dyn ApiClient> {
        &self.client
    }

    pub fn ordering(&self) -> RefreshOrdering {
        self.ordering
    }

    /// Fetch the config and publish it to the config cell.
    ///
    /// The ticket is taken when this is called, not when the future is first
    /// polled. On error the cell keeps its previous value.
    pub fn refresh_config(&self) -> impl Future<Output = Result<()>> + Send + '_ {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            let config = self.client.get_config().await?;
            self.apply_config(ticket, config);
            Ok(())
        }
    }

    fn apply_config(&self, ticket: u64, config: ConfigResponse) {
        let value = Some(config);
        {
            let mut applied = self.applied.lock();
            if self.ordering == RefreshOrdering::IssueOrder && ticket < *applied {
                tracing::debug!(
                    "Discarding config refresh #{} (#{} already applied)",
                    ticket,
                    *applied
                );
                return;
            }
            *applied = (*applied).max(ticket);
            // Stored under the ticket lock so an older result cannot land after a newer one.
            self.config.replace(value.clone());
        }

        tracing::debug!("Applied config refresh #{}", ticket);
        self.config.notify(&value);
    }
}
