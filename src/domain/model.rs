use serde::{Deserialize, Serialize};

/// Branding and support metadata served by `GET /api/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub title: String,
    pub brand: String,
    pub support: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailSendRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailVerifyRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

/// Result of an endpoint whose only contract is its HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOutcome {
    pub status: u16,
}

impl StatusOutcome {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    pub fn succeeded(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<StatusOutcome> for bool {
    fn from(outcome: StatusOutcome) -> Self {
        outcome.succeeded()
    }
}

/// A parsed body returned regardless of the status it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestEffortBody<T> {
    pub status: u16,
    pub body: T,
}

impl<T> BestEffortBody<T> {
    pub fn into_inner(self) -> T {
        self.body
    }
}
