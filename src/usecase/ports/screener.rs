use async_trait::async_trait;

use crate::domain::entities::dataset::StockRecord;
use crate::domain::entities::screen::ScreenRequest;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreenerError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("screening failed: {0}")]
    Remote(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Remote screening service. Expression grammar is the service's business.
#[async_trait]
pub trait ScreenerGateway: Send + Sync {
    async fn screen(&self, request: &ScreenRequest) -> Result<Vec<StockRecord>, ScreenerError>;
}
