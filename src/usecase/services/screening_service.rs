use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::dataset::StockRecord;
use crate::domain::entities::screen::{
    FilterDescription, ScreenRequest, MAX_RESULT_LIMIT, MAX_TIMEFRAMES,
};
use crate::usecase::ports::screener::{ScreenerError, ScreenerGateway};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreeningError {
    #[error("search text is required")]
    EmptyExpression,
    #[error("at least one filter condition is required")]
    NoConditions,
    #[error("between 1 and 5 timeframes are allowed, got {0}")]
    TimeframeCount(usize),
    #[error("result limit must be between 1 and 10000, got {0}")]
    LimitOutOfRange(usize),
    #[error("a screening request is already in progress")]
    Busy,
    #[error(transparent)]
    Transport(#[from] ScreenerError),
}

/// Result of a completed call. `Stale` means a newer request was issued (or the
/// caller invalidated) while this one was in flight; its records must not be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    Fresh {
        generation: u64,
        records: Vec<StockRecord>,
    },
    Stale {
        generation: u64,
    },
}

pub fn validate_request(request: &ScreenRequest) -> Result<(), ScreeningError> {
    match &request.filters {
        FilterDescription::Expression { expression } => {
            if expression.trim().is_empty() {
                return Err(ScreeningError::EmptyExpression);
            }
        }
        structured => {
            if structured.condition_count() == 0 {
                return Err(ScreeningError::NoConditions);
            }
        }
    }

    let timeframes = request.timeframe.len();
    if timeframes == 0 || timeframes > MAX_TIMEFRAMES {
        return Err(ScreeningError::TimeframeCount(timeframes));
    }

    let limit = request.pagination.limit;
    if limit == 0 || limit > MAX_RESULT_LIMIT {
        return Err(ScreeningError::LimitOutOfRange(limit));
    }
    Ok(())
}

/// Issues screening calls one at a time and tags each with a generation number.
pub struct ScreeningService {
    gateway: Arc<dyn ScreenerGateway>,
    latest_generation: AtomicU64,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ScreeningService {
    pub fn new(gateway: Arc<dyn ScreenerGateway>) -> Self {
        Self {
            gateway,
            latest_generation: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation.load(Ordering::SeqCst)
    }

    /// Any response still in flight becomes stale.
    pub fn invalidate(&self) -> u64 {
        self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Validation runs before anything is sent; an overlapping call is refused.
    /// Failures leave no trace beyond the returned error.
    pub async fn screen(&self, request: ScreenRequest) -> Result<ScreenOutcome, ScreeningError> {
        validate_request(&request)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ScreeningError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let generation = self.invalidate();
        info!(
            generation,
            timeframes = request.timeframe.len(),
            limit = request.pagination.limit,
            "screening request issued"
        );

        let result = self.gateway.screen(&request).await;

        let latest = self.latest_generation();
        if generation != latest {
            debug!(generation, latest, "discarding stale screening response");
            return Ok(ScreenOutcome::Stale { generation });
        }

        match result {
            Ok(records) => {
                info!(generation, rows = records.len(), "screening request completed");
                Ok(ScreenOutcome::Fresh {
                    generation,
                    records,
                })
            }
            Err(err) => {
                warn!(generation, error = %err, "screening request failed");
                Err(ScreeningError::Transport(err))
            }
        }
    }
}
