//! Unique order number assignment.

use tracing::warn;

use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::repository::OrderRepository;
use crate::domain::ordering::value_objects::OrderNumber;
use crate::domain::shared::Timestamp;

/// Default bound on generate-and-check attempts.
const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Generates sequential, human-readable order numbers for the running year.
///
/// The candidate sequence continues from the highest stored number and adds
/// an offset from the low-order digits of the clock plus the retry counter,
/// which keeps concurrent callers from converging on the same value before
/// the existence check. Generation-then-check is not atomic, so the store's
/// unique index remains the actual correctness guarantee; this service only
/// minimizes expected insert conflicts.
#[derive(Debug, Clone, Copy)]
pub struct OrderNumberGenerator {
    max_attempts: u32,
}

impl Default for OrderNumberGenerator {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OrderNumberGenerator {
    /// Create a generator with a custom attempt bound.
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Produce a number unused at the time of the check.
    ///
    /// Falls back to embedding the raw millisecond timestamp once the
    /// attempt budget is exhausted, trading the zero-padded aesthetic for
    /// guaranteed progress.
    ///
    /// # Errors
    ///
    /// Returns error if a store query fails.
    pub async fn generate<R>(&self, repo: &R) -> Result<OrderNumber, OrderError>
    where
        R: OrderRepository + ?Sized,
    {
        for attempt in 0..self.max_attempts {
            let now = Timestamp::now();
            let year = now.year();

            let next_sequence = repo
                .last_number_for_year(year)
                .await?
                .and_then(|last| last.sequence_for_year(year))
                .map_or(1, |seq| seq + 1);

            #[allow(clippy::cast_sign_loss)]
            let offset = now.unix_micros().rem_euclid(1000) as u64 + u64::from(attempt);
            let candidate = OrderNumber::from_sequence(year, next_sequence + offset);

            if !repo.exists_by_number(&candidate).await? {
                return Ok(candidate);
            }
        }

        let now = Timestamp::now();
        warn!(
            attempts = self.max_attempts,
            "order number attempts exhausted, falling back to timestamp"
        );
        Ok(OrderNumber::fallback(now.year(), now.unix_millis()))
    }
}
