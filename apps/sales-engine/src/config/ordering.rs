//! Ordering configuration: retry budgets for unique number assignment.

use serde::{Deserialize, Serialize};

/// Ordering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Generate-and-check attempts before the timestamp fallback.
    #[serde(default = "default_number_attempts")]
    pub number_attempts: u32,
    /// Whole-insert retries after a duplicate-number conflict.
    #[serde(default = "default_insert_attempts")]
    pub insert_attempts: u32,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            number_attempts: default_number_attempts(),
            insert_attempts: default_insert_attempts(),
        }
    }
}

pub(crate) const fn default_number_attempts() -> u32 {
    10
}

pub(crate) const fn default_insert_attempts() -> u32 {
    3
}
