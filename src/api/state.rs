//! Application state for the leave accounting API.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::config::ConfigLoader;
use crate::models::Holiday;

/// Shared application state.
///
/// Holds the loaded leave policy and holiday calendar, shared across all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Request holidays when supplied, the configured calendar otherwise.
    pub fn holidays_or_configured<'a>(&'a self, supplied: Option<&'a [Holiday]>) -> &'a [Holiday] {
        supplied.unwrap_or_else(|| self.config.holidays())
    }

    /// Request date when supplied, the current UTC date otherwise.
    pub fn today_or_now(supplied: Option<NaiveDate>) -> NaiveDate {
        supplied.unwrap_or_else(|| Utc::now().date_naive())
    }
}
