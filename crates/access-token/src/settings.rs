use chrono::{DateTime, Utc};
use std::time::Duration;

/// Number of digits in a code unless configured otherwise.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

/// Settings for a [`TokenEngine`](crate::TokenEngine).
///
/// The settings are checked once, when the engine is built, and are read-only
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenSettings {
    /// Secret key for the keyed hash, used as its UTF-8 bytes.
    pub secret: String,
    /// Bind the code to the input data.
    pub validate_data: bool,
    /// Bind the code to the current time window.
    pub validate_time: bool,
    /// Length of one time window. Required when `validate_time` is set.
    pub valid_for: Option<Duration>,
    /// Origin of the time windows. Defaults to the earliest representable instant.
    pub time_zero: Option<DateTime<Utc>>,
    /// Number of characters in a rendered code.
    pub token_length: usize,
    /// Also accept the code of the window immediately before the current one.
    pub ensure_at_least_valid_for: bool,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            validate_data: false,
            validate_time: false,
            valid_for: None,
            time_zero: None,
            token_length: DEFAULT_TOKEN_LENGTH,
            ensure_at_least_valid_for: false,
        }
    }
}

impl TokenSettings {
    /// Create settings with the given secret and nothing else enabled.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn validate_data(mut self, enabled: bool) -> Self {
        self.validate_data = enabled;
        self
    }

    /// Enable time binding with windows of the given length.
    pub fn validate_time(mut self, valid_for: Duration) -> Self {
        self.validate_time = true;
        self.valid_for = Some(valid_for);
        self
    }

    pub fn time_zero(mut self, time_zero: DateTime<Utc>) -> Self {
        self.time_zero = Some(time_zero);
        self
    }

    pub fn token_length(mut self, token_length: usize) -> Self {
        self.token_length = token_length;
        self
    }

    pub fn ensure_at_least_valid_for(mut self, enabled: bool) -> Self {
        self.ensure_at_least_valid_for = enabled;
        self
    }

    /// Origin of the time windows, falling back to the earliest representable instant.
    pub fn effective_time_zero(&self) -> DateTime<Utc> {
        self.time_zero.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
