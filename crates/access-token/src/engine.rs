use crate::clock::{Clock, SystemClock};
use crate::code::{render_code, truncate};
use crate::error::{ConfigError, TokenError};
use crate::hash::{HmacSha512, KeyedHash};
use crate::settings::TokenSettings;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Derives and validates access codes for a fixed set of settings.
///
/// The engine holds no mutable state and can be shared freely between threads.
pub struct TokenEngine<C: Clock = SystemClock, H: KeyedHash = HmacSha512> {
    settings: TokenSettings,
    secret: Vec<u8>,
    window: Option<TimeWindow>,
    clock: C,
    hasher: H,
}

/// Time window geometry, resolved once from the settings.
struct TimeWindow {
    origin_nanos: i128,
    length_nanos: i128,
    length: TimeDelta,
}

impl TokenEngine {
    /// Build an engine using the wall clock and HMAC-SHA512.
    pub fn new(settings: TokenSettings) -> Result<Self, ConfigError> {
        Self::with_parts(settings, SystemClock, HmacSha512)
    }
}

impl<C: Clock> TokenEngine<C> {
    /// Build an engine reading "now" from the given clock.
    pub fn with_clock(settings: TokenSettings, clock: C) -> Result<Self, ConfigError> {
        Self::with_parts(settings, clock, HmacSha512)
    }
}

impl<C: Clock, H: KeyedHash> TokenEngine<C, H> {
    /// Build an engine from settings, a clock and a keyed hash.
    ///
    /// Fails if the settings cannot produce a code: empty secret, no factor
    /// enabled, a missing or zero window while time binding is enabled, or a
    /// zero token length.
    pub fn with_parts(settings: TokenSettings, clock: C, hasher: H) -> Result<Self, ConfigError> {
        if settings.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if !settings.validate_data && !settings.validate_time {
            return Err(ConfigError::NothingToValidate);
        }
        if settings.token_length == 0 {
            return Err(ConfigError::ZeroTokenLength);
        }

        let window = if settings.validate_time {
            let valid_for = settings.valid_for.ok_or(ConfigError::MissingValidFor)?;
            if valid_for.is_zero() {
                return Err(ConfigError::ZeroValidFor);
            }
            let length_nanos = i128::try_from(valid_for.as_nanos())
                .map_err(|_| ConfigError::ValidForOutOfRange(valid_for))?;
            let length = TimeDelta::from_std(valid_for)
                .map_err(|_| ConfigError::ValidForOutOfRange(valid_for))?;
            Some(TimeWindow {
                origin_nanos: instant_nanos(settings.effective_time_zero()),
                length_nanos,
                length,
            })
        } else {
            None
        };

        debug!(
            validate_data = settings.validate_data,
            validate_time = settings.validate_time,
            token_length = settings.token_length,
            grace = settings.ensure_at_least_valid_for,
            "Token engine configured"
        );

        let secret = settings.secret.as_bytes().to_vec();
        Ok(Self {
            settings,
            secret,
            window,
            clock,
            hasher,
        })
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Generate the current code for raw bytes. Empty input is accepted.
    pub fn generate(&self, input: &[u8]) -> Result<String, TokenError> {
        self.generate_at(input, self.clock.now())
    }

    /// Generate the current code for text, hashed as UTF-8.
    pub fn generate_str(&self, input: &str) -> Result<String, TokenError> {
        if input.is_empty() {
            return Err(TokenError::EmptyInput);
        }
        self.generate(input.as_bytes())
    }

    /// Check a presented code against raw bytes.
    ///
    /// Unlike [`validate_str`](Self::validate_str), empty input is accepted.
    /// A mismatch is `Ok(false)`, never an error.
    pub fn validate(&self, input: &[u8], code: &str) -> Result<bool, TokenError> {
        self.validate_at(input, code, self.clock.now())
    }

    /// Check a presented code against text, hashed as UTF-8.
    pub fn validate_str(&self, input: &str, code: &str) -> Result<bool, TokenError> {
        if input.is_empty() {
            return Err(TokenError::EmptyInput);
        }
        self.validate(input.as_bytes(), code)
    }

    fn validate_at(
        &self,
        input: &[u8],
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, TokenError> {
        if self.generate_at(input, now)? == code {
            return Ok(true);
        }

        if !self.settings.ensure_at_least_valid_for {
            return Ok(false);
        }
        let Some(window) = &self.window else {
            return Ok(false);
        };

        let previous = now
            .checked_sub_signed(window.length)
            .ok_or(TokenError::WindowOutOfRange)?;
        if self.generate_at(input, previous)? == code {
            debug!("Access code accepted from the previous time window");
            return Ok(true);
        }

        Ok(false)
    }

    fn generate_at(&self, input: &[u8], now: DateTime<Utc>) -> Result<String, TokenError> {
        let factors = self.factor_bytes(input, now)?;
        let digest = self.keyed_hash(&factors);
        let value = truncate(&digest)?;
        Ok(render_code(value, self.settings.token_length))
    }

    /// Concatenate the enabled factors: data first, then time.
    fn factor_bytes(&self, input: &[u8], now: DateTime<Utc>) -> Result<Vec<u8>, TokenError> {
        let mut bytes = Vec::new();

        if self.settings.validate_data {
            bytes.extend(self.keyed_hash(input));
        }
        if let Some(window) = &self.window {
            let index = window.index_at(now)?;
            trace!(index, "Time window index");
            bytes.extend(self.keyed_hash(&index.to_le_bytes()));
        }

        Ok(bytes)
    }

    fn keyed_hash(&self, data: &[u8]) -> Vec<u8> {
        self.hasher.hash(&self.secret, data)
    }
}

impl TimeWindow {
    /// Number of whole windows between the origin and `now`, floored.
    fn index_at(&self, now: DateTime<Utc>) -> Result<i64, TokenError> {
        let elapsed = instant_nanos(now) - self.origin_nanos;
        i64::try_from(elapsed.div_euclid(self.length_nanos))
            .map_err(|_| TokenError::WindowOutOfRange)
    }
}

fn instant_nanos(instant: DateTime<Utc>) -> i128 {
    i128::from(instant.timestamp()) * NANOS_PER_SECOND
        + i128::from(instant.timestamp_subsec_nanos())
}
