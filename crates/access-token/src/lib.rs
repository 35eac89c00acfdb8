//! Short numeric access codes bound to caller data and, optionally, to a
//! rotating time window.
//!
//! A code is derived by keyed-hashing the enabled factors, truncating the
//! digest to a 32-bit value and rendering it as a fixed-width decimal string.

pub mod clock;
pub mod code;
pub mod engine;
pub mod error;
pub mod hash;
pub mod settings;

pub use clock::{Clock, FixedClock, SystemClock};
pub use code::{render_code, truncate};
pub use engine::TokenEngine;
pub use error::{ConfigError, TokenError};
pub use hash::{HmacSha512, KeyedHash};
pub use settings::{TokenSettings, DEFAULT_TOKEN_LENGTH};
