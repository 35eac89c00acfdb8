use thiserror::Error;

/// Errors raised while building a [`TokenEngine`](crate::TokenEngine).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("secret cannot be empty")]
    EmptySecret,
    #[error("validate_time and validate_data are both false, nothing to validate")]
    NothingToValidate,
    #[error("valid_for cannot be absent if validate_time is true")]
    MissingValidFor,
    #[error("valid_for must be greater than zero")]
    ZeroValidFor,
    #[error("valid_for is too large: {0:?}")]
    ValidForOutOfRange(std::time::Duration),
    #[error("token_length must be greater than zero")]
    ZeroTokenLength,
}

/// Errors raised while generating or validating a code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("input cannot be empty")]
    EmptyInput,
    /// The keyed hash returned no bytes. Points at a broken hash, not at the caller.
    #[error("the hashed bytes are empty")]
    EmptyDigest,
    #[error("time window index is out of range")]
    WindowOutOfRange,
}
