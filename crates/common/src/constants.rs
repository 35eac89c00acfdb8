/// Environment variable that replaces the secret read from a settings file
pub const SECRET_ENV_VAR: &str = "ACCESS_TOKEN_SECRET";

/// Default settings file looked up by the CLI
pub const DEFAULT_SETTINGS_FILE: &str = "access-token.json";

/// Exit status for a code that does not validate
pub const EXIT_INVALID: u8 = 1;

/// Exit status for configuration or input errors
pub const EXIT_ERROR: u8 = 2;
