//! Constants for the citadel-api client

/// User-Agent header value for the character API client
pub const USER_AGENT: &str = concat!("citadel/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Path of the character endpoint, relative to the API base URL
pub const CHARACTER_PATH: &str = "/character/";
