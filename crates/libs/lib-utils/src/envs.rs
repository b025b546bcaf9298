//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when unset or blank.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

/// Parse an environment variable, falling back to `default` when unset.
///
/// A value that is present but unparsable is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        _ => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        let err = get_env("LIB_UTILS_TEST_SURELY_UNSET").unwrap_err();
        assert!(matches!(err, Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET")));
    }

    #[test]
    fn test_get_env_or_default() {
        assert_eq!(get_env_or("LIB_UTILS_TEST_SURELY_UNSET", "fallback"), "fallback");
    }

    #[test]
    fn test_get_env_parse_or_default() {
        let val: u64 = get_env_parse_or("LIB_UTILS_TEST_SURELY_UNSET", 42).unwrap();
        assert_eq!(val, 42);
    }
}
