//! Sensitive data marker for credentials
//!
//! Connection settings carry passwords. Wrapping them in `Sensitive<T>`
//! keeps them out of `Debug` output, log lines and error messages while
//! still allowing the connection factory to read the value.

use serde::{Deserialize, Deserializer};
use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper that redacts its value in `Debug` and `Display`
///
/// # Example
///
/// ```
/// use storagex_core_types::Sensitive;
///
/// let password = Sensitive::new(String::from("postgres"));
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), "postgres");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Read the wrapped value. Callers must not log the result.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Sensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let secret = Sensitive::new("hunter2");
        assert_eq!(format!("{:?}", secret), REDACTED);
        assert_eq!(format!("{}", secret), REDACTED);
    }

    #[test]
    fn test_expose_returns_inner_value() {
        let secret: Sensitive<String> = String::from("hunter2").into();
        assert_eq!(secret.expose(), "hunter2");
        assert_eq!(secret.into_inner(), "hunter2");
    }

    #[test]
    fn test_redacted_inside_connection_settings() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Settings {
            user: String,
            password: Sensitive<String>,
        }

        let settings: Settings =
            serde_json::from_str(r#"{"user":"postgres","password":"hunter2"}"#).unwrap();
        assert_eq!(settings.password.expose(), "hunter2");

        let debug_str = format!("{:?}", settings);
        assert!(debug_str.contains("postgres"));
        assert!(!debug_str.contains("hunter2"));
    }
}
