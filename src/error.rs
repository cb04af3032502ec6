// SPDX-License-Identifier: MPL-2.0
//! Errors raised by the ambient surfaces of the crate.
//!
//! The notification core itself never fails: unknown ids, double resolution
//! and missing messages are all handled silently. Only configuration loading
//! and service construction can return an [`Error`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A configuration value is outside its accepted range.
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The service was built outside of a tokio runtime.
    #[error("no tokio runtime available to drive notification timers")]
    NoRuntime,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "settings.toml missing",
        ));
        assert_eq!(format!("{err}"), "I/O error: settings.toml missing");
    }

    #[test]
    fn display_formats_invalid_config() {
        let err = Error::InvalidConfig {
            field: "removal_delay_ms",
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "invalid config value for `removal_delay_ms`: must be positive"
        );
    }

    #[test]
    fn toml_parse_errors_convert() {
        let parse = toml::from_str::<toml::Value>("not = valid = toml").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
