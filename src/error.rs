use thiserror::Error;

use crate::utils::hex::HexError;

/// A single rejected option value.
///
/// The configuration builder records one of these and keeps going, so a
/// bad key does not hide problems in the rest of the argument vector.
#[derive(Debug, Error, PartialEq)]
pub enum OptionError {
    #[error("AES key value: {0} (32 character hexstring expected)")]
    Key(#[from] HexError),
}

/// Failure to turn parsed arguments into a usable configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    InvalidOptions(Vec<OptionError>),
}
