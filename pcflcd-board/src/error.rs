//! Board description errors

use core::fmt;

use pcflcd_core::config::ConfigError;

/// Errors from loading or encoding a board description
#[derive(Debug)]
pub enum BoardError {
    /// TOML syntax error or field of the wrong type
    Toml(toml::de::Error),
    /// Bias other than "1/3" or "1/2"
    UnknownBias(String),
    /// Multiplex other than "static", "1:2", "1:3" or "1:4"
    UnknownMultiplex(String),
    /// Pin pair outside the controller's backplanes or segment outputs
    InvalidPin {
        item: String,
        backplane: u8,
        segment: u8,
    },
    /// Item rejected while building the board
    Item { item: String, error: ConfigError },
    /// Board failed validation as a whole
    Config(ConfigError),
    /// Board could not be serialized
    Encode(postcard::Error),
}

fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::LabelTooLong => "name is too long",
        ConfigError::TooManyItems => "too many items",
        ConfigError::DuplicateName => "duplicate name",
        ConfigError::Empty => "group has no segments",
        ConfigError::InvalidSegment => "segment outside display RAM",
        ConfigError::UndrivenBackplane => "segment on a backplane the multiplex mode does not drive",
        ConfigError::InvalidAddress => "I2C address must be 0x38 or 0x39",
        ConfigError::InvalidSubAddress => "sub_address must be 0-7",
        ConfigError::Deserialize => "board image is corrupt",
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml(e) => write!(f, "invalid board TOML: {e}"),
            Self::UnknownBias(s) => write!(f, "bias must be '1/3' or '1/2', found '{s}'"),
            Self::UnknownMultiplex(s) => write!(
                f,
                "multiplex must be 'static', '1:2', '1:3' or '1:4', found '{s}'"
            ),
            Self::InvalidPin {
                item,
                backplane,
                segment,
            } => write!(
                f,
                "{item}: pin [{backplane}, {segment}] out of range (backplane 0-3, segment 0-39)"
            ),
            Self::Item { item, error } => write!(f, "{item}: {}", describe(*error)),
            Self::Config(e) => f.write_str(describe(*e)),
            Self::Encode(e) => write!(f, "failed to encode board image: {e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Toml(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for BoardError {
    fn from(e: toml::de::Error) -> Self {
        BoardError::Toml(e)
    }
}

impl From<ConfigError> for BoardError {
    fn from(e: ConfigError) -> Self {
        BoardError::Config(e)
    }
}
