//! Coercion mode shared by every placeholder of a binder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BindError;

/// Coercion policy applied to every placeholder of a binding call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The value's category must already match the placeholder.
    Strict,
    /// Booleans, nulls and numbers are converted where the table allows it.
    #[default]
    Transform,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Transform => "transform",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "transform" => Ok(Self::Transform),
            other => Err(BindError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_transform() {
        assert_eq!(Mode::default(), Mode::Transform);
    }

    #[test]
    fn test_from_str_valid_modes() {
        assert_eq!("strict".parse::<Mode>().unwrap(), Mode::Strict);
        assert_eq!("transform".parse::<Mode>().unwrap(), Mode::Transform);
    }

    #[test]
    fn test_from_str_invalid() {
        let err = "lenient".parse::<Mode>().unwrap_err();
        assert!(matches!(err, BindError::UnknownMode(ref m) if m == "lenient"));
        assert!("".parse::<Mode>().is_err());
        assert!("Strict".parse::<Mode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Strict).unwrap(), "\"strict\"");
        let mode: Mode = serde_json::from_str("\"transform\"").unwrap();
        assert_eq!(mode, Mode::Transform);
    }
}
