use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ModelError, ModelResult};

/// Attempt budget for one retry session.
///
/// `Limited(n)` means the operation is invoked at most `n` times in total
/// (the first call included). `Unlimited` keeps retrying until the operation
/// succeeds or fails with a non-retryable error.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attempts {
    /// No budget: the session ends only on success or a fatal failure.
    #[default]
    Unlimited,
    /// At most this many invocations in total. Must be at least 1.
    Limited(u32),
}

impl Attempts {
    /// Returns `true` if the budget is unbounded.
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Attempts::Unlimited)
    }

    /// Validate the budget.
    ///
    /// `Limited(0)` would mean "never invoke the operation" and is rejected
    /// here, at configuration time, rather than surfacing at run time.
    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Attempts::Limited(0) => Err(ModelError::ZeroAttempts),
            _ => Ok(()),
        }
    }
}

impl From<u32> for Attempts {
    fn from(n: u32) -> Self {
        Attempts::Limited(n)
    }
}

impl FromStr for Attempts {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unlimited" | "infinite" => Ok(Attempts::Unlimited),
            other => other
                .parse::<u32>()
                .map(Attempts::Limited)
                .map_err(|_| ModelError::UnknownAttempts(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Attempts;
    use crate::error::ModelError;

    #[test]
    fn default_is_unlimited() {
        assert!(Attempts::default().is_unlimited());
    }

    #[test]
    fn zero_limited_is_rejected() {
        assert!(matches!(
            Attempts::Limited(0).validate(),
            Err(ModelError::ZeroAttempts)
        ));
        assert!(Attempts::Limited(1).validate().is_ok());
        assert!(Attempts::Unlimited.validate().is_ok());
    }

    #[test]
    fn parses_from_str() {
        let unlimited: Attempts = "unlimited".parse().unwrap();
        assert!(unlimited.is_unlimited());

        let limited: Attempts = "5".parse().unwrap();
        assert_eq!(limited, Attempts::Limited(5));

        assert!("five".parse::<Attempts>().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let a = Attempts::Limited(3);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"limited":3}"#);

        let back: Attempts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);

        let unlimited: Attempts = serde_json::from_str(r#""unlimited""#).unwrap();
        assert!(unlimited.is_unlimited());
    }
}
