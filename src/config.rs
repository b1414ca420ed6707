//! Per-run matching parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of candidates per token and the minimum
/// LCS-to-token-length ratio a similarity candidate needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub k: usize,
    pub threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            k: 3,
            threshold: 0.8,
        }
    }
}

impl MatchConfig {
    /// Validate raw parameters; negative `k` and thresholds outside [0, 1]
    /// (NaN included) are rejected rather than clamped.
    pub fn new(k: i64, threshold: f64) -> Result<Self> {
        let k = usize::try_from(k).map_err(|_| Error::InvalidK(k))?;
        let config = Self { k, threshold };
        config.validate()?;
        Ok(config)
    }

    /// Re-check a config built by hand or deserialized.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.k, 3);
        assert_eq!(config.threshold, 0.8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(MatchConfig::new(-1, 0.5), Err(Error::InvalidK(-1))));
        assert!(matches!(
            MatchConfig::new(3, 1.5),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(MatchConfig::new(3, -0.1).is_err());
        assert!(MatchConfig::new(3, f64::NAN).is_err());
    }

    #[test]
    fn test_accepts_bounds() {
        assert_eq!(MatchConfig::new(0, 0.0).unwrap().k, 0);
        assert_eq!(MatchConfig::new(10, 1.0).unwrap().threshold, 1.0);
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: MatchConfig = serde_json::from_str(r#"{"k": 5, "threshold": 0.6}"#).unwrap();
        assert_eq!(config, MatchConfig { k: 5, threshold: 0.6 });
    }
}
