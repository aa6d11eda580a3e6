use serde::{Deserialize, Serialize};

use crate::decimal::MONEY_SCALE;
use crate::errors::{LedgerError, Result};

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// required length of a national id after separators are stripped;
    /// `None` skips the length check
    pub national_id_length: Option<usize>,
    /// decimal places kept on per-line installment and development-charge shares
    pub installment_scale: u32,
    /// currency code used when rendering amounts
    pub currency: String,
    /// only plots in `Available` status can be put on a plan
    pub require_available_plot: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::cnic()
    }
}

impl LedgerConfig {
    /// 13-digit CNIC, whole-rupee installments
    pub fn cnic() -> Self {
        Self {
            national_id_length: Some(13),
            installment_scale: 0,
            currency: "PKR".to_string(),
            require_available_plot: true,
        }
    }

    /// no id length check, paisa-level installments
    pub fn lenient() -> Self {
        Self {
            national_id_length: None,
            installment_scale: MONEY_SCALE,
            currency: "PKR".to_string(),
            require_available_plot: false,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_installment_scale(mut self, scale: u32) -> Self {
        self.installment_scale = scale;
        self
    }

    pub fn with_national_id_length(mut self, length: Option<usize>) -> Self {
        self.national_id_length = length;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.installment_scale > MONEY_SCALE {
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "installment scale {} exceeds money scale {}",
                    self.installment_scale, MONEY_SCALE
                ),
            });
        }

        if self.national_id_length == Some(0) {
            return Err(LedgerError::InvalidConfiguration {
                message: "national id length must be positive".to_string(),
            });
        }

        if self.currency.trim().is_empty() {
            return Err(LedgerError::InvalidConfiguration {
                message: "currency code is empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cnic() {
        let config = LedgerConfig::default();
        assert_eq!(config.national_id_length, Some(13));
        assert_eq!(config.installment_scale, 0);
        assert_eq!(config.currency, "PKR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = LedgerConfig::cnic().with_installment_scale(4);
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidConfiguration { .. })
        ));

        let config = LedgerConfig::cnic().with_national_id_length(Some(0));
        assert!(config.validate().is_err());

        let config = LedgerConfig::cnic().with_currency(" ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = LedgerConfig::lenient().with_currency("USD");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
