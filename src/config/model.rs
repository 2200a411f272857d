use serde::{de::Deserializer, Deserialize, Serialize};

use crate::currency::Currency;

use super::ConfigError;

pub const DEFAULT_THEME: &str = "black-neon";

/// Stores user-configurable preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient_currency")]
    pub currency: Currency,
    #[serde(default, deserialize_with = "lenient_budget")]
    pub monthly_budget: f64,
    #[serde(default = "Settings::default_theme")]
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            monthly_budget: 0.0,
            theme: Self::default_theme(),
        }
    }
}

impl Settings {
    pub fn default_theme() -> String {
        DEFAULT_THEME.into()
    }

    /// Zero clears the budget.
    pub fn set_monthly_budget(&mut self, budget: f64) -> Result<(), ConfigError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "monthly budget must be zero or positive, got {budget}"
            )));
        }
        self.monthly_budget = budget;
        Ok(())
    }

    pub fn budget_is_set(&self) -> bool {
        self.monthly_budget > 0.0
    }
}

fn lenient_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value {
        Some(code) => code.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default currency");
            Currency::default()
        }),
        None => Currency::default(),
    })
}

fn lenient_budget<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        tracing::warn!(value, "ignoring invalid monthly budget");
        Ok(0.0)
    }
}
