use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

const DEFAULT_CASH_OPTION_RATIO: f64 = 0.458;
const DEFAULT_FEDERAL_WITHHOLDING_RATE: f64 = 0.24;
const DEFAULT_FEDERAL_TOP_BRACKET_RATE: f64 = 0.13;

// Top marginal state tax on lottery prizes, percent of the taxable base.
const DEFAULT_STATE_RATES: [(&str, f64); 50] = [
    ("Alabama", 0.0),
    ("Alaska", 0.0),
    ("Arizona", 4.8),
    ("Arkansas", 5.5),
    ("California", 13.3),
    ("Colorado", 4.55),
    ("Connecticut", 6.99),
    ("Delaware", 6.6),
    ("Florida", 0.0),
    ("Georgia", 5.75),
    ("Hawaii", 11.0),
    ("Idaho", 6.5),
    ("Illinois", 4.95),
    ("Indiana", 3.23),
    ("Iowa", 8.53),
    ("Kansas", 5.7),
    ("Kentucky", 5.0),
    ("Louisiana", 6.0),
    ("Maine", 7.15),
    ("Maryland", 8.95),
    ("Massachusetts", 5.0),
    ("Michigan", 4.25),
    ("Minnesota", 9.85),
    ("Mississippi", 5.0),
    ("Missouri", 5.4),
    ("Montana", 6.9),
    ("Nebraska", 6.84),
    ("Nevada", 0.0),
    ("New Hampshire", 0.0),
    ("New Jersey", 10.75),
    ("New Mexico", 5.9),
    ("New York", 10.9),
    ("North Carolina", 4.99),
    ("North Dakota", 2.9),
    ("Ohio", 3.99),
    ("Oklahoma", 5.0),
    ("Oregon", 9.9),
    ("Pennsylvania", 3.07),
    ("Rhode Island", 5.99),
    ("South Carolina", 7.0),
    ("South Dakota", 0.0),
    ("Tennessee", 0.0),
    ("Texas", 0.0),
    ("Utah", 4.95),
    ("Vermont", 8.75),
    ("Virginia", 5.75),
    ("Washington", 0.0),
    ("West Virginia", 6.5),
    ("Wisconsin", 7.65),
    ("Wyoming", 0.0),
];

/// Tax table configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read tax config at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tax config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tax config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfig {
    pub cash_option_ratio: f64,
    pub federal_withholding_rate: f64,
    pub federal_top_bracket_rate: f64,
    pub state_rates: BTreeMap<String, f64>,
}

impl Default for TaxConfig {
    fn default() -> Self {
        TaxConfig {
            cash_option_ratio: DEFAULT_CASH_OPTION_RATIO,
            federal_withholding_rate: DEFAULT_FEDERAL_WITHHOLDING_RATE,
            federal_top_bracket_rate: DEFAULT_FEDERAL_TOP_BRACKET_RATE,
            state_rates: DEFAULT_STATE_RATES
                .iter()
                .map(|(state, rate)| (state.to_string(), *rate))
                .collect(),
        }
    }
}

impl TaxConfig {
    pub fn federal_rate(&self) -> f64 {
        self.federal_withholding_rate + self.federal_top_bracket_rate
    }

    // State names are matched exactly; unknown names fall back to no state tax.
    pub fn state_rate(&self, state: &str) -> f64 {
        self.state_rates.get(state).copied().unwrap_or(0.0)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let overlay: TaxConfigOverlay = toml::from_str(text)?;
        let mut config = TaxConfig::default();
        if let Some(ratio) = overlay.cash_option_ratio {
            config.cash_option_ratio = ratio;
        }
        if let Some(rate) = overlay.federal_withholding_rate {
            config.federal_withholding_rate = rate;
        }
        if let Some(rate) = overlay.federal_top_bracket_rate {
            config.federal_top_bracket_rate = rate;
        }
        for (state, rate) in overlay.state_rates {
            config.state_rates.insert(state, rate);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.cash_option_ratio.is_finite()
            || self.cash_option_ratio <= 0.0
            || self.cash_option_ratio > 1.0
        {
            return Err(ConfigError::Invalid(
                "cash_option_ratio must be in (0, 1]".to_string(),
            ));
        }
        for (name, rate) in [
            ("federal_withholding_rate", self.federal_withholding_rate),
            ("federal_top_bracket_rate", self.federal_top_bracket_rate),
        ] {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a fraction in [0, 1]"
                )));
            }
        }
        if self.federal_rate() >= 1.0 {
            return Err(ConfigError::Invalid(
                "combined federal rate must be below 1".to_string(),
            ));
        }
        for (state, rate) in &self.state_rates {
            if !rate.is_finite() || !(0.0..=100.0).contains(rate) {
                return Err(ConfigError::Invalid(format!(
                    "state rate for {state} must be a percentage in [0, 100]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TaxConfigOverlay {
    cash_option_ratio: Option<f64>,
    federal_withholding_rate: Option<f64>,
    federal_top_bracket_rate: Option<f64>,
    state_rates: BTreeMap<String, f64>,
}
