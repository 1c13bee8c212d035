//! Common market data types

use serde::{Deserialize, Serialize};

/// Market capitalization (in millions) a mover must reach: $200B
pub const MEGA_CAP_MIN_MILLIONS: f64 = 200_000.0;

/// Absolute same-day percent move a mover must reach
pub const MOVER_MIN_CHANGE_PERCENT: f64 = 2.0;

/// Quote lookup result. Missing upstream fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub current_price: Option<f64>,
    pub change_percent: Option<f64>,
}

/// Company profile lookup result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub market_cap_millions: Option<f64>,
}

/// Verified metrics for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerQuote {
    pub ticker: String,
    pub name: String,
    pub market_cap_millions: f64,
    pub price_change_percent: f64,
}

impl TickerQuote {
    /// Mega-Cap Momentum rule: cap >= $200B and |change| >= 2%, both inclusive
    pub fn is_mega_cap_mover(&self) -> bool {
        self.market_cap_millions >= MEGA_CAP_MIN_MILLIONS
            && self.price_change_percent.abs() >= MOVER_MIN_CHANGE_PERCENT
    }

    /// `Name (+2.35%)` style label used in the synthesis prompt
    pub fn mover_label(&self) -> String {
        let sign = if self.price_change_percent > 0.0 { "+" } else { "" };
        format!("{} ({}{:.2}%)", self.name, sign, self.price_change_percent)
    }
}
