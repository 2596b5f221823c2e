use ratatui::style::Color;
use serde::Deserialize;

/// Server-assigned severity bucket for a predicted temperature.
///
/// The server owns the thresholds; the client only renders the tier. Any
/// token outside the four known values deserializes to `Unknown` instead of
/// failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Normal,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Normal => "normal",
            RiskTier::Warning => "warning",
            RiskTier::Critical => "critical",
            RiskTier::Unknown => "unknown",
        }
    }

    /// Badge text, e.g. "NORMAL".
    pub fn badge(&self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Visual treatment for one tier. Every surface (gauge, badge, labels) pulls
/// from this table so the tier-to-color mapping can never diverge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskStyle {
    pub color: Color,
    pub icon: &'static str,
    pub headline: &'static str,
    pub advisory: &'static str,
}

/// Reference palette.
pub const RISK_LOW: Color = Color::Rgb(0x00, 0xff, 0x88);
pub const RISK_NORMAL: Color = Color::Rgb(0x00, 0xd9, 0xff);
pub const RISK_WARNING: Color = Color::Rgb(0xff, 0xa5, 0x00);
pub const RISK_CRITICAL: Color = Color::Rgb(0xff, 0x33, 0x66);
/// Neutral fallback, distinct from all four tier colors.
pub const RISK_NEUTRAL: Color = Color::Rgb(0x88, 0x94, 0xa3);

pub fn classify(tier: RiskTier) -> RiskStyle {
    match tier {
        RiskTier::Low => RiskStyle {
            color: RISK_LOW,
            icon: "✓",
            headline: "LOW",
            advisory: "Operating within safe temperature range",
        },
        RiskTier::Normal => RiskStyle {
            color: RISK_NORMAL,
            icon: "🌡",
            headline: "NORMAL",
            advisory: "Normal operating temperature",
        },
        RiskTier::Warning => RiskStyle {
            color: RISK_WARNING,
            icon: "⚠",
            headline: "WARNING",
            advisory: "Temperature approaching warning threshold",
        },
        RiskTier::Critical => RiskStyle {
            color: RISK_CRITICAL,
            icon: "✗",
            headline: "CRITICAL",
            advisory: "CRITICAL: Immediate attention required!",
        },
        RiskTier::Unknown => RiskStyle {
            color: RISK_NEUTRAL,
            icon: "🌡",
            headline: "UNKNOWN",
            advisory: "Temperature analysis complete",
        },
    }
}
