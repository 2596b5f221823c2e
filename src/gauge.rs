use ratatui::style::Color;

use crate::risk::{classify, RiskTier};

/// Circumference of the reference gauge ring (radius-85 circle in a 200x200
/// viewport). Arc lengths are expressed in these units.
pub const RING_CIRCUMFERENCE: f64 = 534.0;

/// Bounded circular-progress encoding of one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeEncoding {
    /// Fill percentage, clamped to [0, 100].
    pub percent: f64,
    /// Filled arc length in ring units, in [0, RING_CIRCUMFERENCE].
    pub arc_len: f64,
    /// Temperature readout, prediction * 100 to one decimal place.
    pub display_value: String,
    /// Tier color shared with the badge and labels.
    pub color: Color,
}

/// Map a normalized prediction and its risk tier to the gauge encoding.
///
/// Out-of-range predictions clamp rather than over- or under-filling the
/// ring; the displayed number is left unclamped so the operator still sees
/// the raw reading.
pub fn encode(prediction: f64, tier: RiskTier) -> GaugeEncoding {
    let percent = (prediction * 100.0).clamp(0.0, 100.0);
    GaugeEncoding {
        percent,
        arc_len: percent * (RING_CIRCUMFERENCE / 100.0),
        display_value: format!("{:.1}", prediction * 100.0),
        color: classify(tier).color,
    }
}
