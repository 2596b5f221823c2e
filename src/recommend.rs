use crate::risk::RiskTier;

/// Fixed operator checklist for one risk tier, most urgent action first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub title: &'static str,
    pub actions: &'static [&'static str],
}

pub fn recommend(tier: RiskTier) -> Recommendation {
    match tier {
        RiskTier::Low => Recommendation {
            title: "Optimal Operation",
            actions: &[
                "Continue normal operation",
                "Monitor temperature trends",
                "Maintain current load levels",
            ],
        },
        RiskTier::Normal => Recommendation {
            title: "Normal Operation",
            actions: &[
                "Continue monitoring",
                "Schedule routine maintenance",
                "Check cooling system efficiency",
            ],
        },
        RiskTier::Warning => Recommendation {
            title: "Increased Monitoring",
            actions: &[
                "Increase monitoring frequency",
                "Reduce motor load if possible",
                "Inspect cooling system",
                "Prepare for potential maintenance",
            ],
        },
        RiskTier::Critical => Recommendation {
            title: "IMMEDIATE ACTION REQUIRED",
            actions: &[
                "STOP MOTOR IMMEDIATELY if safe to do so",
                "Inspect for mechanical issues",
                "Check coolant levels and circulation",
                "Contact maintenance team urgently",
                "Do not restart until inspected",
            ],
        },
        RiskTier::Unknown => Recommendation {
            title: "Monitor",
            actions: &["Continue normal operation"],
        },
    }
}
