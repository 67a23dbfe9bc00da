/// Bitterness tiers used to colour cards and the detail overlay

/// Coarse bitterness bucket derived from a product's IBU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbuTier {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl IbuTier {
    /// Classify an IBU value
    pub fn from_ibu(ibu: f64) -> Self {
        if ibu >= 70.0 {
            IbuTier::VeryHigh
        } else if ibu >= 50.0 {
            IbuTier::High
        } else if ibu >= 30.0 {
            IbuTier::Medium
        } else {
            IbuTier::Low
        }
    }

    /// Short label shown next to the IBU badge
    pub fn label(self) -> &'static str {
        match self {
            IbuTier::Low => "low",
            IbuTier::Medium => "medium",
            IbuTier::High => "high",
            IbuTier::VeryHigh => "very high",
        }
    }
}
