//! Category schema - How a tank is classified for stage applicability

use serde::{Deserialize, Serialize};

/// Stage-set category of a tank or sub-tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TankCategory {
    /// Primary sub-tank of the D-wall anchored family (split wall/floor waterproofing)
    DwallAnchoredPrimary,
    /// Any other member of the D-wall anchored family
    DwallAnchored,
    /// Exterior fire water, interior sanitary water, deposit tanks and rain water valve chambers
    LimitedNoAnchors,
    /// Everything else
    Standard,
}

impl std::fmt::Display for TankCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TankCategory::DwallAnchoredPrimary => write!(f, "dwall_anchored_primary"),
            TankCategory::DwallAnchored => write!(f, "dwall_anchored"),
            TankCategory::LimitedNoAnchors => write!(f, "limited_no_anchors"),
            TankCategory::Standard => write!(f, "standard"),
        }
    }
}

/// Category crossed with the pump-pit flag.
///
/// Everything the applicability rules and the special transition
/// branches need to know about an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TankProfile {
    pub category: TankCategory,
    #[serde(default)]
    pub pump_pit: bool,
}

impl TankProfile {
    pub fn new(category: TankCategory, pump_pit: bool) -> Self {
        TankProfile { category, pump_pit }
    }
}

impl Default for TankProfile {
    fn default() -> Self {
        TankProfile::new(TankCategory::Standard, false)
    }
}

/// Explicit per-id classification that bypasses pattern matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    pub category: TankCategory,

    /// Pump-pit flag; falls back to the pump-pit table when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_pit: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&TankCategory::DwallAnchoredPrimary).unwrap(),
            "\"dwall_anchored_primary\""
        );
        assert_eq!(
            serde_json::from_str::<TankCategory>("\"limited_no_anchors\"").unwrap(),
            TankCategory::LimitedNoAnchors
        );
    }

    #[test]
    fn test_override_without_pump_pit() {
        let parsed: CategoryOverride = serde_json::from_str(r#"{"category": "standard"}"#).unwrap();
        assert_eq!(parsed.category, TankCategory::Standard);
        assert!(parsed.pump_pit.is_none());
    }

    #[test]
    fn test_profile_default_is_standard() {
        let profile = TankProfile::default();
        assert_eq!(profile.category, TankCategory::Standard);
        assert!(!profile.pump_pit);
    }
}
