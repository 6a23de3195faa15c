// ── Bandwidth policy types ──
//
// A client's stored limit is either one of five named tiers (the wire
// carries short tokens like "vlow") or a manual positive-integer Mbps
// override (the wire carries a bare number). The resolver maps stored
// values to the selector state the UI needs, and validates edits before
// anything is persisted.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::error::CoreError;

/// The five named bandwidth policy tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum BandwidthTier {
    VeryLow,
    Low,
    Standard,
    High,
    Unlimited,
}

impl BandwidthTier {
    /// The token stored by the backend.
    pub fn token(self) -> &'static str {
        match self {
            Self::VeryLow => "vlow",
            Self::Low => "low",
            Self::Standard => "standard",
            Self::High => "high",
            Self::Unlimited => "unlimited",
        }
    }

    /// Parse a stored token. Unknown tokens resolve to `None` so the
    /// caller can fall back to [`BandwidthTier::Standard`].
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "vlow" => Some(Self::VeryLow),
            "low" => Some(Self::Low),
            "standard" => Some(Self::Standard),
            "high" => Some(Self::High),
            "unlimited" => Some(Self::Unlimited),
            _ => None,
        }
    }

    /// Rate cap in Mbps; `None` for the unlimited tier.
    pub fn mbps(self) -> Option<u32> {
        match self {
            Self::VeryLow => Some(2),
            Self::Low => Some(10),
            Self::Standard => Some(25),
            Self::High => Some(100),
            Self::Unlimited => None,
        }
    }

    /// Human label for selectors and tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low (2 Mbps)",
            Self::Low => "Low (10 Mbps)",
            Self::Standard => "Standard (25 Mbps)",
            Self::High => "High (100 Mbps)",
            Self::Unlimited => "Unlimited",
        }
    }
}

impl fmt::Display for BandwidthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A client's stored bandwidth policy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandwidthLimit {
    Tier(BandwidthTier),
    /// Manual override in Mbps. Always > 0.
    ManualMbps(u32),
}

impl BandwidthLimit {
    /// Decode a stored wire value: a bare positive number is a manual
    /// override, a known token is a tier, anything else is unusable and
    /// resolves to `None` (the caller defaults to standard).
    pub fn from_wire(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_u64()
                .filter(|&n| n > 0)
                .and_then(|n| u32::try_from(n).ok())
                .map(Self::ManualMbps),
            serde_json::Value::String(s) => BandwidthTier::from_token(s).map(Self::Tier),
            _ => None,
        }
    }

    /// Encode for the PATCH body: tier token as a string, manual
    /// override as a bare number.
    pub fn to_wire(self) -> serde_json::Value {
        match self {
            Self::Tier(tier) => serde_json::Value::from(tier.token()),
            Self::ManualMbps(mbps) => serde_json::Value::from(mbps),
        }
    }
}

impl fmt::Display for BandwidthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(tier) => f.write_str(tier.token()),
            Self::ManualMbps(mbps) => write!(f, "{mbps} Mbps"),
        }
    }
}

/// What the bandwidth selector shows for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandwidthSelection {
    pub selected: TierChoice,
    /// Populated exactly when `selected` is [`TierChoice::Custom`]; the
    /// companion numeric field stays hidden otherwise.
    pub manual_mbps: Option<u32>,
}

impl BandwidthSelection {
    pub fn is_manual(self) -> bool {
        matches!(self.selected, TierChoice::Custom)
    }
}

/// One selector position: a named tier or the manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierChoice {
    Tier(BandwidthTier),
    Custom,
}

/// Resolve a stored limit to selector state.
///
/// A numeric override selects "custom" and reveals the companion field;
/// a known tier token passes through; absent or unrecognized values
/// default to the standard tier.
pub fn resolve_display(limit: Option<BandwidthLimit>) -> BandwidthSelection {
    match limit {
        Some(BandwidthLimit::ManualMbps(mbps)) => BandwidthSelection {
            selected: TierChoice::Custom,
            manual_mbps: Some(mbps),
        },
        Some(BandwidthLimit::Tier(tier)) => BandwidthSelection {
            selected: TierChoice::Tier(tier),
            manual_mbps: None,
        },
        None => BandwidthSelection {
            selected: TierChoice::Tier(BandwidthTier::Standard),
            manual_mbps: None,
        },
    }
}

/// Validate a selector edit into a persistable limit.
///
/// Choosing "custom" requires a parseable integer greater than zero in
/// the companion field; anything else is rejected here and no request is
/// sent. Tier selections need no further input.
pub fn apply_edit(
    selection: TierChoice,
    manual_input: Option<&str>,
) -> Result<BandwidthLimit, CoreError> {
    match selection {
        TierChoice::Tier(tier) => Ok(BandwidthLimit::Tier(tier)),
        TierChoice::Custom => {
            let raw = manual_input.unwrap_or("").trim();
            let mbps: u32 = raw.parse().map_err(|_| CoreError::Validation {
                field: "bandwidth".into(),
                reason: format!("manual limit must be a whole number of Mbps, got {raw:?}"),
            })?;
            if mbps == 0 {
                return Err(CoreError::Validation {
                    field: "bandwidth".into(),
                    reason: "manual limit must be greater than zero".into(),
                });
            }
            Ok(BandwidthLimit::ManualMbps(mbps))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_limit_resolves_to_custom_with_visible_field() {
        let sel = resolve_display(Some(BandwidthLimit::ManualMbps(15)));
        assert_eq!(sel.selected, TierChoice::Custom);
        assert_eq!(sel.manual_mbps, Some(15));
        assert!(sel.is_manual());
    }

    #[test]
    fn tier_limit_passes_through_with_hidden_field() {
        let sel = resolve_display(Some(BandwidthLimit::Tier(BandwidthTier::Low)));
        assert_eq!(sel.selected, TierChoice::Tier(BandwidthTier::Low));
        assert_eq!(sel.manual_mbps, None);
        assert!(!sel.is_manual());
    }

    #[test]
    fn absent_limit_defaults_to_standard() {
        let sel = resolve_display(None);
        assert_eq!(sel.selected, TierChoice::Tier(BandwidthTier::Standard));
        assert!(!sel.is_manual());
    }

    #[test]
    fn unknown_wire_token_is_dropped() {
        assert_eq!(BandwidthLimit::from_wire(&serde_json::json!("turbo")), None);
        // ... so the display layer falls back to standard.
        let sel = resolve_display(BandwidthLimit::from_wire(&serde_json::json!("turbo")));
        assert_eq!(sel.selected, TierChoice::Tier(BandwidthTier::Standard));
    }

    #[test]
    fn wire_round_trip_for_both_shapes() {
        let tier = BandwidthLimit::Tier(BandwidthTier::High);
        assert_eq!(BandwidthLimit::from_wire(&tier.to_wire()), Some(tier));

        let manual = BandwidthLimit::ManualMbps(75);
        assert_eq!(manual.to_wire(), serde_json::json!(75));
        assert_eq!(BandwidthLimit::from_wire(&manual.to_wire()), Some(manual));
    }

    #[test]
    fn apply_edit_custom_validates_input() {
        assert_eq!(
            apply_edit(TierChoice::Custom, Some("75")).expect("valid input"),
            BandwidthLimit::ManualMbps(75)
        );
        assert!(apply_edit(TierChoice::Custom, Some("0")).is_err());
        assert!(apply_edit(TierChoice::Custom, Some("-3")).is_err());
        assert!(apply_edit(TierChoice::Custom, Some("fast")).is_err());
        assert!(apply_edit(TierChoice::Custom, None).is_err());
    }

    #[test]
    fn resolve_display_round_trips_apply_edit() {
        // Tier selection
        let limit = apply_edit(TierChoice::Tier(BandwidthTier::High), None).expect("tier edit");
        let sel = resolve_display(Some(limit));
        assert_eq!(sel.selected, TierChoice::Tier(BandwidthTier::High));

        // Manual selection reproduces both the choice and the value
        let limit = apply_edit(TierChoice::Custom, Some("75")).expect("manual edit");
        let sel = resolve_display(Some(limit));
        assert_eq!(sel.selected, TierChoice::Custom);
        assert_eq!(sel.manual_mbps, Some(75));
    }

    #[test]
    fn negative_wire_numbers_are_rejected() {
        assert_eq!(BandwidthLimit::from_wire(&serde_json::json!(-5)), None);
        assert_eq!(BandwidthLimit::from_wire(&serde_json::json!(0)), None);
    }
}
