use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Billing cadence for a subscription plan.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BillingInterval {
    #[default]
    Month,
    Year,
}

impl BillingInterval {
    /// Number of calendar months covered by one billing period.
    pub fn months_per_period(&self) -> u32 {
        match self {
            BillingInterval::Month => 1,
            BillingInterval::Year => 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let interval = BillingInterval::Year;
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, r#""year""#);

        let parsed: BillingInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, interval);
    }

    #[test]
    fn test_unknown_interval_rejected() {
        let result: Result<BillingInterval, _> = serde_json::from_str(r#""week""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            "month".parse::<BillingInterval>().unwrap(),
            BillingInterval::Month
        );
        assert_eq!(
            "Year".parse::<BillingInterval>().unwrap(),
            BillingInterval::Year
        );
        assert!("quarter".parse::<BillingInterval>().is_err());
    }

    #[test]
    fn test_display_matches_as_ref() {
        for variant in [BillingInterval::Month, BillingInterval::Year] {
            assert_eq!(format!("{}", variant), variant.as_ref());
        }
    }

    #[test]
    fn test_months_per_period() {
        assert_eq!(BillingInterval::Month.months_per_period(), 1);
        assert_eq!(BillingInterval::Year.months_per_period(), 12);
    }
}
