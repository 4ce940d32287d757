use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::application::app_error::AppError;
use crate::application::validators::is_valid_plan_slug;

use super::billing_interval::BillingInterval;

/// Sentinel limit value meaning "no ceiling".
pub const UNLIMITED: i64 = -1;

/// Immutable snapshot of a subscription plan as loaded by the caller.
///
/// `features` holds the capability keys the plan grants; `limits` maps
/// usage-ceiling keys to integer values, with [`UNLIMITED`] meaning no
/// ceiling. Collections absent from the wire form default to empty, and the
/// slug and price are validated while deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    #[serde(deserialize_with = "deserialize_slug")]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: PlanPrice,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub billing_interval: BillingInterval,
    #[serde(default)]
    pub trial_days: i32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub limits: BTreeMap<String, i64>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Plan {
    /// Whether this plan grants the given feature key.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// The plan's value for a limit key, if it defines one.
    pub fn limit(&self, limit: &str) -> Option<i64> {
        self.limits.get(limit).copied()
    }

    /// Whether the plan's value for a limit key is the unlimited sentinel.
    pub fn is_unlimited(&self, limit: &str) -> bool {
        self.limit(limit) == Some(UNLIMITED)
    }

    /// Monthly-equivalent price in cents, for "per month, billed yearly"
    /// style display. Divides as f64 to avoid integer precision loss on
    /// yearly prices that are not multiples of 12, then rounds.
    pub fn monthly_price_cents(&self) -> i64 {
        let months = i64::from(self.billing_interval.months_per_period());
        (self.price.cents() as f64 / months as f64).round() as i64
    }
}

fn default_currency() -> String {
    "usd".to_string()
}

fn deserialize_slug<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let slug = String::deserialize(deserializer)?;
    if !is_valid_plan_slug(&slug) {
        return Err(D::Error::custom(AppError::InvalidSlug(slug)));
    }
    Ok(slug)
}

/// Plan price in integer cents.
///
/// The wire form is a non-negative decimal string with at most two fraction
/// digits ("29.99", "10", "9.5"). Serialization always emits two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PlanPrice(i64);

impl PlanPrice {
    pub fn from_cents(cents: i64) -> Self {
        debug_assert!(cents >= 0, "plan price cannot be negative");
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_free(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for PlanPrice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || AppError::InvalidPrice(s.to_string());

        let (whole, frac) = match raw.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (raw, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_cents = if frac.is_empty() {
            0
        } else {
            let digits: i64 = frac.parse().map_err(|_| invalid())?;
            if frac.len() == 1 { digits * 10 } else { digits }
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac_cents))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for PlanPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for PlanPrice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlanPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
