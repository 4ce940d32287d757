//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible
//! defaults. Use the closure parameter to override specific fields as needed.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::entities::billing_interval::BillingInterval;
use crate::domain::entities::plan::{Plan, PlanPrice};

/// Create a test plan with sensible defaults.
pub fn create_test_plan(overrides: impl FnOnce(&mut Plan)) -> Plan {
    let mut plan = Plan {
        id: Uuid::new_v4(),
        name: "Basic Plan".to_string(),
        slug: "basic".to_string(),
        description: Some("A basic subscription plan".to_string()),
        price: PlanPrice::from_cents(999),
        currency: "usd".to_string(),
        billing_interval: BillingInterval::Month,
        trial_days: 0,
        features: vec!["time_tracking".to_string(), "data_export".to_string()],
        limits: [
            ("max_boards".to_string(), 10),
            ("max_storage_mb".to_string(), 512),
        ]
        .into_iter()
        .collect(),
        is_popular: false,
        created_at: Some(test_datetime()),
        updated_at: Some(test_datetime()),
    };
    overrides(&mut plan);
    plan
}

/// Returns a consistent test datetime (2024-01-15 12:00:00 UTC).
pub fn test_datetime() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_plan_with_defaults() {
        let plan = create_test_plan(|_| {});
        assert_eq!(plan.slug, "basic");
        assert_eq!(plan.price.cents(), 999);
        assert!(plan.has_feature("time_tracking"));
        assert_eq!(plan.limit("max_boards"), Some(10));
        assert!(!plan.is_popular);
    }

    #[test]
    fn test_create_plan_with_overrides() {
        let plan = create_test_plan(|p| {
            p.slug = "enterprise".to_string();
            p.price = PlanPrice::from_cents(19900);
            p.billing_interval = BillingInterval::Year;
            p.is_popular = true;
        });
        assert_eq!(plan.slug, "enterprise");
        assert_eq!(plan.price.cents(), 19900);
        assert_eq!(plan.billing_interval, BillingInterval::Year);
        assert!(plan.is_popular);
    }
}
