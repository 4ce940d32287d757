//! Pricing-page plan comparison: feature/limit matrix, category grouping and
//! the recommended-plan heuristic.
//!
//! Pure derivation over immutable plan snapshots. The caller loads the plan
//! set (and an optional list of feature keys to surface first) and gets back
//! a single JSON-serializable payload for the pricing page.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use uuid::Uuid;

use crate::application::catalog;
use crate::domain::entities::billing_interval::BillingInterval;
use crate::domain::entities::plan::{Plan, PlanPrice, UNLIMITED};

const REASON_MOST_POPULAR: &str = "Most popular choice";
const REASON_BEST_VALUE: &str = "Best value for money";

// ============================================================================
// Response Types
// ============================================================================

/// Everything the pricing page needs, in one response body.
#[derive(Debug, Clone, Serialize)]
pub struct PlanComparisonResponse {
    pub plans: Vec<PlanSummary>,
    pub comparison_matrix: ComparisonMatrix,
    /// Union of every plan's feature keys, alphabetical.
    pub all_features: Vec<String>,
    /// Union of every plan's limit keys, alphabetical.
    pub all_limits: Vec<String>,
    pub feature_categories: Vec<FeatureCategoryGroup>,
    pub recommended_plan: Option<RecommendedPlan>,
}

/// Public serialization of a plan for the pricing page.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: PlanPrice,
    /// Monthly-equivalent price, for "per month, billed yearly" display.
    pub monthly_price: PlanPrice,
    pub currency: String,
    pub billing_interval: BillingInterval,
    pub trial_days: i32,
    pub features: Vec<String>,
    pub limits: BTreeMap<String, i64>,
    pub is_popular: bool,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name.clone(),
            slug: plan.slug.clone(),
            description: plan.description.clone(),
            price: plan.price,
            monthly_price: PlanPrice::from_cents(plan.monthly_price_cents()),
            currency: plan.currency.clone(),
            billing_interval: plan.billing_interval,
            trial_days: plan.trial_days,
            features: plan.features.clone(),
            limits: plan.limits.clone(),
            is_popular: plan.is_popular,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonMatrix {
    pub features: Vec<FeatureRow>,
    pub limits: Vec<LimitRow>,
}

/// One feature across every plan. Rows follow the highlight-first ordering;
/// cells follow plan input order.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: String,
    pub plans: Vec<FeaturePlanCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturePlanCell {
    pub plan_id: Uuid,
    pub plan_slug: String,
    pub has_feature: bool,
    pub is_highlighted: bool,
}

/// One limit across every plan, alphabetical; cells follow plan input order.
#[derive(Debug, Clone, Serialize)]
pub struct LimitRow {
    pub name: String,
    pub display_name: String,
    pub unit: String,
    pub plans: Vec<LimitPlanCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LimitPlanCell {
    pub plan_id: Uuid,
    pub plan_slug: String,
    pub value: i64,
    pub is_unlimited: bool,
    pub display_value: String,
    pub is_highlighted: bool,
}

/// Features grouped by catalog category, in first-encounter order.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCategoryGroup {
    pub name: String,
    pub display_name: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecommendedPlan {
    pub plan_id: Uuid,
    pub plan_slug: String,
    pub reason: String,
}

// ============================================================================
// Comparison
// ============================================================================

/// Builds the full plan comparison payload from a set of plan snapshots.
///
/// `highlight_features` moves the named feature keys to the top of the
/// matrix; within the highlighted block and the remainder, features stay
/// alphabetical. Plans appear in input order everywhere. The function is
/// pure and never fails; an empty plan set yields empty collections and no
/// recommendation.
pub fn compare_plans(plans: &[Plan], highlight_features: &[String]) -> PlanComparisonResponse {
    let all_features = collect_feature_names(plans);
    let all_limits = collect_limit_names(plans);

    let ordered_features = order_features(&all_features, highlight_features);

    let feature_rows = ordered_features
        .iter()
        .map(|feature| feature_row(feature, plans))
        .collect();
    let limit_rows = all_limits
        .iter()
        .map(|limit| limit_row(limit, plans))
        .collect();

    PlanComparisonResponse {
        plans: plans.iter().map(PlanSummary::from).collect(),
        comparison_matrix: ComparisonMatrix {
            features: feature_rows,
            limits: limit_rows,
        },
        feature_categories: group_by_category(&ordered_features),
        recommended_plan: recommend_plan(plans),
        all_features,
        all_limits,
    }
}

/// Deduplicated union of every plan's feature keys, sorted
/// byte-lexicographically.
fn collect_feature_names(plans: &[Plan]) -> Vec<String> {
    plans
        .iter()
        .flat_map(|plan| plan.features.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Deduplicated union of every plan's limit keys, sorted
/// byte-lexicographically.
fn collect_limit_names(plans: &[Plan]) -> Vec<String> {
    plans
        .iter()
        .flat_map(|plan| plan.limits.keys().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Highlighted features first, then the rest. Both halves keep the
/// alphabetical order of `sorted`.
fn order_features(sorted: &[String], highlight: &[String]) -> Vec<String> {
    if highlight.is_empty() {
        return sorted.to_vec();
    }

    let (highlighted, rest): (Vec<String>, Vec<String>) = sorted
        .iter()
        .cloned()
        .partition(|feature| highlight.iter().any(|h| h == feature));

    highlighted.into_iter().chain(rest).collect()
}

fn feature_row(feature: &str, plans: &[Plan]) -> FeatureRow {
    let cells = plans
        .iter()
        .map(|plan| {
            let has_feature = plan.has_feature(feature);
            FeaturePlanCell {
                plan_id: plan.id,
                plan_slug: plan.slug.clone(),
                has_feature,
                is_highlighted: plan.is_popular && has_feature,
            }
        })
        .collect();

    FeatureRow {
        name: feature.to_string(),
        display_name: catalog::title_case(feature),
        description: catalog::feature_description(feature),
        category: catalog::feature_category(feature),
        plans: cells,
    }
}

fn limit_row(limit: &str, plans: &[Plan]) -> LimitRow {
    let cells = plans
        .iter()
        .map(|plan| {
            let value = plan.limit(limit).unwrap_or(0);
            let is_unlimited = value == UNLIMITED;
            LimitPlanCell {
                plan_id: plan.id,
                plan_slug: plan.slug.clone(),
                value,
                is_unlimited,
                display_value: if is_unlimited {
                    "Unlimited".to_string()
                } else {
                    format_limit_value(value, limit)
                },
                is_highlighted: plan.is_popular,
            }
        })
        .collect();

    LimitRow {
        name: limit.to_string(),
        display_name: catalog::limit_label(limit),
        unit: catalog::limit_unit(limit),
        plans: cells,
    }
}

/// Human-friendly rendering for large limit values. The unlimited sentinel
/// never reaches this function.
fn format_limit_value(value: i64, limit: &str) -> String {
    match limit {
        "max_storage_mb" if value >= 1024 => format!("{:.1}GB", value as f64 / 1024.0),
        "max_api_calls_per_month" if value >= 1_000_000 => {
            format!("{:.1}M", value as f64 / 1_000_000.0)
        }
        _ => value.to_string(),
    }
}

/// Groups the ordered feature list by catalog category, keeping categories
/// in first-encounter order.
fn group_by_category(ordered_features: &[String]) -> Vec<FeatureCategoryGroup> {
    let mut groups: Vec<FeatureCategoryGroup> = Vec::new();

    for feature in ordered_features {
        let category = catalog::feature_category(feature);
        match groups.iter_mut().find(|group| group.name == category) {
            Some(group) => group.features.push(feature.clone()),
            None => groups.push(FeatureCategoryGroup {
                display_name: catalog::category_label(&category),
                name: category,
                features: vec![feature.clone()],
            }),
        }
    }

    groups
}

/// Picks the plan the pricing page should point at: the first popular plan
/// in input order, or failing that the middle plan of the price-sorted list
/// (upper-middle for even counts).
fn recommend_plan(plans: &[Plan]) -> Option<RecommendedPlan> {
    if let Some(popular) = plans.iter().find(|plan| plan.is_popular) {
        tracing::debug!(plan = %popular.slug, "recommending most popular plan");
        return Some(RecommendedPlan {
            plan_id: popular.id,
            plan_slug: popular.slug.clone(),
            reason: REASON_MOST_POPULAR.to_string(),
        });
    }

    if plans.is_empty() {
        return None;
    }

    let mut by_price: Vec<&Plan> = plans.iter().collect();
    by_price.sort_by_key(|plan| plan.price);
    let middle = by_price[by_price.len() / 2];

    tracing::debug!(plan = %middle.slug, "recommending middle-priced plan");
    Some(RecommendedPlan {
        plan_id: middle.id,
        plan_slug: middle.slug.clone(),
        reason: REASON_BEST_VALUE.to_string(),
    })
}
