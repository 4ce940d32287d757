pub mod plan_comparison;
