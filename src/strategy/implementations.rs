// src/strategy/implementations.rs

use crate::simulation::config::{PolicyKind, SimulationConfig, REVIEW_INTERVAL};
use crate::strategy::traits::ReorderPolicy;

// =========================================================================
// 1. Continuous Review (s, Q)
// =========================================================================

/// Reviews stock every day and orders `Q` whenever on-hand drops below `s`.
#[derive(Debug, Clone)]
pub struct ContinuousReviewPolicy {
    reorder_point: f64,
    order_quantity: f64,
}

impl ContinuousReviewPolicy {
    pub fn new(reorder_point: f64, order_quantity: f64) -> Self {
        Self {
            reorder_point,
            order_quantity,
        }
    }
}

impl ReorderPolicy for ContinuousReviewPolicy {
    fn reviews_on(&self, _day: usize) -> bool {
        true
    }

    fn reorder_point(&self) -> f64 {
        self.reorder_point
    }

    fn order_quantity(&self) -> f64 {
        self.order_quantity
    }
}

// =========================================================================
// 2. Periodic Review (R, s, S)
// =========================================================================

/// Reviews stock only on days that are a multiple of the review interval
/// (day 0 included), then applies the same reorder rule as (s, Q).
#[derive(Debug, Clone)]
pub struct PeriodicReviewPolicy {
    review_interval: usize,
    reorder_point: f64,
    order_quantity: f64,
}

impl PeriodicReviewPolicy {
    pub fn new(reorder_point: f64, order_quantity: f64) -> Self {
        Self::with_interval(REVIEW_INTERVAL, reorder_point, order_quantity)
    }

    /// An interval of 0 is treated as 1 (review every day).
    pub fn with_interval(review_interval: usize, reorder_point: f64, order_quantity: f64) -> Self {
        Self {
            review_interval: review_interval.max(1),
            reorder_point,
            order_quantity,
        }
    }

    pub fn review_interval(&self) -> usize {
        self.review_interval
    }
}

impl ReorderPolicy for PeriodicReviewPolicy {
    fn reviews_on(&self, day: usize) -> bool {
        day % self.review_interval == 0
    }

    fn reorder_point(&self) -> f64 {
        self.reorder_point
    }

    fn order_quantity(&self) -> f64 {
        self.order_quantity
    }
}

/// Builds the policy named by `config.policy`.
pub fn policy_for(config: &SimulationConfig) -> Box<dyn ReorderPolicy> {
    match config.policy {
        PolicyKind::ContinuousReview => Box::new(ContinuousReviewPolicy::new(
            config.reorder_point,
            config.order_quantity,
        )),
        PolicyKind::PeriodicReview => Box::new(PeriodicReviewPolicy::new(
            config.reorder_point,
            config.order_quantity,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_orders_below_reorder_point() {
        let policy = ContinuousReviewPolicy::new(20.0, 100.0);
        assert_eq!(policy.decide(3, 19.9), Some(100.0));
        assert_eq!(policy.decide(3, 20.0), None);
        assert_eq!(policy.decide(7, -50.0), Some(100.0));
    }

    #[test]
    fn periodic_only_reviews_on_interval_days() {
        let policy = PeriodicReviewPolicy::new(20.0, 100.0);
        assert_eq!(policy.review_interval(), 10);
        assert_eq!(policy.decide(0, -1.0), Some(100.0));
        assert_eq!(policy.decide(10, -1.0), Some(100.0));
        for day in 1..10 {
            assert_eq!(policy.decide(day, -1_000.0), None);
        }
        assert_eq!(policy.decide(20, 25.0), None);
    }

    #[test]
    fn zero_interval_reviews_daily() {
        let policy = PeriodicReviewPolicy::with_interval(0, 5.0, 10.0);
        assert!(policy.reviews_on(7));
    }

    #[test]
    fn policy_for_follows_config() {
        let config = SimulationConfig {
            policy: PolicyKind::PeriodicReview,
            ..SimulationConfig::default()
        };
        let policy = policy_for(&config);
        assert!(!policy.reviews_on(5));
        assert_eq!(policy.order_quantity(), config.order_quantity);

        let policy = policy_for(&SimulationConfig::default());
        assert!(policy.reviews_on(5));
    }
}
