// src/strategy/traits.rs

use std::fmt::Debug;

/// Decides when to reorder and how much.
///
/// The engine only asks a policy for a decision while no order is in
/// flight; the policy itself never sees the outstanding-order flag.
/// `Send` + `Sync` so batches can share policies across worker threads.
pub trait ReorderPolicy: Debug + Send + Sync {
    /// Whether stock is reviewed on `day`.
    fn reviews_on(&self, day: usize) -> bool;

    /// On-hand level below which an order is triggered.
    fn reorder_point(&self) -> f64;

    /// Fixed quantity placed per order.
    fn order_quantity(&self) -> f64;

    /// Quantity to order on `day` given end-of-day `on_hand`, if any.
    fn decide(&self, day: usize, on_hand: f64) -> Option<f64> {
        if self.reviews_on(day) && on_hand < self.reorder_point() {
            Some(self.order_quantity())
        } else {
            None
        }
    }
}
