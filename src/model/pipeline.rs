// src/model/pipeline.rs

use crate::error::SimError;
use crate::model::day_buffer;

/// Per-day inbound quantities for a fixed horizon.
///
/// An order placed on day `d` with lead time `L` lands in slot `d + L`.
/// Anything that would land on or after the horizon is dropped.
#[derive(Debug, Clone)]
pub struct ShipmentSchedule {
    arrivals: Vec<f64>,
}

impl ShipmentSchedule {
    pub fn new(horizon: usize) -> Result<Self, SimError> {
        let mut arrivals = day_buffer(horizon, "shipment schedule")?;
        arrivals.resize(horizon, 0.0);
        Ok(Self { arrivals })
    }

    /// Books `quantity` to arrive `lead_time` days after `day`.
    ///
    /// Returns the arrival day, or `None` when it falls outside the horizon.
    pub fn schedule(&mut self, day: usize, lead_time: usize, quantity: f64) -> Option<usize> {
        let arrival = day.checked_add(lead_time)?;
        let slot = self.arrivals.get_mut(arrival)?;
        *slot += quantity;
        Some(arrival)
    }

    /// Quantity landing on `day` (0 outside the horizon).
    pub fn arrival(&self, day: usize) -> f64 {
        self.arrivals.get(day).copied().unwrap_or(0.0)
    }
}
