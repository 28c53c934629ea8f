// src/model/records.rs

use serde::Serialize;

/// Daily demand values, one per simulated day.
///
/// Normal draws are kept exactly as sampled, including negative values.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSeries {
    values: Vec<f64>,
}

impl DemandSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for DemandSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// One row of the output table. Field names serialize to the CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    #[serde(rename = "Day")]
    pub day: usize,
    #[serde(rename = "Demand")]
    pub demand: f64,
    #[serde(rename = "On Hand")]
    pub on_hand: f64,
    #[serde(rename = "In Shipment")]
    pub in_shipment: f64,
    /// 1 when on-hand stock was non-negative at the end of the day.
    #[serde(rename = "Service Level")]
    pub service_level: u8,
}

/// A reorder placed by the policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderEvent {
    #[serde(rename = "Day Placed")]
    pub day_placed: usize,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    /// `None` when the shipment would land beyond the horizon.
    #[serde(rename = "Arrival Day")]
    pub arrival_day: Option<usize>,
}

/// Output of one run: the day table, every order placed and the
/// average service level.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub records: Vec<DayRecord>,
    pub orders: Vec<OrderEvent>,
    pub average_service_level: f64,
}

/// Scalar digest of a run, used for notifications and batch reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub average_service_level: f64,
    pub stockout_days: usize,
    pub orders_placed: usize,
    pub orders_received: usize,
    pub final_on_hand: f64,
    pub min_on_hand: f64,
}

impl SimulationResult {
    pub fn days(&self) -> usize {
        self.records.len()
    }

    pub fn demand(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.demand).collect()
    }

    pub fn on_hand(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.on_hand).collect()
    }

    pub fn in_shipment(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.in_shipment).collect()
    }

    /// Days that ended with negative on-hand stock.
    pub fn stockout_days(&self) -> usize {
        self.records.iter().filter(|r| r.service_level == 0).count()
    }

    pub fn summary(&self) -> RunSummary {
        let final_on_hand = self.records.last().map_or(0.0, |r| r.on_hand);
        let min_on_hand = self
            .records
            .iter()
            .map(|r| r.on_hand)
            .fold(f64::INFINITY, f64::min);

        RunSummary {
            average_service_level: self.average_service_level,
            stockout_days: self.stockout_days(),
            orders_placed: self.orders.len(),
            orders_received: self
                .orders
                .iter()
                .filter(|o| o.arrival_day.is_some())
                .count(),
            final_on_hand,
            min_on_hand: if min_on_hand.is_finite() {
                min_on_hand
            } else {
                0.0
            },
        }
    }
}
