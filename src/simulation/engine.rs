// src/simulation/engine.rs

use crate::error::SimError;
use crate::model::day_buffer;
use crate::model::pipeline::ShipmentSchedule;
use crate::model::records::{DayRecord, DemandSeries, OrderEvent, SimulationResult};
use crate::simulation::config::SimulationConfig;
use crate::strategy::implementations::policy_for;
use crate::strategy::traits::ReorderPolicy;
use tracing::{debug, trace};

/// Day-by-day state machine for one run.
///
/// At most one order is ever in flight: while `order_outstanding` is set,
/// the policy is not consulted at all.
pub struct InventorySimulation<'a> {
    config: &'a SimulationConfig,
    demand: &'a DemandSeries,
    policy: Box<dyn ReorderPolicy>,

    shipments: ShipmentSchedule,
    order_outstanding: bool,
    current_day: usize,

    records: Vec<DayRecord>,
    orders: Vec<OrderEvent>,
}

impl<'a> InventorySimulation<'a> {
    /// Builds a run using the policy named in `config`.
    pub fn new(config: &'a SimulationConfig, demand: &'a DemandSeries) -> Result<Self, SimError> {
        Self::with_policy(config, demand, policy_for(config))
    }

    pub fn with_policy(
        config: &'a SimulationConfig,
        demand: &'a DemandSeries,
        policy: Box<dyn ReorderPolicy>,
    ) -> Result<Self, SimError> {
        config.validate()?;
        if demand.len() != config.days {
            return Err(SimError::Runtime(format!(
                "demand series has {} days but the horizon is {}",
                demand.len(),
                config.days
            )));
        }

        Ok(Self {
            config,
            demand,
            policy,
            shipments: ShipmentSchedule::new(config.days)?,
            order_outstanding: false,
            current_day: 0,
            records: day_buffer(config.days, "day table")?,
            orders: Vec::new(),
        })
    }

    /// Runs every day of the horizon and hands back the result.
    pub fn run(mut self) -> SimulationResult {
        while self.current_day < self.config.days {
            self.step();
        }

        let served: u32 = self.records.iter().map(|r| u32::from(r.service_level)).sum();
        let average_service_level = f64::from(served) / self.records.len() as f64;

        SimulationResult {
            records: self.records,
            orders: self.orders,
            average_service_level,
        }
    }

    fn step(&mut self) {
        let day = self.current_day;
        let lead_time = self.config.lead_time;
        let demand = self.demand.values()[day];

        // 1. Receive and consume
        let previous = self.records.last().map_or(0.0, |r| r.on_hand);
        let on_hand = if day >= lead_time {
            previous + self.shipments.arrival(day) - demand
        } else {
            previous - demand
        };

        // 2. Reorder, only with nothing in flight
        if !self.order_outstanding {
            if let Some(quantity) = self.policy.decide(day, on_hand) {
                let arrival_day = self.shipments.schedule(day, lead_time, quantity);
                debug!(day, on_hand, quantity, ?arrival_day, "order placed");
                self.orders.push(OrderEvent {
                    day_placed: day,
                    quantity,
                    arrival_day,
                });
                self.order_outstanding = true;
            }
        } else if self.policy.reviews_on(day) && on_hand < self.policy.reorder_point() {
            trace!(day, on_hand, "reorder suppressed, order already outstanding");
        }

        // 3. Any positive arrival clears the flag
        let in_shipment = self.shipments.arrival(day);
        if self.order_outstanding && day >= lead_time && in_shipment > 0.0 {
            self.order_outstanding = false;
        }

        // 4. Record
        self.records.push(DayRecord {
            day,
            demand,
            on_hand,
            in_shipment,
            service_level: u8::from(on_hand >= 0.0),
        });
        self.current_day += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::PolicyKind;

    fn config(
        days: usize,
        reorder_point: f64,
        order_quantity: f64,
        lead_time: usize,
    ) -> SimulationConfig {
        SimulationConfig {
            mean: 50.0,
            std_dev: 0.0,
            days,
            reorder_point,
            order_quantity,
            lead_time,
            ..SimulationConfig::default()
        }
    }

    fn run(config: &SimulationConfig, demand: Vec<f64>) -> SimulationResult {
        let demand = DemandSeries::new(demand);
        InventorySimulation::new(config, &demand).unwrap().run()
    }

    #[test]
    fn constant_demand_scenario() {
        let config = config(6, 20.0, 100.0, 2);
        let result = run(&config, vec![50.0; 6]);

        assert_eq!(result.on_hand(), vec![-50.0, -100.0, -50.0, -100.0, -150.0, -100.0]);
        assert_eq!(
            result.orders,
            vec![
                OrderEvent { day_placed: 0, quantity: 100.0, arrival_day: Some(2) },
                OrderEvent { day_placed: 3, quantity: 100.0, arrival_day: Some(5) },
            ]
        );
        assert_eq!(result.in_shipment(), vec![0.0, 0.0, 100.0, 0.0, 0.0, 100.0]);
        assert_eq!(result.average_service_level, 0.0);
    }

    #[test]
    fn second_trigger_is_suppressed_while_outstanding() {
        // Stock stays below the reorder point the whole time, but the first
        // order has not landed until day 4.
        let config = config(6, 100.0, 10.0, 4);
        let result = run(&config, vec![5.0; 6]);
        assert_eq!(result.orders.len(), 2);
        assert_eq!(result.orders[0].day_placed, 0);
        assert_eq!(result.orders[1].day_placed, 5);
        assert_eq!(result.orders[1].arrival_day, None);
    }

    #[test]
    fn order_past_horizon_is_recorded_but_never_arrives() {
        let config = config(3, 0.0, 50.0, 5);
        let result = run(&config, vec![10.0; 3]);
        assert_eq!(result.orders.len(), 1);
        assert_eq!(result.orders[0].arrival_day, None);
        assert!(result.in_shipment().iter().all(|&q| q == 0.0));
        assert_eq!(result.on_hand(), vec![-10.0, -20.0, -30.0]);
    }

    #[test]
    fn zero_lead_time_shipment_shows_same_day_but_is_not_stocked() {
        // With no lead time the order lands in today's slot after today's
        // balance is already computed, and the flag clears immediately.
        let config = config(3, 0.0, 100.0, 0);
        let result = run(&config, vec![10.0; 3]);
        assert_eq!(result.in_shipment(), vec![100.0, 100.0, 100.0]);
        assert_eq!(result.on_hand(), vec![-10.0, -20.0, -30.0]);
        assert_eq!(result.orders.len(), 3);
    }

    #[test]
    fn periodic_review_waits_for_review_day() {
        let config = SimulationConfig {
            policy: PolicyKind::PeriodicReview,
            ..config(25, 0.0, 100.0, 1)
        };
        // Stock dips negative on day 1 but the next review is day 10.
        let mut demand = vec![0.0; 25];
        demand[1] = 10.0;
        let result = run(&config, demand);

        let days: Vec<usize> = result.orders.iter().map(|o| o.day_placed).collect();
        assert_eq!(days, vec![10]);
        assert_eq!(result.records[11].in_shipment, 100.0);
        assert_eq!(result.records[11].on_hand, 90.0);
    }

    #[test]
    fn full_service_when_stock_never_negative() {
        let config = config(5, -1.0, 10.0, 1);
        let result = run(&config, vec![0.0, -2.0, 0.0, 1.0, 0.5]);
        assert_eq!(result.average_service_level, 1.0);
        assert!(result.orders.is_empty());
    }

    #[test]
    fn negative_demand_adds_stock() {
        let config = config(2, -100.0, 10.0, 0);
        let result = run(&config, vec![-5.0, -5.0]);
        assert_eq!(result.on_hand(), vec![5.0, 10.0]);
    }

    #[test]
    fn mismatched_demand_length_is_runtime_error() {
        let config = config(4, 0.0, 10.0, 1);
        let demand = DemandSeries::new(vec![1.0; 3]);
        let err = InventorySimulation::new(&config, &demand).err().unwrap();
        assert!(matches!(err, SimError::Runtime(_)));
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = config(4, 0.0, -10.0, 1);
        let demand = DemandSeries::new(vec![1.0; 4]);
        let err = InventorySimulation::new(&config, &demand).err().unwrap();
        assert!(err.is_config());
    }
}
