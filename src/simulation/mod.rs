pub mod batch;
pub mod config;
pub mod engine;

use crate::error::SimError;
use crate::io::demand::{generate_for, rng_for};
use crate::model::records::{DemandSeries, SimulationResult};
use config::SimulationConfig;
use engine::InventorySimulation;
use rand::Rng;
use tracing::info;

/// Runs the inventory loop over an already generated demand series.
pub fn simulate_demand(
    config: &SimulationConfig,
    demand: &DemandSeries,
) -> Result<SimulationResult, SimError> {
    Ok(InventorySimulation::new(config, demand)?.run())
}

/// Validates `config`, draws demand from `rng` and runs the loop.
///
/// Returns the demand series alongside the result so callers can audit
/// exactly what was simulated.
pub fn simulate_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<(DemandSeries, SimulationResult), SimError> {
    config.validate()?;
    let demand = generate_for(config, rng)?;
    let result = simulate_demand(config, &demand)?;

    info!(
        days = config.days,
        policy = %config.policy,
        distribution = %config.distribution,
        orders = result.orders.len(),
        service_level = result.average_service_level,
        "simulation finished"
    );
    Ok((demand, result))
}

/// Pure entry point: same config and seed always give the same result.
/// Without a seed the demand is drawn from OS entropy.
pub fn simulate(
    config: &SimulationConfig,
    seed: Option<u64>,
) -> Result<SimulationResult, SimError> {
    let mut rng = rng_for(seed);
    simulate_with_rng(config, &mut rng).map(|(_, result)| result)
}
