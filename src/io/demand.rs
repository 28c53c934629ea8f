// src/io/demand.rs

use crate::error::{ConfigError, SimError};
use crate::model::day_buffer;
use crate::model::records::DemandSeries;
use crate::simulation::config::{DemandDistribution, SimulationConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Poisson};

/// Builds the generator for a run: seeded when a seed is given, otherwise
/// drawn from OS entropy.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws `days` i.i.d. daily demand values.
///
/// # Arguments
/// * `distribution` - Normal or Poisson.
/// * `mean`, `std_dev` - Normal parameters. Negative draws are kept as-is.
/// * `lambda` - Poisson rate. A rate of 0 yields all-zero demand.
/// * `days` - Length of the series.
/// * `rng` - Caller-owned generator; the same seed gives the same series.
///
/// Bad parameters are `SimError::Config`; a horizon too large to hold in
/// memory is `SimError::Runtime`.
pub fn generate_demand<R: Rng + ?Sized>(
    distribution: DemandDistribution,
    mean: f64,
    std_dev: f64,
    lambda: f64,
    days: usize,
    rng: &mut R,
) -> Result<DemandSeries, SimError> {
    let mut values = day_buffer(days, "demand series")?;
    match distribution {
        DemandDistribution::Normal => {
            if !std_dev.is_finite() || std_dev < 0.0 {
                return Err(ConfigError::invalid("std_dev", "must be a finite number >= 0").into());
            }
            let normal = Normal::new(mean, std_dev)
                .map_err(|e| ConfigError::invalid("std_dev", e.to_string()))?;
            values.extend(normal.sample_iter(rng).take(days));
        }
        DemandDistribution::Poisson => {
            if !lambda.is_finite() || lambda < 0.0 {
                return Err(ConfigError::invalid("lambda", "must be a finite number >= 0").into());
            }
            if lambda == 0.0 {
                values.resize(days, 0.0);
            } else {
                let poisson = Poisson::new(lambda)
                    .map_err(|e| ConfigError::invalid("lambda", e.to_string()))?;
                values.extend(poisson.sample_iter(rng).take(days));
            }
        }
    }

    Ok(DemandSeries::new(values))
}

/// Draws the demand series described by `config`.
pub fn generate_for<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<DemandSeries, SimError> {
    generate_demand(
        config.distribution,
        config.mean,
        config.std_dev,
        config.lambda,
        config.days,
        rng,
    )
}
