// src/lib.rs

//! Single-item inventory control simulation.
//!
//! Daily demand is drawn from a normal or Poisson distribution and fed
//! through a day-by-day stock loop driven by an (s, Q) or (R, s, S)
//! reorder policy. Each run yields a day table, the orders placed and the
//! average service level.
//!
//! ```ignore
//! use inventory_sim::simulation::{config::SimulationConfig, simulate};
//!
//! let result = simulate(&SimulationConfig::default(), Some(42))?;
//! println!("service level: {:.2}", result.average_service_level);
//! ```

pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{ConfigError, ReportError, SimError};
pub use model::records::{DayRecord, DemandSeries, OrderEvent, RunSummary, SimulationResult};
pub use simulation::config::{DemandDistribution, PolicyKind, SimulationConfig, SimulationInput};
pub use simulation::{simulate, simulate_demand, simulate_with_rng};
