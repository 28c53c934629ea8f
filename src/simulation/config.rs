// src/simulation/config.rs

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days between reorder reviews under the periodic (R,s,S) policy.
pub const REVIEW_INTERVAL: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandDistribution {
    #[default]
    Normal,
    Poisson,
}

impl FromStr for DemandDistribution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "poisson" => Ok(Self::Poisson),
            _ => Err(ConfigError::UnknownDistribution(s.to_string())),
        }
    }
}

impl fmt::Display for DemandDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Poisson => write!(f, "poisson"),
        }
    }
}

/// Which replenishment rule drives reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolicyKind {
    /// "s,Q": reorder evaluated every day.
    #[default]
    #[serde(rename = "s_Q", alias = "continuous")]
    ContinuousReview,
    /// "R,s,S": reorder evaluated every `REVIEW_INTERVAL` days.
    #[serde(rename = "R_s_S", alias = "periodic")]
    PeriodicReview,
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s_q" | "s,q" | "sq" | "continuous" => Ok(Self::ContinuousReview),
            "r_s_s" | "r,s,s" | "rss" | "periodic" => Ok(Self::PeriodicReview),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContinuousReview => write!(f, "s_Q"),
            Self::PeriodicReview => write!(f, "R_s_S"),
        }
    }
}

/// Everything a single run needs. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub distribution: DemandDistribution,
    pub mean: f64,
    pub std_dev: f64,
    /// Poisson rate; only read when `distribution` is Poisson.
    #[serde(default)]
    pub lambda: f64,
    /// Horizon length in days.
    pub days: usize,
    #[serde(default)]
    pub policy: PolicyKind,
    pub reorder_point: f64,
    pub order_quantity: f64,
    pub lead_time: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            distribution: DemandDistribution::Normal,
            mean: 50.0,
            std_dev: 10.0,
            lambda: 0.0,
            days: 100,
            policy: PolicyKind::ContinuousReview,
            reorder_point: 100.0,
            order_quantity: 300.0,
            lead_time: 3,
        }
    }
}

impl SimulationConfig {
    /// Checks every field invariant. Runs before any demand is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mean.is_finite() {
            return Err(ConfigError::invalid("mean", "must be a finite number"));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(ConfigError::invalid(
                "std_dev",
                "must be a finite number >= 0",
            ));
        }
        if self.distribution == DemandDistribution::Poisson
            && (!self.lambda.is_finite() || self.lambda < 0.0)
        {
            return Err(ConfigError::invalid("lambda", "must be a finite number >= 0"));
        }
        if self.days == 0 {
            return Err(ConfigError::invalid("days", "horizon must be at least 1 day"));
        }
        if !self.reorder_point.is_finite() {
            return Err(ConfigError::invalid(
                "reorder_point",
                "must be a finite number",
            ));
        }
        if !self.order_quantity.is_finite() || self.order_quantity <= 0.0 {
            return Err(ConfigError::invalid(
                "order_quantity",
                "must be a finite number > 0",
            ));
        }
        Ok(())
    }
}

/// Raw, unvalidated field values as a user typed them.
///
/// `None` and blank strings both count as "not filled in".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationInput {
    pub distribution: Option<String>,
    pub mean: Option<String>,
    pub std_dev: Option<String>,
    pub lambda: Option<String>,
    pub days: Option<String>,
    pub policy: Option<String>,
    pub reorder_point: Option<String>,
    pub order_quantity: Option<String>,
    pub lead_time: Option<String>,
}

impl SimulationInput {
    /// Parses and validates the raw fields into a `SimulationConfig`.
    ///
    /// Distribution and policy fall back to normal and s,Q when left blank.
    /// The Poisson rate is only required for Poisson demand.
    pub fn parse(&self) -> Result<SimulationConfig, ConfigError> {
        let distribution = match non_blank(&self.distribution) {
            Some(tag) => tag.parse()?,
            None => DemandDistribution::default(),
        };
        let policy = match non_blank(&self.policy) {
            Some(tag) => tag.parse()?,
            None => PolicyKind::default(),
        };

        let lambda = match distribution {
            DemandDistribution::Poisson => required_real("lambda", &self.lambda)?,
            DemandDistribution::Normal => match non_blank(&self.lambda) {
                Some(raw) => parse_real("lambda", raw)?,
                None => 0.0,
            },
        };

        let config = SimulationConfig {
            distribution,
            mean: required_real("mean", &self.mean)?,
            std_dev: required_real("std_dev", &self.std_dev)?,
            lambda,
            days: required_count("days", &self.days)?,
            policy,
            reorder_point: required_real("reorder_point", &self.reorder_point)?,
            order_quantity: required_real("order_quantity", &self.order_quantity)?,
            lead_time: required_count("lead_time", &self.lead_time)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_real(field: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse::<f64>().map_err(|_| ConfigError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

fn required_real(field: &'static str, raw: &Option<String>) -> Result<f64, ConfigError> {
    let raw = non_blank(raw).ok_or(ConfigError::Missing { field })?;
    parse_real(field, raw)
}

fn required_count(field: &'static str, raw: &Option<String>) -> Result<usize, ConfigError> {
    let raw = non_blank(raw).ok_or(ConfigError::Missing { field })?;
    let value = raw.parse::<i64>().map_err(|_| ConfigError::NotNumeric {
        field,
        value: raw.to_string(),
    })?;
    usize::try_from(value).map_err(|_| ConfigError::invalid(field, "must not be negative"))
}
