// src/io/reporting.rs

use crate::error::ReportError;
use crate::model::records::{OrderEvent, SimulationResult};
use crate::simulation::batch::BatchReport;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const DEFAULT_RESULTS_FILE: &str = "inventory_simulation_results.csv";

/// Writes the day table (`Day,Demand,On Hand,In Shipment,Service Level`)
/// to any writer. The rows are written exactly as simulated.
pub fn write_day_table<W: Write>(writer: W, result: &SimulationResult) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in &result.records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the day table to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save it (e.g., "results/run_1.csv").
/// * `result` - The finished run.
pub fn write_simulation_log<P: AsRef<Path>>(
    file_path: P,
    result: &SimulationResult,
) -> Result<(), ReportError> {
    let file_path = file_path.as_ref();
    write_day_table(File::create(file_path)?, result)?;

    info!(
        rows = result.records.len(),
        path = %file_path.display(),
        "exported day table"
    );
    Ok(())
}

/// Writes every order placed (`Day Placed,Quantity,Arrival Day`).
/// The arrival day is blank for shipments beyond the horizon.
pub fn write_order_log<P: AsRef<Path>>(
    file_path: P,
    orders: &[OrderEvent],
) -> Result<(), ReportError> {
    let file_path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(file_path)?;
    if orders.is_empty() {
        wtr.write_record(["Day Placed", "Quantity", "Arrival Day"])?;
    }
    for order in orders {
        wtr.serialize(order)?;
    }
    wtr.flush()?;

    info!(rows = orders.len(), path = %file_path.display(), "exported order log");
    Ok(())
}

#[derive(Debug, Serialize)]
struct BatchRow<'a> {
    #[serde(rename = "Id")]
    id: &'a str,
    #[serde(rename = "Seed")]
    seed: Option<u64>,
    #[serde(rename = "Service Level")]
    service_level: Option<f64>,
    #[serde(rename = "Orders Placed")]
    orders_placed: Option<usize>,
    #[serde(rename = "Stockout Days")]
    stockout_days: Option<usize>,
    #[serde(rename = "Final On Hand")]
    final_on_hand: Option<f64>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Writes one row per batch job, in submission order.
pub fn write_batch_summary<W: Write>(writer: W, report: &BatchReport) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for job in &report.results {
        let row = match &job.outcome {
            Ok(summary) => BatchRow {
                id: &job.id,
                seed: job.seed,
                service_level: Some(summary.average_service_level),
                orders_placed: Some(summary.orders_placed),
                stockout_days: Some(summary.stockout_days),
                final_on_hand: Some(summary.final_on_hand),
                error: None,
            },
            Err(e) => BatchRow {
                id: &job.id,
                seed: job.seed,
                service_level: None,
                orders_placed: None,
                stockout_days: None,
                final_on_hand: None,
                error: Some(e.to_string()),
            },
        };
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The completion notice shown after a single run.
pub fn completion_message(file_path: &str, result: &SimulationResult) -> String {
    format!(
        "Simulation complete.\nResults saved to '{}'.\nAverage Service Level: {:.2}",
        file_path, result.average_service_level
    )
}
