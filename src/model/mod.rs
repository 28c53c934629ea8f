pub mod pipeline;
pub mod records;

use crate::error::SimError;

/// Empty buffer with room for one entry per simulated day.
///
/// A horizon too large to allocate is reported as a runtime error rather
/// than aborting the process.
pub(crate) fn day_buffer<T>(days: usize, what: &str) -> Result<Vec<T>, SimError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(days).map_err(|e| {
        SimError::Runtime(format!("cannot allocate {what} for {days} days: {e}"))
    })?;
    Ok(buf)
}
