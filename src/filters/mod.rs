//! Signal smoothing for per-frame gesture measurements.
//!
//! Landmark-derived signals jitter from frame to frame; each detector owns
//! one filter and works on its output rather than on raw values.

/// Moving average over a bounded window
pub mod moving_average;

/// Exponential smoothing
pub mod exponential;

use crate::{Error, Result};

/// Trait for scalar signal filters
///
/// Callers must only push finite values.
pub trait SignalFilter: Send + Sync {
    /// Push a new sample and return the smoothed value
    fn apply(&mut self, value: f64) -> f64;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes values through unchanged
pub struct NoFilter;

impl SignalFilter for NoFilter {
    fn apply(&mut self, value: f64) -> f64 {
        value
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

fn parse_param<T: std::str::FromStr>(filter_type: &str, raw: Option<&str>, default: T) -> Result<T> {
    raw.map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|_| Error::FilterError(format!("Invalid parameter '{raw}' for filter {filter_type}")))
    })
}

/// Create a filter from a spec string such as `moving_average:8` or `exponential:0.4`
pub fn create_filter(spec: &str) -> Result<Box<dyn SignalFilter>> {
    let spec = spec.to_lowercase();
    let mut parts = spec.split(':');
    let name = parts.next().unwrap_or_default();
    let param = parts.next();
    if parts.next().is_some() {
        return Err(Error::FilterError(format!("Too many parameters in filter spec: {spec}")));
    }

    match name {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => {
            let window: usize = parse_param(name, param, crate::constants::SHRUG_WINDOW)?;
            if window == 0 {
                return Err(Error::FilterError("Window size must be greater than 0".to_string()));
            }
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        "exponential" => {
            let alpha: f64 = parse_param(name, param, 0.5)?;
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {spec}"))),
    }
}
