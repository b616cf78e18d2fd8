use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::scoring::ScoreError;

/// Occupancy ratio = current / capacity. Zero capacity is invalid data.
#[inline]
pub fn occupancy_ratio(current: u32, capacity: u32) -> Result<f64, ScoreError> {
    if capacity == 0 {
        return Err(ScoreError::InvalidCapacity);
    }
    Ok(current as f64 / capacity as f64)
}

/// Coarse occupancy band used by clients for status colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyLevel {
    Ok,
    Warning,
    Critical,
}

pub fn occupancy_level(current: u32, capacity: u32) -> Result<OccupancyLevel, ScoreError> {
    let ratio = occupancy_ratio(current, capacity)?;
    if ratio < 0.6 {
        Ok(OccupancyLevel::Ok)
    } else if ratio < 0.85 {
        Ok(OccupancyLevel::Warning)
    } else {
        Ok(OccupancyLevel::Critical)
    }
}

/// Human-readable availability derived from occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Full,
    AlmostFull { left: u32 },
    Limited { left: u32 },
    Available { left: u32 },
}

/// Derive availability from current occupancy. Boundaries are inclusive
/// from the top: ratio >= 1 is Full, >= 0.85 Almost full, >= 0.6 Limited.
pub fn availability(current: u32, capacity: u32) -> Result<Availability, ScoreError> {
    let ratio = occupancy_ratio(current, capacity)?;
    let left = capacity.saturating_sub(current);

    if ratio >= 1.0 {
        Ok(Availability::Full)
    } else if ratio >= 0.85 {
        Ok(Availability::AlmostFull { left })
    } else if ratio >= 0.6 {
        Ok(Availability::Limited { left })
    } else {
        Ok(Availability::Available { left })
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Full => write!(f, "Full"),
            Availability::AlmostFull { left } => write!(f, "Almost full ({} left)", left),
            Availability::Limited { left } => write!(f, "Limited ({} spots)", left),
            Availability::Available { left } => write!(f, "Available ({} spots)", left),
        }
    }
}
