use serde::{Deserialize, Serialize};

use crate::{Error, Minutes, Result};

/// Parameters of the wait/ride graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Time spent waiting for any bus at a stop, in minutes
    pub bus_wait_time: Minutes,
    /// Bus speed in km/h
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Creates settings after checking both values
    ///
    /// # Errors
    ///
    /// Returns an error if the wait time is negative or the velocity is not positive
    pub fn new(bus_wait_time: Minutes, bus_velocity: f64) -> Result<Self> {
        let settings = Self {
            bus_wait_time,
            bus_velocity,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns an error if the wait time is negative or the velocity is not positive
    pub fn validate(&self) -> Result<()> {
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(Error::InvalidData(format!(
                "bus_wait_time must be a non-negative number, got {}",
                self.bus_wait_time
            )));
        }
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(Error::InvalidData(format!(
                "bus_velocity must be a positive number, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }

    /// Bus speed in meters per minute
    pub fn velocity_meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }
}
