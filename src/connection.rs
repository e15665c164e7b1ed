//! Module implementing the concept of connections between cells.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// A directed connection from a cell to its downstream neighbor.
///
/// The connection carries the propagation geometry from which the integer
/// stimulation delay is derived. It does not own either endpoint; both are plain
/// IDs resolved at the network level.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Connection {
    /// ID of the upstream cell.
    source_id: usize,
    /// ID of the downstream cell.
    target_id: usize,
    /// Distance between the two cells (mm), must be positive and finite.
    distance: f64,
    /// Conduction velocity (mm per tick), must be positive and finite.
    velocity: f64,
}

impl Connection {
    /// Create a new connection with the specified parameters.
    /// Returns an error if the distance or the velocity is not positive and finite.
    pub fn build(
        source_id: usize,
        target_id: usize,
        distance: f64,
        velocity: f64,
    ) -> Result<Self, SimulationError> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "Connection distance must be positive and finite, got {}",
                distance
            )));
        }
        if !(velocity.is_finite() && velocity > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "Connection velocity must be positive and finite, got {}",
                velocity
            )));
        }

        Ok(Connection {
            source_id,
            target_id,
            distance,
            velocity,
        })
    }

    /// Returns the ID of the upstream cell.
    pub fn source_id(&self) -> usize {
        self.source_id
    }

    /// Returns the ID of the downstream cell.
    pub fn target_id(&self) -> usize {
        self.target_id
    }

    /// Returns the distance between the two cells.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the conduction velocity along the connection.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Returns the stimulation delay in ticks, rounded up.
    pub fn delay(&self) -> i64 {
        (self.distance / self.velocity).ceil() as i64
    }
}
