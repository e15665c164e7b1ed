//! Module implementing the excitable cells.
//!
//! A [`Cell`] owns four ionic pools (sodium and potassium, inside and outside the
//! membrane), a fixed intracellular anion charge, and two channel flags. The membrane
//! potential is derived from the pools once per tick and drives a four-phase
//! electrical cycle: resting, stimulated, depolarized, repolarized, and back to resting.
//! While depolarized, a cell schedules a delayed stimulation of its downstream
//! neighbor through its own pending-stimulus queue.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::{DEPOLARIZATION_THRESHOLD, PEAK_POTENTIAL, RESTING_POTENTIAL};

/// Resting intracellular sodium concentration (in abstract units).
pub const NA_IN_REST: i64 = 15;
/// Resting extracellular sodium concentration.
pub const NA_OUT_REST: i64 = 145;
/// Resting intracellular potassium concentration.
pub const K_IN_REST: i64 = 140;
/// Resting extracellular potassium concentration.
pub const K_OUT_REST: i64 = 5;
/// Fixed intracellular charge carried by protein anions. Never mutated.
pub const ANION_CHARGE: i64 = -100;

/// Sodium units moved out by the Na/K exchange pump each tick.
const PUMP_NA_RATE: i64 = 3;
/// Potassium units moved in by the Na/K exchange pump each tick.
const PUMP_K_RATE: i64 = 2;
/// Sodium units flowing in per tick while the sodium channel is open.
const NA_CHANNEL_FLUX: i64 = 10;
/// Potassium units flowing out per tick while the potassium channel is open.
const K_CHANNEL_FLUX: i64 = 7;

/// Net charge imbalance of the resting configuration: (15 + 140 - 100) - (145 + 5).
const RESTING_CHARGE_GAP: f64 =
    ((NA_IN_REST + K_IN_REST + ANION_CHARGE) - (NA_OUT_REST + K_OUT_REST)) as f64;
/// Scale mapping the charge imbalance to a membrane potential, chosen so that the
/// resting configuration yields exactly [`RESTING_POTENTIAL`].
const POTENTIAL_SCALE: f64 = RESTING_POTENTIAL / RESTING_CHARGE_GAP;

/// Default propagation distance to the downstream neighbor, in mm.
pub const DEFAULT_DISTANCE: f64 = 1.0;
/// Default conduction velocity, in mm per tick.
pub const DEFAULT_VELOCITY: f64 = 0.5;

/// The electrical phase of a cell.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Phase {
    Resting = 0,
    Stimulated = 1,
    Depolarized = 2,
    Repolarized = 3,
}

impl Phase {
    /// The conventional integer encoding of the phase.
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::Resting => write!(f, "resting"),
            Phase::Stimulated => write!(f, "stimulated"),
            Phase::Depolarized => write!(f, "depolarized"),
            Phase::Repolarized => write!(f, "repolarized"),
        }
    }
}

/// A pending stimulation of a downstream cell, counting down in ticks.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct PendingStimulus {
    /// The ID of the cell to stimulate.
    target: usize,
    /// The number of ticks left before delivery.
    remaining: i64,
}

/// An excitable cell.
///
/// A cell is mutated exclusively through [`Cell::tick`] and [`Cell::stimulate`];
/// the ionic pools and the phase are never written from outside.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Cell {
    /// Diagnostic label, unique within a network.
    name: String,
    phase: Phase,
    /// Intracellular sodium.
    na_in: i64,
    /// Extracellular sodium.
    na_out: i64,
    /// Intracellular potassium.
    k_in: i64,
    /// Extracellular potassium.
    k_out: i64,
    /// Fixed intracellular anion charge.
    anions: i64,
    na_open: bool,
    k_open: bool,
    /// Membrane potential, recomputed from the pools once per tick.
    potential: f64,
    /// The ID of the downstream cell, if any.
    next: Option<usize>,
    /// Distance to the downstream cell (mm).
    distance: f64,
    /// Conduction velocity (mm per tick).
    velocity: f64,
    /// Pending stimulations of downstream cells, owned exclusively by this cell.
    queue: Vec<PendingStimulus>,
}

impl Cell {
    /// Create a new cell at the physiological resting configuration, with the
    /// default propagation geometry.
    pub fn new(name: impl Into<String>) -> Self {
        let mut cell = Cell {
            name: name.into(),
            phase: Phase::Resting,
            na_in: NA_IN_REST,
            na_out: NA_OUT_REST,
            k_in: K_IN_REST,
            k_out: K_OUT_REST,
            anions: ANION_CHARGE,
            na_open: false,
            k_open: false,
            potential: 0.0,
            next: None,
            distance: DEFAULT_DISTANCE,
            velocity: DEFAULT_VELOCITY,
            queue: Vec::new(),
        };
        cell.potential = cell.compute_potential();
        cell
    }

    /// Create a new cell with the specified propagation geometry.
    /// Returns an error if the distance or the velocity is not positive and finite.
    pub fn build(
        name: impl Into<String>,
        distance: f64,
        velocity: f64,
    ) -> Result<Self, SimulationError> {
        let mut cell = Cell::new(name);
        cell.set_geometry(distance, velocity)?;
        Ok(cell)
    }

    /// Set the propagation geometry towards the downstream cell.
    /// Returns an error if the distance or the velocity is not positive and finite.
    pub fn set_geometry(&mut self, distance: f64, velocity: f64) -> Result<(), SimulationError> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "Propagation distance must be positive and finite, got {}",
                distance
            )));
        }
        if !(velocity.is_finite() && velocity > 0.0) {
            return Err(SimulationError::InvalidParameter(format!(
                "Conduction velocity must be positive and finite, got {}",
                velocity
            )));
        }
        self.distance = distance;
        self.velocity = velocity;
        Ok(())
    }

    /// Link the cell to its downstream neighbor.
    /// The link is a plain ID, so cycles are representable; a cyclic topology
    /// produces sustained re-stimulation and is the caller's responsibility.
    pub fn link_to(&mut self, target: usize) {
        self.next = Some(target);
    }

    /// Stimulate the cell. Only a resting cell reacts; in any other phase the
    /// call is a silent no-op.
    pub fn stimulate(&mut self) {
        if self.phase == Phase::Resting {
            self.phase = Phase::Stimulated;
        }
    }

    /// Advance the cell by one tick.
    ///
    /// The caller passes the current phase of the downstream neighbor (or `None`
    /// if the cell has no outgoing link); the cell never reads another cell
    /// directly. Returns the IDs of the cells whose pending stimulation came due
    /// this tick, to be delivered by the caller.
    pub fn tick(&mut self, downstream: Option<Phase>) -> Vec<usize> {
        self.pump();

        // A cell stimulated this tick starts importing sodium this same tick.
        if self.phase == Phase::Stimulated {
            self.na_open = true;
        }
        if self.na_open {
            self.na_in += NA_CHANNEL_FLUX;
            self.na_out -= NA_CHANNEL_FLUX;
        }
        if self.k_open {
            self.k_in -= K_CHANNEL_FLUX;
            self.k_out += K_CHANNEL_FLUX;
        }
        self.potential = self.compute_potential();

        if self.phase == Phase::Stimulated && self.potential > DEPOLARIZATION_THRESHOLD {
            self.phase = Phase::Depolarized;
            self.na_open = true;
        }
        if self.phase == Phase::Depolarized {
            self.propagate(downstream);
        }
        if self.phase == Phase::Depolarized && self.potential > PEAK_POTENTIAL {
            self.na_open = false;
            self.k_open = true;
            self.phase = Phase::Repolarized;
        }
        if self.phase == Phase::Repolarized && self.potential <= RESTING_POTENTIAL {
            self.k_open = false;
            self.phase = Phase::Resting;
        }

        self.countdown()
    }

    /// Run the Na/K exchange pump for one tick.
    /// Each pool saturates at its resting reference value, so the resting
    /// configuration is a fixed point of the pump and a quiescent cell always
    /// recovers its gradients instead of drifting.
    fn pump(&mut self) {
        self.na_in = (self.na_in - PUMP_NA_RATE).max(NA_IN_REST);
        self.na_out = (self.na_out + PUMP_NA_RATE).min(NA_OUT_REST);
        self.k_in = (self.k_in + PUMP_K_RATE).min(K_IN_REST);
        self.k_out = (self.k_out - PUMP_K_RATE).max(K_OUT_REST);
    }

    /// The membrane potential derived from the current pools.
    fn compute_potential(&self) -> f64 {
        let charge_in = (self.na_in + self.k_in + self.anions) as f64;
        let charge_out = (self.na_out + self.k_out) as f64;
        (charge_in - charge_out) * POTENTIAL_SCALE
    }

    /// Schedule a delayed stimulation of the downstream neighbor, if there is one
    /// and it is currently resting. Runs every tick the cell stays depolarized, so
    /// duplicate entries are possible; each one counts down independently.
    fn propagate(&mut self, downstream: Option<Phase>) {
        if let (Some(target), Some(Phase::Resting)) = (self.next, downstream) {
            self.queue.push(PendingStimulus {
                target,
                remaining: self.propagation_delay(),
            });
        }
    }

    /// Decrement all pending stimulations and drain the ones that came due,
    /// preserving the relative order of the rest.
    fn countdown(&mut self) -> Vec<usize> {
        let mut due = Vec::new();
        self.queue.retain_mut(|stim| {
            stim.remaining -= 1;
            if stim.remaining <= 0 {
                due.push(stim.target);
                false
            } else {
                true
            }
        });
        due
    }

    /// The number of ticks a stimulation takes to reach the downstream neighbor.
    pub fn propagation_delay(&self) -> i64 {
        (self.distance / self.velocity).ceil() as i64
    }

    /// The name of the cell.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current electrical phase of the cell.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The membrane potential as of the last tick.
    pub fn potential(&self) -> f64 {
        self.potential
    }

    /// The ID of the downstream cell, if any.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// The distance to the downstream cell (mm).
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The conduction velocity (mm per tick).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether the sodium channel is open.
    pub fn sodium_channel_open(&self) -> bool {
        self.na_open
    }

    /// Whether the potassium channel is open.
    pub fn potassium_channel_open(&self) -> bool {
        self.k_open
    }

    /// The number of pending stimulations owned by this cell.
    pub fn num_pending(&self) -> usize {
        self.queue.len()
    }
}
