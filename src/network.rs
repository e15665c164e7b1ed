//! Network-related structures.
//!
//! A [`Network`] owns all its cells in an arena; the downstream link of a cell is a
//! plain index into the arena. This keeps the topology explicit and free of
//! ownership cycles even when a chain loops back onto itself.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Phase};
use crate::connection::Connection;
use crate::error::SimulationError;

/// A network of excitable cells connected by directed links.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Network {
    /// The network owns the cells; links between them are indices into this arena.
    cells: Vec<Cell>,
    /// The number of ticks simulated so far.
    elapsed: u64,
}

impl Network {
    /// Init an empty network.
    pub fn new() -> Self {
        Network {
            cells: Vec::new(),
            elapsed: 0,
        }
    }

    /// Create a network of cells linked in a chain, in the order the names are given.
    /// Every link uses the same distance and velocity.
    /// Returns an error if the distance or the velocity is not positive and finite.
    pub fn chain<I, S>(names: I, distance: f64, velocity: f64) -> Result<Self, SimulationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut network = Network::new();
        for name in names {
            network.add_cell(name);
        }
        for (source_id, target_id) in (0..network.num_cells()).tuple_windows() {
            network.add_connection(source_id, target_id, distance, velocity)?;
        }
        Ok(network)
    }

    /// Add a new cell to the network and return its ID.
    pub fn add_cell(&mut self, name: impl Into<String>) -> usize {
        self.cells.push(Cell::new(name));
        self.cells.len() - 1
    }

    /// Add an already constructed cell to the network and return its ID.
    pub fn push_cell(&mut self, cell: Cell) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    /// Connect two cells of the network.
    ///
    /// The link is a single assignment: connecting a source that is already linked
    /// overwrites its previous link. No cycle validation is performed; a cyclic
    /// topology is structurally legal and produces sustained re-excitation.
    /// Returns an error if either cell is unknown or the geometry is invalid.
    pub fn add_connection(
        &mut self,
        source_id: usize,
        target_id: usize,
        distance: f64,
        velocity: f64,
    ) -> Result<(), SimulationError> {
        let connection = Connection::build(source_id, target_id, distance, velocity)?;
        if target_id >= self.cells.len() {
            return Err(SimulationError::CellNotFound(target_id));
        }
        let cell = self
            .cells
            .get_mut(source_id)
            .ok_or(SimulationError::CellNotFound(source_id))?;
        cell.set_geometry(connection.distance(), connection.velocity())?;
        cell.link_to(connection.target_id());
        Ok(())
    }

    /// Stimulate a cell of the network.
    /// Only a resting cell reacts; in any other phase this is a silent no-op.
    pub fn stimulate(&mut self, cell_id: usize) -> Result<(), SimulationError> {
        let cell = self
            .cells
            .get_mut(cell_id)
            .ok_or(SimulationError::CellNotFound(cell_id))?;
        cell.stimulate();
        Ok(())
    }

    /// Advance the whole network by one tick.
    ///
    /// Cells are ticked in arena order. Each cell only reads the phase of its
    /// downstream neighbor and mutates itself; stimulations that come due are
    /// delivered immediately after the owning cell's tick, so a cell later in the
    /// arena sees them within the same tick.
    pub fn tick(&mut self) {
        for id in 0..self.cells.len() {
            let downstream = self.cells[id]
                .next()
                .and_then(|next_id| self.cells.get(next_id))
                .map(|cell| cell.phase());
            let due = self.cells[id].tick(downstream);
            for target_id in due {
                if let Some(target) = self.cells.get_mut(target_id) {
                    target.stimulate();
                    log::debug!(
                        "Tick {}: stimulation delivered to cell {}",
                        self.elapsed,
                        target.name()
                    );
                }
            }
        }
        self.elapsed += 1;

        log::trace!(
            "Tick {}: {}",
            self.elapsed,
            self.cells
                .iter()
                .map(|cell| format!("{}={} ({:.2})", cell.name(), cell.phase(), cell.potential()))
                .join(", ")
        );
    }

    /// Run the simulation of the network for the specified number of ticks.
    pub fn run(&mut self, num_ticks: u64) {
        log::info!("Starting simulation for {} ticks...", num_ticks);
        for _ in 0..num_ticks {
            self.tick();
        }
        log::info!("Simulation completed successfully!");
    }

    /// A reference to a specific cell in the network.
    /// Returns `None` if the cell is not found.
    pub fn cell_ref(&self, cell_id: usize) -> Option<&Cell> {
        self.cells.get(cell_id)
    }

    /// An iterator over the cells in the network.
    pub fn cells_iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// The number of cells in the network.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// The number of links in the network.
    pub fn num_connections(&self) -> usize {
        self.cells.iter().filter(|cell| cell.next().is_some()).count()
    }

    /// The current phase of every cell, in arena order.
    pub fn phases(&self) -> Vec<Phase> {
        self.cells.iter().map(|cell| cell.phase()).collect()
    }

    /// The membrane potential of every cell, in arena order.
    pub fn potentials(&self) -> Vec<f64> {
        self.cells.iter().map(|cell| cell.potential()).collect()
    }

    /// The number of ticks simulated so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Save the network to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SimulationError> {
        let file = File::create(path).map_err(|e| SimulationError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| SimulationError::IOError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SimulationError::IOError(e.to_string()))
    }

    /// Load a network from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Network, SimulationError> {
        let file = File::open(path).map_err(|e| SimulationError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| SimulationError::IOError(e.to_string()))
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::new()
    }
}
