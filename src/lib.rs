//! This crate provides a discrete-time simulator of action potential propagation
//! along chains of excitable cells.
//!
//! Each cell tracks sodium and potassium pools on both sides of its membrane,
//! derives a membrane potential from them once per tick (1 tick = 1 ms), and steps
//! through a four-phase electrical cycle: resting, stimulated, depolarized,
//! repolarized, and back to resting. A depolarized cell schedules a delayed
//! stimulation of its downstream neighbor, so an excitation travels along the
//! chain as a wave.
//!
//! # Creating Networks
//!
//! ```rust
//! use neurotick::network::Network;
//!
//! // Init an empty network
//! let mut network = Network::new();
//!
//! // Add cells and link them into a chain
//! let a = network.add_cell("A");
//! let b = network.add_cell("B");
//! let c = network.add_cell("C");
//! network.add_connection(a, b, 1.0, 0.5).unwrap();
//! network.add_connection(b, c, 1.0, 0.5).unwrap();
//!
//! // Check the number of cells and connections
//! assert_eq!(network.num_cells(), 3);
//! assert_eq!(network.num_connections(), 2);
//! ```
//!
//! # Simulating Networks
//!
//! ```rust
//! use neurotick::cell::Phase;
//! use neurotick::network::Network;
//!
//! // Build a three-cell chain and stimulate the middle cell
//! let mut network = Network::chain(["A", "B", "C"], 1.0, 0.5).unwrap();
//! network.stimulate(1).unwrap();
//!
//! // After one tick the stimulated cell is still below the depolarization
//! // threshold; one tick later it depolarizes
//! network.tick();
//! assert_eq!(network.phases()[1], Phase::Stimulated);
//! network.tick();
//! assert_eq!(network.phases()[1], Phase::Depolarized);
//!
//! // The excitation reaches the downstream cell after the propagation delay,
//! // while the unlinked upstream cell stays at rest
//! network.run(18);
//! assert_eq!(network.phases()[0], Phase::Resting);
//! assert_eq!(network.phases()[1], Phase::Resting);
//! assert_eq!(network.phases()[2], Phase::Repolarized);
//! ```

pub mod cell;
pub mod connection;
pub mod error;
pub mod network;

/// The membrane potential of a cell at the physiological resting configuration.
/// A repolarizing cell returns to rest once its potential falls back to this level.
pub const RESTING_POTENTIAL: f64 = -70.0;
/// The potential above which a stimulated cell depolarizes.
pub const DEPOLARIZATION_THRESHOLD: f64 = -55.0;
/// The peak potential above which a depolarized cell starts repolarizing.
pub const PEAK_POTENTIAL: f64 = 30.0;
