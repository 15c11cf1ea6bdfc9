#![allow(non_snake_case)]

//! Exact diagonalization of transverse-field Ising spin chains, producing
//! basis-state / ground-state log-amplitude pairs for training variational
//! wavefunctions.
//!
//! ```ignore
//! let (hilbert, samples, targets) = ising_ed::load_ed_data(10)?;
//! assert_eq!(samples.len(), 1 << 10);
//! ```

pub mod error;
pub mod utils;
pub mod config;
pub mod graph;
pub mod hilbert;
pub mod sparse;
pub mod operator;
pub mod exact;
pub mod dataset;

pub use error::EdError;
pub use dataset::{ load_ed_data, load_ed_dataset, EdDataset };
