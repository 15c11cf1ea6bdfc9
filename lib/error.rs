//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdError {
    /// Lattice length must be at least 1.
    #[error("invalid lattice length {0}: must be positive")]
    InvalidLength(usize),

    /// Lattice dimension must be at least 1.
    #[error("invalid lattice dimension {0}: must be positive")]
    InvalidDimension(usize),

    /// Spin quantum number must be a positive half-integer.
    #[error("invalid spin {0}: must be a positive half-integer")]
    InvalidSpin(f64),

    #[error("unsupported Hilbert space: {0}")]
    UnsupportedHilbert(String),

    /// The number of basis states does not fit in a `usize`.
    #[error("Hilbert space of {n_sites} sites with local size {local_size} is too large to index")]
    HilbertTooLarge { n_sites: usize, local_size: usize },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("basis index {index} out of range for {n_states} states")]
    IndexOutOfRange { index: usize, n_states: usize },

    /// Diagonalization produced nothing to return.
    #[error("no eigenpairs were computed")]
    NoEigenpairs,

    #[error("linear algebra error: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error writing npz archive: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),

    #[error("error parsing config: {0}")]
    Config(#[from] toml::de::Error),
}
