//! Operators acting on spin configurations.
//!
//! An operator is described locally: given a configuration, it reports every
//! configuration it connects to along with the matrix element. Matrix
//! representations over the whole basis are derived from that description.

use ndarray as nd;
use crate::{
    error::EdError,
    hilbert::SpinHilbert,
    sparse::CsrMatrix,
};

pub mod ising;
pub use ising::Ising;

/// A nonzero matrix element `<state|O|state'>` between a configuration and
/// one of the configurations it connects to.
///
/// `state'` is `state` with the values on `sites` replaced by `values`; a
/// diagonal element has empty `sites`.
#[derive(Clone, Debug, PartialEq)]
pub struct Conn {
    pub mel: f64,
    pub sites: Vec<usize>,
    pub values: Vec<f64>,
}

impl Conn {
    /// Create a new diagonal element.
    pub fn diagonal(mel: f64) -> Self {
        Self { mel, sites: Vec::new(), values: Vec::new() }
    }

    /// Return `true` if `self` connects a configuration to itself.
    pub fn is_diagonal(&self) -> bool { self.sites.is_empty() }

    /// Return the connected configuration.
    pub fn apply_to(&self, state: &[f64]) -> Vec<f64> {
        let mut new = state.to_vec();
        self.sites.iter().zip(&self.values)
            .for_each(|(&site, &value)| { new[site] = value; });
        new
    }
}

/// Basic requirements for a real, symmetric operator.
pub trait Operator {
    /// Return a reference to the Hilbert space the operator acts on.
    fn hilbert(&self) -> &SpinHilbert;

    /// Return all matrix elements in the row of `state`.
    fn find_conn(&self, state: &[f64]) -> Vec<Conn>;

    /// Build the matrix over the full basis in sparse form.
    fn to_sparse(&self) -> Result<CsrMatrix, EdError> {
        let index = self.hilbert().index()?;
        let rows: Vec<Vec<(usize, f64)>>
            = index.states()
            .map(|state| {
                self.find_conn(&state).into_iter()
                    .map(|conn| {
                        let j = index.state_to_number(&conn.apply_to(&state))?;
                        Ok((j, conn.mel))
                    })
                    .collect::<Result<Vec<(usize, f64)>, EdError>>()
            })
            .collect::<Result<_, EdError>>()?;
        Ok(CsrMatrix::from_rows(index.n_states(), rows))
    }

    /// Build the matrix over the full basis in dense form.
    fn to_dense(&self) -> Result<nd::Array2<f64>, EdError> {
        Ok(self.to_sparse()?.to_dense())
    }

    /// Compute `O v` without storing the matrix.
    fn apply(&self, v: &nd::ArrayView1<f64>) -> Result<nd::Array1<f64>, EdError> {
        let index = self.hilbert().index()?;
        if v.len() != index.n_states() {
            return Err(EdError::InvalidState(format!(
                "vector of length {} does not match {} basis states",
                v.len(),
                index.n_states(),
            )));
        }
        index.states()
            .map(|state| {
                self.find_conn(&state).into_iter()
                    .try_fold(0.0, |acc, conn| -> Result<f64, EdError> {
                        let j = index.state_to_number(&conn.apply_to(&state))?;
                        Ok(acc + conn.mel * v[j])
                    })
            })
            .collect()
    }
}
