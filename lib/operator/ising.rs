//! Transverse-field Ising model on an arbitrary lattice.

use crate::{
    error::EdError,
    graph::Hypercube,
    hilbert::SpinHilbert,
    operator::{ Conn, Operator },
};

/// Transverse-field Ising Hamiltonian for spin-1/2 sites on a lattice,
/// ```math
/// H = -h \sum_n \sigma_n^x + J \sum_{\langle n, m \rangle} \sigma_n^z \sigma_m^z
/// ```
/// where the second sum runs over the lattice edges. `J > 0` is
/// antiferromagnetic.
#[derive(Clone, Debug, PartialEq)]
pub struct Ising {
    hilbert: SpinHilbert,
    edges: Vec<(usize, usize)>,
    h: f64,
    j: f64,
}

impl Ising {
    /// Create a new `Ising` Hamiltonian.
    ///
    /// Fails if `hilbert` is not spin-1/2 or has a different number of sites
    /// than `graph`.
    pub fn new(hilbert: &SpinHilbert, graph: &Hypercube, h: f64, j: f64)
        -> Result<Self, EdError>
    {
        if !hilbert.is_spin_half() {
            return Err(EdError::UnsupportedHilbert(format!(
                "Ising model requires spin-1/2, got s = {}", hilbert.spin())));
        }
        if hilbert.size() != graph.n_sites() {
            return Err(EdError::UnsupportedHilbert(format!(
                "Hilbert space has {} sites but the lattice has {}",
                hilbert.size(),
                graph.n_sites(),
            )));
        }
        Ok(Self {
            hilbert: hilbert.clone(),
            edges: graph.edges().to_vec(),
            h,
            j,
        })
    }

    /// Transverse field strength.
    pub fn h(&self) -> f64 { self.h }

    /// Nearest-neighbor coupling.
    pub fn j(&self) -> f64 { self.j }

    /// Edges carrying a σ<sup>*z*</sup>σ<sup>*z*</sup> coupling.
    pub fn edges(&self) -> &[(usize, usize)] { &self.edges }

    /// Return the diagonal element for a configuration.
    pub fn diagonal(&self, state: &[f64]) -> f64 {
        self.j * self.edges.iter()
            .map(|&(n, m)| state[n] * state[m])
            .sum::<f64>()
    }
}

impl Operator for Ising {
    fn hilbert(&self) -> &SpinHilbert { &self.hilbert }

    fn find_conn(&self, state: &[f64]) -> Vec<Conn> {
        let mut conns: Vec<Conn> = Vec::with_capacity(state.len() + 1);
        conns.push(Conn::diagonal(self.diagonal(state)));
        if self.h != 0.0 {
            conns.extend(
                state.iter().enumerate()
                    .map(|(n, &s)| Conn {
                        mel: -self.h,
                        sites: vec![n],
                        values: vec![-s],
                    })
            );
        }
        conns
    }
}
