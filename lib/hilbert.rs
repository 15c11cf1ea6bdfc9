//! Spin Hilbert spaces and enumeration of their basis states.
//!
//! A basis state is represented by its spin configuration: one local state
//! value per site. For spin *s* the local values are *-2s, -2s + 2, ..., 2s*,
//! so a spin-1/2 configuration is a sequence of `±1`.

use itertools::Itertools;
use rand::Rng;
use crate::{ error::EdError, graph::Hypercube };

const STATE_TOL: f64 = 1e-9;

/// Tensor product of one spin-*s* degree of freedom per site.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinHilbert {
    two_s: u32,
    n_sites: usize,
    local_states: Vec<f64>,
}

impl SpinHilbert {
    /// Create a new spin-`s` Hilbert space over `n_sites` sites.
    ///
    /// `s` must be a positive half-integer.
    pub fn new(s: f64, n_sites: usize) -> Result<Self, EdError> {
        let two_s = 2.0 * s;
        if
            !two_s.is_finite()
            || two_s < 1.0
            || (two_s - two_s.round()).abs() > STATE_TOL
            || two_s > f64::from(u16::MAX)
        {
            return Err(EdError::InvalidSpin(s));
        }
        if n_sites == 0 { return Err(EdError::InvalidLength(n_sites)); }
        let two_s = two_s.round() as u32;
        let local_states: Vec<f64>
            = (0..=two_s)
            .map(|k| f64::from(2 * k) - f64::from(two_s))
            .collect();
        Ok(Self { two_s, n_sites, local_states })
    }

    /// Create a new spin-`s` Hilbert space with one spin on each site of a
    /// lattice.
    pub fn on_graph(s: f64, graph: &Hypercube) -> Result<Self, EdError> {
        Self::new(s, graph.n_sites())
    }

    /// Spin quantum number *s*.
    pub fn spin(&self) -> f64 { f64::from(self.two_s) / 2.0 }

    /// Return `true` if every site carries a spin-1/2.
    pub fn is_spin_half(&self) -> bool { self.two_s == 1 }

    /// Allowed values of a single site, in ascending order.
    pub fn local_states(&self) -> &[f64] { &self.local_states }

    /// Number of allowed values of a single site.
    pub fn local_size(&self) -> usize { self.local_states.len() }

    /// Number of sites.
    pub fn size(&self) -> usize { self.n_sites }

    /// Total number of basis states.
    pub fn n_states(&self) -> Result<usize, EdError> {
        u32::try_from(self.n_sites).ok()
            .and_then(|n| self.local_size().checked_pow(n))
            .ok_or(EdError::HilbertTooLarge {
                n_sites: self.n_sites,
                local_size: self.local_size(),
            })
    }

    /// Return the position of a value in [`Self::local_states`].
    pub fn local_index(&self, value: f64) -> Option<usize> {
        self.local_states.iter()
            .position(|v| (v - value).abs() < STATE_TOL)
    }

    /// Draw a configuration with each site uniformly distributed over its
    /// local states.
    pub fn random_state<R>(&self, rng: &mut R) -> Vec<f64>
    where R: Rng + ?Sized
    {
        let k = self.local_size();
        (0..self.n_sites)
            .map(|_| self.local_states[rng.gen_range(0..k)])
            .collect()
    }

    /// Build the basis index for `self`.
    pub fn index(&self) -> Result<HilbertIndex, EdError> {
        HilbertIndex::new(self)
    }
}

/// Bijection between basis indices `0..n_states` and spin configurations.
///
/// A basis index is read as a big-endian number in base
/// [`SpinHilbert::local_size`]: site 0 is the most significant digit, and digit
/// `d` corresponds to the `d`-th local state. For spin-1/2, index 0 is the
/// all-down configuration and `n_states - 1` is all-up.
#[derive(Clone, Debug, PartialEq)]
pub struct HilbertIndex {
    local_states: Vec<f64>,
    n_sites: usize,
    n_states: usize,
}

impl HilbertIndex {
    /// Create a new index over a Hilbert space.
    pub fn new(hilbert: &SpinHilbert) -> Result<Self, EdError> {
        Ok(Self {
            local_states: hilbert.local_states().to_vec(),
            n_sites: hilbert.size(),
            n_states: hilbert.n_states()?,
        })
    }

    /// Total number of basis states.
    pub fn n_states(&self) -> usize { self.n_states }

    /// Number of sites in each configuration.
    pub fn n_sites(&self) -> usize { self.n_sites }

    /// Convert a basis index to its configuration.
    pub fn number_to_state(&self, number: usize) -> Result<Vec<f64>, EdError> {
        if number >= self.n_states {
            return Err(EdError::IndexOutOfRange {
                index: number,
                n_states: self.n_states,
            });
        }
        let k = self.local_states.len();
        let mut state: Vec<f64> = vec![self.local_states[0]; self.n_sites];
        let mut rem = number;
        for site in (0..self.n_sites).rev() {
            if rem == 0 { break; }
            state[site] = self.local_states[rem % k];
            rem /= k;
        }
        Ok(state)
    }

    /// Convert a configuration to its basis index.
    pub fn state_to_number(&self, state: &[f64]) -> Result<usize, EdError> {
        if state.len() != self.n_sites {
            return Err(EdError::InvalidState(format!(
                "expected {} sites, got {}", self.n_sites, state.len())));
        }
        let k = self.local_states.len();
        state.iter()
            .try_fold(0_usize, |acc, &value| -> Result<usize, EdError> {
                let digit
                    = self.local_states.iter()
                    .position(|v| (v - value).abs() < STATE_TOL)
                    .ok_or_else(|| {
                        EdError::InvalidState(
                            format!("{} is not a local state", value))
                    })?;
                Ok(acc * k + digit)
            })
    }

    /// Iterate over all configurations in ascending index order.
    pub fn states(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.n_sites)
            .map(|_| self.local_states.iter().copied())
            .multi_cartesian_product()
    }
}

#[cfg(test)]
mod tests {
    use rand::{ rngs::StdRng, SeedableRng };
    use super::*;

    #[test]
    fn spin_half_local_states() {
        let hi = SpinHilbert::new(0.5, 4).unwrap();
        assert!(hi.is_spin_half());
        assert_eq!(hi.local_states(), &[-1.0, 1.0]);
        assert_eq!(hi.n_states().unwrap(), 16);
        assert_eq!(hi.local_index(1.0), Some(1));
        assert_eq!(hi.local_index(0.0), None);
    }

    #[test]
    fn spin_one_local_states() {
        let hi = SpinHilbert::new(1.0, 3).unwrap();
        assert_eq!(hi.local_states(), &[-2.0, 0.0, 2.0]);
        assert_eq!(hi.n_states().unwrap(), 27);
        assert_eq!(hi.spin(), 1.0);
    }

    #[test]
    fn rejects_bad_spins() {
        assert!(matches!(SpinHilbert::new(0.0, 2), Err(EdError::InvalidSpin(_))));
        assert!(matches!(SpinHilbert::new(0.3, 2), Err(EdError::InvalidSpin(_))));
        assert!(matches!(SpinHilbert::new(-0.5, 2), Err(EdError::InvalidSpin(_))));
        assert!(matches!(SpinHilbert::new(0.5, 0), Err(EdError::InvalidLength(0))));
    }

    #[test]
    fn too_large_to_index() {
        let hi = SpinHilbert::new(0.5, 200).unwrap();
        assert!(matches!(hi.index(), Err(EdError::HilbertTooLarge { .. })));
    }

    #[test]
    fn big_endian_order() {
        let index = SpinHilbert::new(0.5, 2).unwrap().index().unwrap();
        let states: Vec<Vec<f64>> = index.states().collect();
        assert_eq!(
            states,
            vec![
                vec![-1.0, -1.0],
                vec![-1.0,  1.0],
                vec![ 1.0, -1.0],
                vec![ 1.0,  1.0],
            ],
        );
        for (i, state) in states.iter().enumerate() {
            assert_eq!(&index.number_to_state(i).unwrap(), state);
        }
    }

    #[test]
    fn number_state_inverse() {
        let index = SpinHilbert::new(1.0, 4).unwrap().index().unwrap();
        for i in 0..index.n_states() {
            let state = index.number_to_state(i).unwrap();
            assert_eq!(index.state_to_number(&state).unwrap(), i);
        }
        assert!(matches!(
            index.number_to_state(81),
            Err(EdError::IndexOutOfRange { index: 81, n_states: 81 }),
        ));
        assert!(index.state_to_number(&[0.0, 1.0, 0.0, 0.0]).is_err());
        assert!(index.state_to_number(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn random_states_are_valid() {
        let hi = SpinHilbert::new(0.5, 8).unwrap();
        let index = hi.index().unwrap();
        let mut rng = StdRng::seed_from_u64(10546);
        for _ in 0..100 {
            let state = hi.random_state(&mut rng);
            assert_eq!(state.len(), 8);
            assert!(index.state_to_number(&state).is_ok());
        }
    }
}
