//! Supervised training data from exact ground states.
//!
//! Each basis state of a spin chain is paired with the logarithm of the
//! corresponding ground-state amplitude, giving `(sample, target)` pairs that a
//! variational wavefunction can be fit to.

use std::path::Path;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::info;
use crate::{
    config::{ EdConfig, SolverMethod },
    error::EdError,
    exact::{ full_ed, lanczos_ed, EdResult },
    graph::Hypercube,
    hilbert::SpinHilbert,
    operator::Ising,
    write_npz,
};

/// Basis states paired with ground-state log-amplitudes.
#[derive(Clone, Debug, PartialEq)]
pub struct EdDataset {
    pub hilbert: SpinHilbert,
    /// Spin configurations in ascending basis-index order.
    pub samples: Vec<Vec<f64>>,
    /// Single-element log-amplitudes, one for each sample.
    pub targets: Vec<Vec<C64>>,
    /// Lowest eigenvalues found by the solver.
    pub energies: nd::Array1<f64>,
}

impl EdDataset {
    /// Number of `(sample, target)` pairs.
    pub fn len(&self) -> usize { self.samples.len() }

    /// Return `true` if there are no pairs.
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Ground-state energy.
    pub fn ground_energy(&self) -> f64 { self.energies[0] }

    /// Samples as an `(n_states, n_sites)` array.
    pub fn sample_array(&self) -> Result<nd::Array2<f64>, EdError> {
        let shape = (self.samples.len(), self.hilbert.size());
        Ok(nd::Array2::from_shape_vec(shape, self.samples.concat())?)
    }

    /// Targets as an `(n_states, 1)` array.
    pub fn target_array(&self) -> Result<nd::Array2<C64>, EdError> {
        let shape = (self.targets.len(), 1);
        Ok(nd::Array2::from_shape_vec(shape, self.targets.concat())?)
    }

    /// Write the dataset to an `.npz` archive with arrays `samples`,
    /// `log_psi_re`, `log_psi_im`, and `energies`.
    pub fn write_npz<P>(&self, path: P) -> Result<(), EdError>
    where P: AsRef<Path>
    {
        let samples = self.sample_array()?;
        let log_psi: nd::Array1<C64>
            = self.targets.iter().flatten().copied().collect();
        let log_psi_re: nd::Array1<f64> = log_psi.mapv(|z| z.re);
        let log_psi_im: nd::Array1<f64> = log_psi.mapv(|z| z.im);
        write_npz!(
            path.as_ref(),
            arrays: {
                "samples" => &samples,
                "log_psi_re" => &log_psi_re,
                "log_psi_im" => &log_psi_im,
                "energies" => &self.energies,
            }
        )
    }
}

/// Principal natural logarithm of a real amplitude.
///
/// A zero amplitude gives a real part of `-inf`; a negative amplitude gives an
/// imaginary part of `π`.
pub fn log_amplitude(x: f64) -> C64 { C64::from(x).ln() }

/// Build the transverse-field Ising model described by `config` and
/// diagonalize it, computing eigenvectors.
pub fn solve(config: &EdConfig) -> Result<(SpinHilbert, EdResult), EdError> {
    let lattice = &config.lattice;
    let graph = Hypercube::new(lattice.length, lattice.n_dim, lattice.pbc)?;
    let hilbert = SpinHilbert::on_graph(0.5, &graph)?;
    let ha = Ising::new(
        &hilbert, &graph, config.hamiltonian.h, config.hamiltonian.j)?;
    let first_n = config.solver.first_n;
    let res
        = match config.solver.method {
            SolverMethod::Lanczos => {
                let params = config.solver.lanczos_params();
                lanczos_ed(&ha, first_n, true, &params)?
            },
            SolverMethod::Full => full_ed(&ha, first_n, true)?,
        };
    Ok((hilbert, res))
}

/// Generate the dataset for the model described by `config`.
pub fn load_ed_dataset(config: &EdConfig) -> Result<EdDataset, EdError> {
    let (hilbert, res) = solve(config)?;
    let psi0 = res.ground_state().ok_or(EdError::NoEigenpairs)?;
    let index = hilbert.index()?;
    let samples: Vec<Vec<f64>> = index.states().collect();
    let targets: Vec<Vec<C64>>
        = psi0.iter().map(|&a| vec![log_amplitude(a)]).collect();
    info!(
        n_sites = hilbert.size(),
        n_states = samples.len(),
        ground_energy = res.ground_energy(),
        "generated ground-state dataset"
    );
    Ok(EdDataset { hilbert, samples, targets, energies: res.eigenvalues })
}

/// Generate `(hilbert, samples, targets)` for the transverse-field Ising model
/// with `h = 1` on a periodic chain of `length` sites.
///
/// Samples are all `2^length` spin configurations in ascending basis-index
/// order; each target holds the log of the matching component of the Lanczos
/// ground state.
pub fn load_ed_data(length: usize)
    -> Result<(SpinHilbert, Vec<Vec<f64>>, Vec<Vec<C64>>), EdError>
{
    let EdDataset { hilbert, samples, targets, .. }
        = load_ed_dataset(&EdConfig::with_length(length))?;
    Ok((hilbert, samples, targets))
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use ndarray_npy::NpzReader;
    use super::*;

    #[test]
    fn sizes_and_values() {
        for l in 1..=6 {
            let (hi, samples, targets) = load_ed_data(l).unwrap();
            assert_eq!(hi.size(), l);
            assert_eq!(samples.len(), 1 << l);
            assert_eq!(targets.len(), 1 << l);
            assert!(
                samples.iter()
                    .all(|s| s.len() == l && s.iter().all(|&x| x == 1.0 || x == -1.0))
            );
            assert!(targets.iter().all(|t| t.len() == 1));
        }
    }

    #[test]
    fn two_site_chain() {
        let (_, samples, targets) = load_ed_data(2).unwrap();
        assert_eq!(
            samples,
            vec![
                vec![-1.0, -1.0],
                vec![-1.0,  1.0],
                vec![ 1.0, -1.0],
                vec![ 1.0,  1.0],
            ],
        );
        assert!(targets.iter().all(|t| t[0].im == 0.0));
        let golden: f64 = (1.0 + 5.0_f64.sqrt()) / 2.0;
        assert!((targets[1][0].re - targets[0][0].re - golden.ln()).abs() < 1e-10);
        assert!((targets[1][0] - targets[2][0]).norm() < 1e-10);
        assert!((targets[0][0] - targets[3][0]).norm() < 1e-10);
        let norm: f64 = targets.iter().map(|t| (2.0 * t[0].re).exp()).sum();
        assert!((norm - 1.0).abs() < 1e-10);

        let data = load_ed_dataset(&EdConfig::with_length(2)).unwrap();
        assert!((data.ground_energy() + 5.0_f64.sqrt()).abs() < 1e-10);
        assert_eq!(data.energies.len(), 3);
    }

    #[test]
    fn repeated_calls_agree() {
        let a = load_ed_data(7).unwrap();
        let b = load_ed_data(7).unwrap();
        assert_eq!(a.1, b.1);
        assert_eq!(a.2, b.2);
    }

    #[test]
    fn solvers_agree() {
        let mut config = EdConfig::with_length(6);
        let lanczos = load_ed_dataset(&config).unwrap();
        config.solver.method = SolverMethod::Full;
        let full = load_ed_dataset(&config).unwrap();
        assert_eq!(lanczos.samples, full.samples);
        assert!((lanczos.ground_energy() - full.ground_energy()).abs() < 1e-8);
        lanczos.targets.iter().zip(&full.targets)
            .for_each(|(a, b)| assert!((a[0].exp() - b[0].exp()).norm() < 1e-4));
    }

    #[test]
    fn invalid_length() {
        assert!(matches!(load_ed_data(0), Err(EdError::InvalidLength(0))));
        assert!(matches!(
            load_ed_data(80),
            Err(EdError::HilbertTooLarge { n_sites: 80, local_size: 2 }),
        ));
    }

    #[test]
    fn log_amplitudes() {
        assert_eq!(log_amplitude(1.0), C64::new(0.0, 0.0));
        let neg = log_amplitude(-1.0);
        assert!(neg.re.abs() < 1e-15);
        assert!((neg.im - std::f64::consts::PI).abs() < 1e-15);
        assert_eq!(log_amplitude(0.0).re, f64::NEG_INFINITY);
    }

    #[test]
    fn arrays_and_npz() {
        let data = load_ed_dataset(&EdConfig::with_length(3)).unwrap();
        assert_eq!(data.len(), 8);
        let samples = data.sample_array().unwrap();
        assert_eq!(samples.shape(), &[8, 3]);
        assert_eq!(samples.row(5).to_vec(), vec![1.0, -1.0, 1.0]);
        assert_eq!(data.target_array().unwrap().shape(), &[8, 1]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ising.npz");
        data.write_npz(&path).unwrap();
        let npz = NpzReader::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(npz.len(), 4);
    }
}
