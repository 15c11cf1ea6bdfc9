//! Run configuration, loadable from TOML.
//!
//! Every field is optional; missing fields take the values used by
//! [`load_ed_data`][crate::dataset::load_ed_data]: a periodic chain of 10
//! sites with `h = J = 1` solved for the 3 lowest eigenpairs by Lanczos.
//! ```toml
//! [lattice]
//! length = 12
//! n_dim = 1
//! pbc = true
//!
//! [hamiltonian]
//! h = 1.0
//! j = 1.0
//!
//! [solver]
//! method = "lanczos"
//! first_n = 3
//! max_iter = 1000
//! precision = 1e-12
//! seed = 10546
//! matrix_free = false
//! ```

use std::path::Path;
use serde::Deserialize;
use crate::{ error::EdError, exact::LanczosParams };

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdConfig {
    pub lattice: LatticeConfig,
    pub hamiltonian: HamiltonianConfig,
    pub solver: SolverConfig,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeConfig {
    pub length: usize,
    pub n_dim: usize,
    pub pbc: bool,
}

impl Default for LatticeConfig {
    fn default() -> Self { Self { length: 10, n_dim: 1, pbc: true } }
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HamiltonianConfig {
    /// Transverse field.
    pub h: f64,
    /// Nearest-neighbor σ<sup>*z*</sup>σ<sup>*z*</sup> coupling.
    pub j: f64,
}

impl Default for HamiltonianConfig {
    fn default() -> Self { Self { h: 1.0, j: 1.0 } }
}

/// Choice of diagonalization routine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SolverMethod {
    /// Lanczos iteration for the lowest eigenpairs
    #[default]
    Lanczos,
    /// Dense diagonalization of the full matrix
    Full,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub method: SolverMethod,
    pub first_n: usize,
    pub max_iter: usize,
    pub precision: f64,
    pub seed: Option<u64>,
    pub matrix_free: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let LanczosParams { max_iter, precision, seed, matrix_free }
            = LanczosParams::default();
        Self {
            method: SolverMethod::Lanczos,
            first_n: 3,
            max_iter,
            precision,
            seed,
            matrix_free,
        }
    }
}

impl SolverConfig {
    /// Extract the parameters relevant to [`lanczos_ed`][crate::exact::lanczos_ed].
    pub fn lanczos_params(&self) -> LanczosParams {
        LanczosParams {
            max_iter: self.max_iter,
            precision: self.precision,
            seed: self.seed,
            matrix_free: self.matrix_free,
        }
    }
}

impl EdConfig {
    /// Default configuration for a periodic chain of `length` sites.
    pub fn with_length(length: usize) -> Self {
        let mut config = Self::default();
        config.lattice.length = length;
        config
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EdError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load<P>(path: P) -> Result<Self, EdError>
    where P: AsRef<Path>
    {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = EdConfig::from_toml_str("").unwrap();
        assert_eq!(config, EdConfig::default());
        assert_eq!(config.lattice.length, 10);
        assert_eq!(config.solver.first_n, 3);
        assert_eq!(config.solver.method, SolverMethod::Lanczos);
        assert_eq!(config.solver.lanczos_params(), LanczosParams::default());
    }

    #[test]
    fn partial_config() {
        let config = EdConfig::from_toml_str(r#"
            [lattice]
            length = 6
            pbc = false

            [hamiltonian]
            h = 0.5

            [solver]
            method = "full"
            seed = 7
        "#).unwrap();
        assert_eq!(config.lattice, LatticeConfig { length: 6, n_dim: 1, pbc: false });
        assert_eq!(config.hamiltonian, HamiltonianConfig { h: 0.5, j: 1.0 });
        assert_eq!(config.solver.method, SolverMethod::Full);
        assert_eq!(config.solver.lanczos_params().seed, Some(7));
        assert_eq!(config.solver.first_n, 3);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            EdConfig::from_toml_str("[lattice]\nlenght = 4\n"),
            Err(EdError::Config(_)),
        ));
        assert!(EdConfig::from_toml_str("[solver]\nmethod = \"qr\"\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lattice]\nlength = 4").unwrap();
        let config = EdConfig::load(file.path()).unwrap();
        assert_eq!(config, EdConfig::with_length(4));
        assert!(matches!(
            EdConfig::load(file.path().with_extension("missing")),
            Err(EdError::Io(_)),
        ));
    }
}
