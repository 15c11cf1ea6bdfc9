use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing::Level;
use ising_ed::{
    mkdir,
    config::{ EdConfig, SolverMethod },
    dataset::load_ed_dataset,
};

/// Exact ground states of transverse-field Ising models as supervised training
/// data.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file; command-line options take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of sites along each lattice dimension.
    #[arg(short = 'L', long)]
    length: Option<usize>,

    /// Transverse field strength.
    #[arg(long)]
    h: Option<f64>,

    /// Nearest-neighbor coupling.
    #[arg(long)]
    j: Option<f64>,

    /// Diagonalization routine.
    #[arg(long, value_enum)]
    solver: Option<SolverMethod>,

    /// Number of lowest eigenpairs to compute.
    #[arg(long)]
    first_n: Option<usize>,

    /// Output `.npz` file [default: output/ising_ed_L{length}.npz].
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn to_config(&self) -> anyhow::Result<EdConfig> {
        let mut config
            = match &self.config {
                Some(path) => EdConfig::load(path)
                    .with_context(|| format!("reading config {}", path.display()))?,
                None => EdConfig::default(),
            };
        if let Some(length) = self.length { config.lattice.length = length; }
        if let Some(h) = self.h { config.hamiltonian.h = h; }
        if let Some(j) = self.j { config.hamiltonian.j = j; }
        if let Some(method) = self.solver { config.solver.method = method; }
        if let Some(first_n) = self.first_n { config.solver.first_n = first_n; }
        Ok(config)
    }

    fn outfile(&self, config: &EdConfig) -> PathBuf {
        self.out.clone()
            .unwrap_or_else(|| {
                PathBuf::from("output")
                    .join(format!("ising_ed_L{}.npz", config.lattice.length))
            })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level
        = match cli.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.to_config()?;
    tracing::debug!(?config, "resolved configuration");
    let data = load_ed_dataset(&config).context("exact diagonalization failed")?;
    for (k, e) in data.energies.iter().enumerate() {
        println!("E{} = {:.12}", k, e);
    }

    let outfile = cli.outfile(&config);
    if let Some(outdir) = outfile.parent().filter(|p| !p.as_os_str().is_empty()) {
        mkdir!(outdir)
            .with_context(|| format!("creating {}", outdir.display()))?;
    }
    data.write_npz(&outfile)
        .with_context(|| format!("writing {}", outfile.display()))?;
    println!("wrote {} samples to {}", data.len(), outfile.display());
    Ok(())
}
