//! Cross-resonance ansatz command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::info;

use ansatz_forms::{AnsatzBuilder, CrAnsatz, Entanglement, PulseAnsatz, WrapperConfig};

use super::common::{CircuitReport, OutputFormat, load_backend, write_output};
use crate::config::CrConfig;

/// Command-line arguments of `ansatz cr`.
#[derive(Debug, Default)]
pub struct CrArgs {
    pub config: Option<String>,
    pub num_qubits: Option<u32>,
    pub reps: Option<usize>,
    pub pairs: Vec<(u32, u32)>,
    pub add_rz: bool,
    pub no_final_rx: bool,
    pub backend: Option<String>,
    pub max_duration: Option<f64>,
    pub physical_qubits: Option<Vec<u32>>,
}

impl CrArgs {
    /// Resolve the effective configuration: file or defaults, then
    /// environment, then flags.
    pub fn resolve(&self) -> Result<CrConfig> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<CrConfig> {
        let mut config = CrConfig::load(self.config.as_deref(), self.num_qubits, env)
            .context("Failed to load configuration")?;
        if let Some(reps) = self.reps {
            config.reps = reps;
        }
        if !self.pairs.is_empty() {
            config.entanglement = Entanglement::Pairs(self.pairs.clone());
        }
        config.add_rz |= self.add_rz;
        if self.no_final_rx {
            config.final_rx = false;
        }
        if let Some(backend) = &self.backend {
            config.backend = Some(PathBuf::from(backend));
        }
        if let Some(max_duration) = self.max_duration {
            config.max_duration = max_duration;
        }
        if let Some(map) = &self.physical_qubits {
            config.physical_qubits = Some(map.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct CrReport<'a> {
    #[serde(flatten)]
    circuit: CircuitReport<'a>,
    backend: &'a str,
    physical_qubits: &'a [u32],
    wrapper_config: &'a WrapperConfig,
}

/// Build the scheduled ansatz described by `config`.
pub fn build(config: &CrConfig) -> Result<(CrAnsatz, ansatz_ir::Circuit)> {
    let physical_qubits = config.physical_qubits();
    let backend_size = physical_qubits
        .iter()
        .max()
        .map_or(config.num_qubits, |&q| q + 1);
    let backend = load_backend(config.backend.as_deref(), backend_size)?;
    info!(backend = backend.name(), ?physical_qubits, "loaded backend");

    let builder = AnsatzBuilder::new(backend, physical_qubits)
        .with_frequency_shift_ranges(config.frequency_shift_ranges.clone())
        .with_max_duration(config.max_duration);

    let mut ansatz = CrAnsatz::new(config.num_qubits, builder)
        .with_reps(config.reps)
        .with_entanglement(config.entanglement.clone())
        .with_add_rz(config.add_rz)
        .with_final_rx(config.final_rx);
    let circuit = ansatz.scheduled_circuit()?;
    Ok((ansatz, circuit))
}

/// Execute the cr command.
pub fn execute(args: &CrArgs, format: OutputFormat, output: Option<&str>) -> Result<()> {
    let config = args.resolve()?;
    eprintln!(
        "{} Building cross-resonance ansatz on {} qubits ({} reps)",
        style("→").cyan().bold(),
        style(config.num_qubits).yellow(),
        config.reps
    );

    let (ansatz, circuit) = build(&config)?;
    let report = CrReport {
        circuit: CircuitReport::new(&circuit),
        backend: ansatz.builder().backend().name(),
        physical_qubits: ansatz.builder().physical_qubits(),
        wrapper_config: ansatz.wrapper_config(),
    };
    report.circuit.announce();
    eprintln!(
        "  {} calibrations, {} wrapped parameters",
        circuit.calibrations().len(),
        report.wrapper_config.len()
    );
    write_output(&report, format, output)
}
