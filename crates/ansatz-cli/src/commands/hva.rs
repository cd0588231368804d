//! HVA command implementation.

use anyhow::Result;
use console::style;

use ansatz_forms::Hva;

use super::common::{CircuitReport, OutputFormat, write_output};

/// Execute the hva command.
pub fn execute(
    num_qubits: u32,
    reps: usize,
    bell_pairs: bool,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    eprintln!(
        "{} Building HVA ansatz on {} qubits ({} reps{})",
        style("→").cyan().bold(),
        style(num_qubits).yellow(),
        reps,
        if bell_pairs { ", Bell pairs" } else { "" }
    );

    let circuit = Hva::new(num_qubits)
        .with_reps(reps)
        .with_bell_pairs(bell_pairs)
        .circuit()?;
    let report = CircuitReport::new(&circuit);
    report.announce();
    write_output(&report, format, output)
}
