//! RVB command implementation.

use anyhow::Result;
use console::style;

use ansatz_forms::Rvb;

use super::common::{CircuitReport, OutputFormat, write_output};

/// Execute the rvb command.
pub fn execute(
    num_qubits: u32,
    reps: usize,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    eprintln!(
        "{} Building RVB ansatz on {} qubits ({} reps)",
        style("→").cyan().bold(),
        style(num_qubits).yellow(),
        reps
    );

    let circuit = Rvb::new(num_qubits).with_reps(reps).circuit()?;
    let report = CircuitReport::new(&circuit);
    report.announce();
    write_output(&report, format, output)
}
